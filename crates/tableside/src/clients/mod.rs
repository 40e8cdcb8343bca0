//! # Collection Clients
//!
//! Typed wrappers over [`CollectionClient`](doc_framework::CollectionClient)
//! for each collection. They add the domain operations and map
//! [`StoreError`] into the collection's own error type.

pub mod order_client;
pub mod plan_client;
pub mod profile_client;
pub mod tenant_client;

pub use order_client::*;
pub use plan_client::*;
pub use profile_client::*;
pub use tenant_client::*;

use doc_framework::StoreError;

/// Recovers a domain error raised by a document hook; anything else goes
/// through `other`.
pub(crate) fn recover<E>(e: StoreError, other: impl FnOnce(StoreError) -> E) -> E
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e {
        StoreError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(domain) => *domain,
            Err(inner) => other(StoreError::EntityError(inner)),
        },
        e => other(e),
    }
}
