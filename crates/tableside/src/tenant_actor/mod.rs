//! # Tenant Collection
//!
//! Restaurant businesses and their billing state. Tenants change through
//! partial updates (plan assignment, subscription status); there are no
//! document-specific actions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Tenant;
use doc_framework::{CollectionActor, CollectionClient};

/// Creates a new Tenant actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Tenant>, CollectionClient<Tenant>) {
    CollectionActor::new(buffer_size)
}
