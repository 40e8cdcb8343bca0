//! # DocumentClient Trait
//!
//! Common interface for collection-specific clients: default `get`, `delete`
//! and `watch` methods built on top of a [`CollectionClient`], with framework
//! errors mapped into the collection's own error type.

use crate::{CollectionClient, Document, StoreError, Subscription};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard operations.
///
/// ```rust
/// use doc_framework::{CollectionClient, Document, DocumentClient, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Menu { id: u32 }
/// #[derive(Debug)] struct MenuCreate;
/// #[derive(Debug)] struct MenuUpdate;
/// #[derive(Debug)] enum MenuAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct MenuError(String);
/// impl From<String> for MenuError { fn from(s: String) -> Self { MenuError(s) } }
///
/// #[async_trait]
/// impl Document for Menu {
///     type Id = u32; type Create = MenuCreate; type Update = MenuUpdate;
///     type Action = MenuAction; type ActionResult = (); type Context = (); type Error = MenuError;
///     fn from_create_params(id: u32, _: MenuCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: MenuUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: MenuAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct MenuClient { inner: CollectionClient<Menu> }
///
/// #[async_trait]
/// impl DocumentClient<Menu> for MenuClient {
///     type Error = MenuError;
///     fn inner(&self) -> &CollectionClient<Menu> { &self.inner }
///     fn map_error(e: StoreError) -> Self::Error { MenuError(e.to_string()) }
/// }
///
/// async fn usage(client: MenuClient) {
///     // get(), delete() and watch() come with the trait
///     let _ = client.get(1).await;
///     let _ = client.watch(1).await;
/// }
/// ```
#[async_trait]
pub trait DocumentClient<T: Document>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map framework errors to the collection error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a document by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Subscribe to one document. The first notification is its current state.
    #[tracing::instrument(skip(self))]
    async fn watch(&self, id: T::Id) -> Result<Subscription<Option<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().watch(id).await.map_err(Self::map_error)
    }
}
