//! # Document Trait
//!
//! The `Document` trait is the contract every stored record (orders, tenants,
//! plans, profiles, ...) implements to be managed by a [`CollectionActor`].
//! It names the id, the DTOs for create/update, the document-specific actions
//! and the error type, and provides async hooks that run inside the actor.
//!
//! # Provided Methods (Hooks)
//! - [`Document::on_create`]
//! - [`Document::on_delete`]
//!
//! Both default to `Ok(())`.
//!
//! [`CollectionActor`]: crate::CollectionActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// A record kind managed by a [`CollectionActor`](crate::CollectionActor).
///
/// Hooks receive the actor's `Context`, injected when the actor is started.
/// This lets a document consult other collections (for example an order
/// checking that its tenant exists) without wiring them at construction time.
///
/// Hooks always run against a *copy* of the stored document. The copy replaces
/// the stored one only if the hook returns `Ok`, so a failing hook never leaves
/// a half-applied change behind.
#[async_trait]
pub trait Document: Clone + Send + Sync + 'static {
    /// Unique identifier. Must be convertible from `u32` so the actor can
    /// allocate ids for [`create`](crate::CollectionClient::create).
    /// `Ord` keeps query snapshots in a stable order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new document.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing document.
    type Update: Send + Sync + Debug;

    /// Document-specific operations (e.g. advancing an order's status).
    type Action: Send + Sync + Debug;

    /// Result returned by [`Document::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per collection.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the document from its id and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the document was built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
