//! # Collection Messages
//!
//! The request enum exchanged between a [`CollectionClient`](crate::CollectionClient)
//! and its [`CollectionActor`](crate::CollectionActor).

use crate::entity::Document;
use crate::error::StoreError;
use crate::subscription::{Query, Subscription};
use tokio::sync::oneshot;

/// One-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by a collection actor.
///
/// The first five variants are the classic CRUD set plus a custom `Action`.
/// `Batch` applies several actions atomically. `Watch`, `WatchQuery` and
/// `WatcherCount` cover push notifications.
#[derive(Debug)]
pub enum CollectionRequest<T: Document> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Insert {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    /// Applied in order against staged copies; committed only if every
    /// action succeeds.
    Batch {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>>,
    },
    Watch {
        id: T::Id,
        respond_to: Response<Subscription<Option<T>>>,
    },
    WatchQuery {
        query: Query<T>,
        respond_to: Response<Subscription<Vec<T>>>,
    },
    /// Number of live subscriptions, after pruning closed ones.
    WatcherCount { respond_to: Response<usize> },
}
