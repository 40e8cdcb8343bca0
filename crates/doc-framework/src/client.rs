//! # Collection Client
//!
//! The cloneable, type-safe handle used to talk to a [`CollectionActor`](crate::CollectionActor).

use crate::entity::Document;
use crate::error::StoreError;
use crate::message::{CollectionRequest, Response};
use crate::subscription::{Query, Subscription};
use tokio::sync::{mpsc, oneshot};

/// Async API over a collection actor.
///
/// Holds only the request sender, so cloning is cheap. Every call sends one
/// request and awaits its one-shot reply.
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> CollectionRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.call(|respond_to| CollectionRequest::Create { params, respond_to })
            .await
    }

    /// Creates a document under a caller-chosen id.
    pub async fn insert(&self, id: T::Id, params: T::Create) -> Result<T::Id, StoreError> {
        self.call(|respond_to| CollectionRequest::Insert {
            id,
            params,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.call(|respond_to| CollectionRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.call(|respond_to| CollectionRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.call(|respond_to| CollectionRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.call(|respond_to| CollectionRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Applies every action or none of them.
    pub async fn batch(
        &self,
        actions: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, StoreError> {
        self.call(|respond_to| CollectionRequest::Batch {
            actions,
            respond_to,
        })
        .await
    }

    pub async fn watch(&self, id: T::Id) -> Result<Subscription<Option<T>>, StoreError> {
        self.call(|respond_to| CollectionRequest::Watch { id, respond_to })
            .await
    }

    pub async fn watch_query(&self, query: Query<T>) -> Result<Subscription<Vec<T>>, StoreError> {
        self.call(|respond_to| CollectionRequest::WatchQuery { query, respond_to })
            .await
    }

    pub async fn watcher_count(&self) -> Result<usize, StoreError> {
        self.call(|respond_to| CollectionRequest::WatcherCount { respond_to })
            .await
    }
}
