//! # Mock Collections
//!
//! [`MockClient`] hands out a real [`CollectionClient`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test client-side logic (status advancing, entitlement degradation, ...)
//! deterministically and to inject failures that are hard to provoke against a
//! live collection.
//!
//! | | MockClient | CollectionActor |
//! |---|---|---|
//! | **State** | scripted responses | real documents |
//! | **Error injection** | `return_err` | requires specific state |
//! | **Use case** | logic *around* a client | the collection itself, full flows |
//!
//! ```rust
//! use doc_framework::mock::MockClient;
//! use doc_framework::{Document, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Plan { id: u32 }
//! #[derive(Debug)] struct PlanCreate;
//! #[derive(Debug)] struct PlanUpdate;
//! #[derive(Debug)] enum PlanAction {}
//! #[derive(Debug, thiserror::Error)] #[error("plan error")] struct PlanError;
//!
//! #[async_trait]
//! impl Document for Plan {
//!     type Id = u32; type Create = PlanCreate; type Update = PlanUpdate;
//!     type Action = PlanAction; type ActionResult = (); type Context = (); type Error = PlanError;
//!     fn from_create_params(id: u32, _: PlanCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: PlanUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: PlanAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Plan>::new();
//!     mock.expect_get(1).return_err(StoreError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! The lower-level [`create_mock_client`] returns the raw request receiver so a
//! test can inspect each request before answering it.

use crate::client::CollectionClient;
use crate::entity::Document;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use crate::subscription::Subscription;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// One scripted answer, consumed in FIFO order.
enum Expectation<T: Document> {
    Get {
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Action {
        response: Result<T::ActionResult, StoreError>,
    },
    Batch {
        response: Result<Vec<T::ActionResult>, StoreError>,
    },
    Watch {
        response: Result<Subscription<Option<T>>, StoreError>,
    },
}

/// A mock collection with expectation tracking.
///
/// A request that does not match the next expectation is dropped unanswered,
/// which the caller sees as [`StoreError::ActorDropped`]; [`MockClient::verify`]
/// then fails because the expectation is still queued.
pub struct MockClient<T: Document> {
    client: CollectionClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = Arc::clone(&expectations);

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = queue.lock().expect("mock expectations poisoned");
                let matched = match (&request, exps.front()) {
                    (CollectionRequest::Get { .. }, Some(Expectation::Get { .. }))
                    | (CollectionRequest::Create { .. }, Some(Expectation::Create { .. }))
                    | (CollectionRequest::Insert { .. }, Some(Expectation::Create { .. }))
                    | (CollectionRequest::Action { .. }, Some(Expectation::Action { .. }))
                    | (CollectionRequest::Batch { .. }, Some(Expectation::Batch { .. }))
                    | (CollectionRequest::Watch { .. }, Some(Expectation::Watch { .. })) => true,
                    _ => false,
                };
                if !matched {
                    tracing::warn!("Unexpected request, leaving it unanswered");
                    continue;
                }
                let expectation = exps.pop_front();
                drop(exps);

                match (request, expectation) {
                    (CollectionRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (CollectionRequest::Create { respond_to, .. }, Some(Expectation::Create { response }))
                    | (CollectionRequest::Insert { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (CollectionRequest::Action { respond_to, .. }, Some(Expectation::Action { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (CollectionRequest::Batch { respond_to, .. }, Some(Expectation::Batch { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (CollectionRequest::Watch { respond_to, .. }, Some(Expectation::Watch { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {}
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            _id: id,
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects a `create` or an `insert`.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            _id: id,
            expectations: Arc::clone(&self.expectations),
        }
    }

    pub fn expect_batch(&mut self) -> BatchExpectationBuilder<T> {
        BatchExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    pub fn expect_watch(&mut self, id: T::Id) -> WatchExpectationBuilder<T> {
        WatchExpectationBuilder {
            _id: id,
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Panics if an expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().expect("mock expectations poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: Document> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn push<T: Document>(expectations: &Expectations<T>, expectation: Expectation<T>) {
    expectations
        .lock()
        .expect("mock expectations poisoned")
        .push_back(expectation);
}

pub struct GetExpectationBuilder<T: Document> {
    _id: T::Id,
    expectations: Expectations<T>,
}

impl<T: Document> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        push(&self.expectations, Expectation::Get { response: Ok(value) });
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::Get { response: Err(error) });
    }
}

pub struct CreateExpectationBuilder<T: Document> {
    expectations: Expectations<T>,
}

impl<T: Document> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        push(&self.expectations, Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::Create { response: Err(error) });
    }
}

pub struct ActionExpectationBuilder<T: Document> {
    _id: T::Id,
    expectations: Expectations<T>,
}

impl<T: Document> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.expectations, Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::Action { response: Err(error) });
    }
}

pub struct BatchExpectationBuilder<T: Document> {
    expectations: Expectations<T>,
}

impl<T: Document> BatchExpectationBuilder<T> {
    pub fn return_ok(self, results: Vec<T::ActionResult>) {
        push(&self.expectations, Expectation::Batch { response: Ok(results) });
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::Batch { response: Err(error) });
    }
}

pub struct WatchExpectationBuilder<T: Document> {
    _id: T::Id,
    expectations: Expectations<T>,
}

impl<T: Document> WatchExpectationBuilder<T> {
    /// Answers with a subscription and returns the feed that drives it.
    pub fn return_feed(self) -> mpsc::UnboundedSender<Option<T>> {
        let (feed, subscription) = Subscription::channel();
        push(&self.expectations, Expectation::Watch { response: Ok(subscription) });
        feed
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::Watch { response: Err(error) });
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Next request, if it is an `Action`.
pub async fn expect_action<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a `Batch`.
pub async fn expect_batch<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Action)>,
    oneshot::Sender<Result<Vec<T::ActionResult>, StoreError>>,
)> {
    match receiver.recv().await {
        Some(CollectionRequest::Batch {
            actions,
            respond_to,
        }) => Some((actions, respond_to)),
        _ => None,
    }
}
