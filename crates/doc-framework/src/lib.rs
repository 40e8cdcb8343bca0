//! # Document Framework
//!
//! Building blocks for a reactive, in-process document store. Each document
//! kind lives in its own **collection actor**: a Tokio task that owns the
//! documents, processes requests sequentially and pushes change
//! notifications to subscribers.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Document Layer** ([`Document`]) - business rules for one kind of record
//! 2. **Runtime Layer** ([`CollectionActor`]) - message processing, watchers, batches
//! 3. **Interface Layer** ([`CollectionClient`]) - type-safe, cloneable access
//!
//! ## What a collection offers
//!
//! | Operation | Request | Notes |
//! |-----------|---------|-------|
//! | create | [`CollectionRequest::Create`] | id allocated by the actor |
//! | insert | [`CollectionRequest::Insert`] | caller-chosen id, fails if taken |
//! | get | [`CollectionRequest::Get`] | `None` when absent |
//! | update | [`CollectionRequest::Update`] | applied to a copy, committed on success |
//! | delete | [`CollectionRequest::Delete`] | |
//! | action | [`CollectionRequest::Action`] | document-specific operation |
//! | batch | [`CollectionRequest::Batch`] | all actions commit together or none do |
//! | watch | [`CollectionRequest::Watch`] | one document, `None` once deleted |
//! | watch_query | [`CollectionRequest::WatchQuery`] | every document matching a [`Query`] |
//!
//! Every subscription receives the current state immediately and then one
//! message per committed change that touches it. A batch is published once,
//! after the whole batch committed.
//!
//! ## Example
//!
//! ```rust
//! use doc_framework::{CollectionActor, Document};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, hits: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] struct CounterUpdate;
//! #[derive(Debug)] enum CounterAction { Hit }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl Document for Counter {
//!     type Id = u32; type Create = CounterCreate; type Update = CounterUpdate;
//!     type Action = CounterAction; type ActionResult = u32; type Context = (); type Error = CounterError;
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> { Ok(Self { id, hits: 0 }) }
//!     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
//!         self.hits += 1;
//!         Ok(self.hits)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = CollectionActor::<Counter>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CounterCreate).await.unwrap();
//!     let mut feed = client.watch(id).await.unwrap();
//!     assert_eq!(feed.next().await.unwrap().unwrap().hits, 0);
//!
//!     client.perform_action(id, CounterAction::Hit).await.unwrap();
//!     assert_eq!(feed.next().await.unwrap().unwrap().hits, 1);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations so client
//! logic can be tested without spawning a collection actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod subscription;
pub mod tracing;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use client_trait::DocumentClient;
pub use entity::Document;
pub use error::StoreError;
pub use message::{CollectionRequest, Response};
pub use subscription::{Query, Subscription};
