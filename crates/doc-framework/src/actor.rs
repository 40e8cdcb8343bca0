//! # Collection Actor
//!
//! The server half of a collection. It owns the documents and the watcher
//! list, processes requests one at a time and publishes every committed change
//! to the watchers it touches.

use crate::client::CollectionClient;
use crate::entity::Document;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use crate::subscription::{Query, Subscription};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A registered listener.
enum Watcher<T: Document> {
    Document {
        id: T::Id,
        sender: mpsc::UnboundedSender<Option<T>>,
    },
    Query {
        query: Query<T>,
        sender: mpsc::UnboundedSender<Vec<T>>,
    },
}

impl<T: Document> Watcher<T> {
    fn is_closed(&self) -> bool {
        match self {
            Watcher::Document { sender, .. } => sender.is_closed(),
            Watcher::Query { sender, .. } => sender.is_closed(),
        }
    }
}

/// A committed change: the document id and its state before the commit.
struct Change<T: Document> {
    id: T::Id,
    before: Option<T>,
}

/// The generic actor that manages one collection of documents.
///
/// **Concurrency Model**: each collection runs in its own task and handles its
/// requests sequentially, so the store needs no lock. Two clients racing on the
/// same document are serialized here; whichever request arrives last wins.
///
/// **Commit Model**: updates, actions and batches run against copies of the
/// stored documents. The copies replace the originals only when every hook
/// succeeded, and watchers are notified after the commit.
///
/// ```rust
/// use doc_framework::{CollectionActor, Document};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate(String);
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl Document for Note {
///     type Id = u32; type Create = NoteCreate; type Update = NoteUpdate;
///     type Action = NoteAction; type ActionResult = (); type Context = (); type Error = NoteError;
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, Self::Error> { Ok(Self { id, text: p.0 }) }
///     async fn on_update(&mut self, u: NoteUpdate, _: &()) -> Result<(), Self::Error> { self.text = u.0; Ok(()) }
///     async fn handle_action(&mut self, _: NoteAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = CollectionActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(NoteCreate("hi".into())).await.unwrap();
///     let note = client.update(id, NoteUpdate("bye".into())).await.unwrap();
///     assert_eq!(note.text, "bye");
/// }
/// ```
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    store: BTreeMap<T::Id, T>,
    watchers: Vec<Watcher<T>>,
    next_id: u32,
}

impl<T: Document> CollectionActor<T> {
    /// Creates a collection actor and its client.
    ///
    /// `buffer_size` is the request channel capacity; clients wait when it is
    /// full.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            watchers: Vec::new(),
            next_id: 1,
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the request loop until every client is dropped.
    ///
    /// `context` is handed to every document hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.allocate_id();
                    let result = self.create(entity_type, id, params, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Create failed");
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Insert {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Insert");
                    let result = if self.store.contains_key(&id) {
                        Err(StoreError::AlreadyExists(id.to_string()))
                    } else {
                        self.create(entity_type, id, params, &context).await
                    };
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Insert failed");
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let before = self.store.insert(id.clone(), staged.clone());
                    info!(entity_type, %id, "Updated");
                    self.publish(&[Change { id, before }]);
                    let _ = respond_to.send(Ok(staged));
                }
                CollectionRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let before = self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    self.publish(&[Change { id, before }]);
                    let _ = respond_to.send(Ok(()));
                }
                CollectionRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            let before = self.store.insert(id.clone(), staged);
                            info!(entity_type, %id, "Action ok");
                            self.publish(&[Change { id, before }]);
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        }
                    }
                }
                CollectionRequest::Batch {
                    actions,
                    respond_to,
                } => {
                    let len = actions.len();
                    debug!(entity_type, len, "Batch");
                    match self.stage_batch(actions, &context).await {
                        Ok((staged, results)) => {
                            let changes: Vec<Change<T>> = staged
                                .into_iter()
                                .map(|(id, doc)| {
                                    let before = self.store.insert(id.clone(), doc);
                                    Change { id, before }
                                })
                                .collect();
                            info!(entity_type, len, documents = changes.len(), "Batch committed");
                            self.publish(&changes);
                            let _ = respond_to.send(Ok(results));
                        }
                        Err(e) => {
                            warn!(entity_type, len, error = %e, "Batch rejected");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                CollectionRequest::Watch { id, respond_to } => {
                    let (sender, subscription) = Subscription::channel();
                    let _ = sender.send(self.store.get(&id).cloned());
                    debug!(entity_type, %id, "Watch");
                    self.watchers.push(Watcher::Document { id, sender });
                    let _ = respond_to.send(Ok(subscription));
                }
                CollectionRequest::WatchQuery { query, respond_to } => {
                    let (sender, subscription) = Subscription::channel();
                    let _ = sender.send(self.collect(&query));
                    debug!(entity_type, query = query.label(), "Watch query");
                    self.watchers.push(Watcher::Query { query, sender });
                    let _ = respond_to.send(Ok(subscription));
                }
                CollectionRequest::WatcherCount { respond_to } => {
                    self.watchers.retain(|w| !w.is_closed());
                    let _ = respond_to.send(Ok(self.watchers.len()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Next sequential id not already taken through `Insert`.
    fn allocate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    async fn create(
        &mut self,
        entity_type: &str,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, StoreError> {
        let mut item =
            T::from_create_params(id.clone(), params).map_err(|e| StoreError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        self.publish(&[Change {
            id: id.clone(),
            before: None,
        }]);
        Ok(id)
    }

    /// Runs every action against staged copies. Nothing in `store` changes.
    async fn stage_batch(
        &self,
        actions: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<(BTreeMap<T::Id, T>, Vec<T::ActionResult>), StoreError> {
        let mut staged: BTreeMap<T::Id, T> = BTreeMap::new();
        let mut results = Vec::with_capacity(actions.len());
        for (id, action) in actions {
            if !staged.contains_key(&id) {
                let current = self
                    .store
                    .get(&id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                staged.insert(id.clone(), current.clone());
            }
            let Some(doc) = staged.get_mut(&id) else {
                return Err(StoreError::NotFound(id.to_string()));
            };
            let result = doc
                .handle_action(action, context)
                .await
                .map_err(|e| StoreError::EntityError(Box::new(e)))?;
            results.push(result);
        }
        Ok((staged, results))
    }

    fn collect(&self, query: &Query<T>) -> Vec<T> {
        self.store
            .values()
            .filter(|doc| query.matches(doc))
            .cloned()
            .collect()
    }

    /// Notifies every watcher touched by `changes`, dropping closed ones.
    fn publish(&mut self, changes: &[Change<T>]) {
        let store = &self.store;
        self.watchers.retain(|watcher| match watcher {
            Watcher::Document { id, sender } => {
                if changes.iter().any(|c| &c.id == id) {
                    sender.send(store.get(id).cloned()).is_ok()
                } else {
                    !sender.is_closed()
                }
            }
            Watcher::Query { query, sender } => {
                let touched = changes.iter().any(|c| {
                    c.before.as_ref().is_some_and(|doc| query.matches(doc))
                        || store.get(&c.id).is_some_and(|doc| query.matches(doc))
                });
                if touched {
                    let snapshot = store.values().filter(|doc| query.matches(doc)).cloned().collect();
                    sender.send(snapshot).is_ok()
                } else {
                    !sender.is_closed()
                }
            }
        });
    }
}
