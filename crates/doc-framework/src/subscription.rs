//! # Subscriptions & Queries
//!
//! A [`Subscription`] is the receiving end of a collection watcher. The actor
//! holds the sending half; dropping or cancelling the subscription closes the
//! channel and the actor prunes the watcher on its next pass.
//!
//! Subscriptions can be bound to a [`CancellationToken`]. Once the token is
//! cancelled, [`Subscription::next`] returns `None` even if notifications are
//! still queued, so no stale value is ever delivered after a teardown.

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Receiving end of a watch on one document or on a query.
#[derive(Debug)]
pub struct Subscription<V> {
    receiver: mpsc::UnboundedReceiver<V>,
    cancel: CancellationToken,
}

impl<V> Subscription<V> {
    /// Creates a connected feed/subscription pair.
    ///
    /// Used by the collection actor and by test doubles that need to script
    /// notifications by hand.
    pub fn channel() -> (mpsc::UnboundedSender<V>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let subscription = Self {
            receiver,
            cancel: CancellationToken::new(),
        };
        (sender, subscription)
    }

    /// Ties this subscription to an external token.
    pub fn bind(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Waits for the next notification.
    ///
    /// Returns `None` once the subscription is cancelled or the collection
    /// shut down.
    pub async fn next(&mut self) -> Option<V> {
        if self.cancel.is_cancelled() {
            self.receiver.close();
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                self.receiver.close();
                None
            }
            item = self.receiver.recv() => item,
        }
    }

    /// Stops the subscription. The actor drops its watcher on the next change
    /// or watcher count.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.receiver.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// A named predicate over documents, used by `watch_query`.
pub struct Query<T> {
    label: String,
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Query<T> {
    pub fn new(label: impl Into<String>, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Matches every document in the collection.
    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    pub fn matches(&self, doc: &T) -> bool {
        (self.predicate)(doc)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").field("label", &self.label).finish()
    }
}
