//! # Store Errors
//!
//! Errors raised by the collection runtime itself. Document-level failures
//! are carried inside [`StoreError::EntityError`] and mapped back to the
//! collection's own error type by its client.

/// Errors that can occur within the document framework.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Document already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// True when the collection could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
