//! Error types for the Plan collection.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("Plan not found: {0}")]
    NotFound(String),

    #[error("Plan validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PlanError {
    fn from(msg: String) -> Self {
        PlanError::ActorCommunicationError(msg)
    }
}
