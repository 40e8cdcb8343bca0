//! Error types for the Tenant collection.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TenantError {
    #[error("Tenant not found: {0}")]
    NotFound(String),

    #[error("Tenant validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TenantError {
    fn from(msg: String) -> Self {
        TenantError::ActorCommunicationError(msg)
    }
}
