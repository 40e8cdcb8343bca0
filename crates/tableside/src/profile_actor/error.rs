//! Error types for the Profile collection.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    #[error("Profile validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProfileError {
    fn from(msg: String) -> Self {
        ProfileError::ActorCommunicationError(msg)
    }
}
