//! Error types for the Order collection.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The tenant on the order does not exist.
    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    /// Settlement touched an order that is no longer open.
    #[error("Order {id} is not open (status {status})")]
    NotOpen { id: String, status: OrderStatus },

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
