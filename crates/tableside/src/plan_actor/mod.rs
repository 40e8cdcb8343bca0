//! # Plan Collection
//!
//! Subscription tiers. Managed by platform administrators; read by the
//! entitlement resolver.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::SubscriptionPlan;
use doc_framework::{CollectionActor, CollectionClient};

/// Creates a new Plan actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<SubscriptionPlan>, CollectionClient<SubscriptionPlan>) {
    CollectionActor::new(buffer_size)
}
