//! # Profile Collection
//!
//! User profiles, stored under the identity provider's user id. Staff
//! profiles must reference an existing tenant; customer and platform-admin
//! profiles must not reference one.

pub mod entity;
pub mod error;

pub use entity::ProfileContext;
pub use error::*;

use crate::model::UserProfile;
use doc_framework::{CollectionActor, CollectionClient};

/// Creates a new Profile actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<UserProfile>, CollectionClient<UserProfile>) {
    CollectionActor::new(buffer_size)
}
