//! # Documents
//!
//! Plain data for every stored record kind. Each type implements
//! [`Document`](doc_framework::Document) in its collection's `entity` module.

pub mod credential;
pub mod order;
pub mod plan;
pub mod profile;
pub mod tenant;

pub use credential::*;
pub use order::*;
pub use plan::*;
pub use profile::*;
pub use tenant::*;
