//! # Entitlements
//!
//! Resolves what a signed-in user may do by following references:
//!
//! ```text
//! credential ──> profile ──> tenant ──> plan
//!                  role      status     features, table quota
//! ```
//!
//! Each arrow is a live listener. When a document changes, every listener
//! downstream of it is torn down (leaf first) and re-established against the
//! new reference; listeners upstream are left alone. The flattened result is
//! published as [`ResolvedEntitlements`].
//!
//! - [`capability`] - [`Feature`], [`CapabilitySet`], [`TableQuota`]
//! - [`resolved`] - the flattened output
//! - [`resolver`] - the listener chain and its session handle

pub mod capability;
pub mod resolved;
pub mod resolver;

pub use capability::*;
pub use resolved::*;
pub use resolver::*;
