//! # Order Pipeline Views
//!
//! Aggregates derived from a snapshot of orders. Nothing here is stored;
//! every view is recomputed from the latest snapshot a subscription
//! delivers.
//!
//! - [`bills`] - per-table bills, occupied tables, revenue
//! - [`summary`] - sales summary for reporting
//! - [`board`] - a live, continuously recomputed set of table bills

pub mod bills;
pub mod board;
pub mod summary;

pub use bills::*;
pub use board::*;
pub use summary::*;
