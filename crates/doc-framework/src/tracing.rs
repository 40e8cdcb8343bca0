//! # Observability & Tracing
//!
//! Structured logging for every collection and client.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown with the final document count
//! - **Document operations**: Create, Insert, Get, Update, Delete, Action, Batch
//! - **Subscriptions**: Watch and Watch query registrations
//! - **Failures**: warnings with the document id and the hook error
//!
//! Log lines carry `entity_type` (e.g. `Order`, `Tenant`) instead of module
//! paths, so the subscriber is configured with `with_target(false)`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and commits
//! RUST_LOG=debug cargo run     # full request payloads
//! RUST_LOG=tableside=debug,doc_framework=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a settlement reads:
//!
//! ```text
//! INFO settle_table: Settling table table="T4" orders=3
//! INFO settle_table: Batch committed entity_type="Order" len=3 documents=3
//! ```

/// Installs the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
