//! # Tableside
//!
//! Core of a multi-tenant restaurant ordering platform: orders move through
//! the preparation pipeline and are settled per table, and every session
//! resolves what its user is entitled to from profile, tenant and plan.
//!
//! - [`model`] - documents ([`Order`](model::Order), [`Tenant`](model::Tenant), ...)
//! - [`order_actor`], [`tenant_actor`], [`plan_actor`], [`profile_actor`] - one collection each
//! - [`clients`] - typed clients over the collections
//! - [`pipeline`] - table bills, revenue, sales summary, live bill board
//! - [`entitlements`] - the profile → tenant → plan resolver
//! - [`config`] - settings from the environment
//! - [`lifecycle`] - [`PlatformSystem`](lifecycle::PlatformSystem), which starts and stops everything

pub mod clients;
pub mod config;
pub mod entitlements;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pipeline;
pub mod plan_actor;
pub mod profile_actor;
pub mod tenant_actor;
