//! # Order Collection
//!
//! Orders move through the preparation pipeline by document actions only;
//! there is no free-form update and orders are never deleted by the
//! platform.
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](doc_framework::Document) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`], [`OrderActionResult`] and [`AdvanceOutcome`]
//! - [`new()`] - creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use tableside::clients::{OrderClient, TenantClient};
//! use tableside::model::{LineItem, OrderCreate, OrderStatus, SubscriptionStatus, TableRef, TenantCreate};
//! use tableside::order_actor::{self, ConcurrencyMode, OrderContext};
//! use tableside::tenant_actor;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (tenant_actor, tenants) = tenant_actor::new(8);
//!     let (order_actor, orders) = order_actor::new(8);
//!     let tenants = TenantClient::new(tenants);
//!     let orders = OrderClient::new(orders, ConcurrencyMode::LastWriteWins);
//!
//!     tokio::spawn(tenant_actor.run(()));
//!     tokio::spawn(order_actor.run(OrderContext::new(tenants.clone())));
//!
//!     let tenant = tenants
//!         .create_tenant(TenantCreate {
//!             business_name: "Corner Bistro".into(),
//!             plan_id: None,
//!             subscription_status: SubscriptionStatus::Active,
//!             billing_date: None,
//!         })
//!         .await?;
//!     let id = orders
//!         .place_order(OrderCreate {
//!             tenant_id: tenant,
//!             table: TableRef::new("T1"),
//!             items: vec![LineItem::new("soup", "Soup", 1, Decimal::new(650, 2))],
//!         })
//!         .await?;
//!     orders.advance_status(id, OrderStatus::Placed).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::model::Order;
use doc_framework::{CollectionActor, CollectionClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Order>, CollectionClient<Order>) {
    CollectionActor::new(buffer_size)
}
