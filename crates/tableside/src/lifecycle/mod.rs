//! # System Lifecycle & Orchestration
//!
//! [`PlatformSystem`] creates the four collections, wires their
//! dependencies and shuts them down again.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when started:
//!
//! | Collection | Context |
//! |------------|---------|
//! | tenants | `()` |
//! | plans | `()` |
//! | profiles | [`ProfileContext`] (tenant client) |
//! | orders | [`OrderContext`] (tenant client) |
//!
//! The dependency graph is acyclic, so dropping every client is enough to
//! stop every actor: orders and profiles stop first and release their
//! tenant clients, then tenants stop.
//!
//! ## Graceful Shutdown
//!
//! Sessions ([`EntitlementHandle`](crate::entitlements::EntitlementHandle))
//! and [`BillBoard`]s hold clients of their own. Shut them down before
//! calling [`PlatformSystem::shutdown`], which otherwise waits for them.

use crate::clients::{OrderClient, PlanClient, ProfileClient, TenantClient};
use crate::config::PlatformConfig;
use crate::entitlements::EntitlementResolver;
use crate::model::TenantId;
use crate::order_actor::{self, OrderContext, OrderError};
use crate::pipeline::BillBoard;
use crate::profile_actor::{self, ProfileContext};
use crate::{plan_actor, tenant_actor};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Collection {collection} failed to stop: {reason}")]
    ActorPanicked {
        collection: &'static str,
        reason: String,
    },
}

/// The running platform core.
pub struct PlatformSystem {
    pub config: PlatformConfig,
    pub order_client: OrderClient,
    pub tenant_client: TenantClient,
    pub plan_client: PlanClient,
    pub profile_client: ProfileClient,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl PlatformSystem {
    /// Starts every collection. Must be called inside a Tokio runtime.
    pub fn new(config: PlatformConfig) -> Self {
        let buffer = config.channel_buffer;
        let (tenant_actor, tenants) = tenant_actor::new(buffer);
        let (plan_actor, plans) = plan_actor::new(buffer);
        let (profile_actor, profiles) = profile_actor::new(buffer);
        let (order_actor, orders) = order_actor::new(buffer);

        let tenant_client = TenantClient::new(tenants);
        let plan_client = PlanClient::new(plans);
        let profile_client = ProfileClient::new(profiles);
        let order_client = OrderClient::new(orders, config.order_concurrency);

        let handles = vec![
            ("orders", tokio::spawn(order_actor.run(OrderContext::new(tenant_client.clone())))),
            ("profiles", tokio::spawn(profile_actor.run(ProfileContext::new(tenant_client.clone())))),
            ("plans", tokio::spawn(plan_actor.run(()))),
            ("tenants", tokio::spawn(tenant_actor.run(()))),
        ];
        info!(?config, "Platform started");

        Self {
            config,
            order_client,
            tenant_client,
            plan_client,
            profile_client,
            handles,
        }
    }

    /// A resolver for entitlement sessions.
    pub fn entitlements(&self) -> EntitlementResolver {
        EntitlementResolver::new(
            self.profile_client.clone(),
            self.tenant_client.clone(),
            self.plan_client.clone(),
            self.config.default_table_quota,
        )
    }

    /// Live open bills of one tenant.
    pub async fn bill_board(&self, tenant_id: TenantId) -> Result<BillBoard, OrderError> {
        BillBoard::start(&self.order_client, tenant_id).await
    }

    /// Drops the clients and waits for every collection to stop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        let Self {
            order_client,
            tenant_client,
            plan_client,
            profile_client,
            handles,
            ..
        } = self;
        drop(order_client);
        drop(profile_client);
        drop(plan_client);
        drop(tenant_client);

        for (collection, handle) in handles {
            handle.await.map_err(|e| LifecycleError::ActorPanicked {
                collection,
                reason: e.to_string(),
            })?;
        }
        info!("Platform stopped");
        Ok(())
    }
}
