//! # Tenant Client

use crate::clients::recover;
use crate::model::{PlanId, SubscriptionStatus, Tenant, TenantCreate, TenantId, TenantUpdate};
use crate::tenant_actor::TenantError;
use async_trait::async_trait;
use doc_framework::{CollectionClient, DocumentClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct TenantClient {
    inner: CollectionClient<Tenant>,
}

impl TenantClient {
    pub fn new(inner: CollectionClient<Tenant>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_tenant(&self, params: TenantCreate) -> Result<TenantId, TenantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_tenant(&self, id: TenantId, update: TenantUpdate) -> Result<Tenant, TenantError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn set_subscription_status(
        &self,
        id: TenantId,
        status: SubscriptionStatus,
    ) -> Result<Tenant, TenantError> {
        self.update_tenant(
            id,
            TenantUpdate {
                subscription_status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    /// `None` detaches the tenant from its plan.
    pub async fn assign_plan(&self, id: TenantId, plan_id: Option<PlanId>) -> Result<Tenant, TenantError> {
        self.update_tenant(
            id,
            TenantUpdate {
                plan_id: Some(plan_id),
                ..Default::default()
            },
        )
        .await
    }
}

#[async_trait]
impl DocumentClient<Tenant> for TenantClient {
    type Error = TenantError;

    fn inner(&self) -> &CollectionClient<Tenant> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        recover(e, |e| match e {
            StoreError::NotFound(id) => TenantError::NotFound(id),
            e => TenantError::ActorCommunicationError(e.to_string()),
        })
    }
}
