//! # Plan Client

use crate::clients::recover;
use crate::model::{PlanCreate, PlanId, PlanUpdate, SubscriptionPlan};
use crate::plan_actor::PlanError;
use async_trait::async_trait;
use doc_framework::{CollectionClient, DocumentClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PlanClient {
    inner: CollectionClient<SubscriptionPlan>,
}

impl PlanClient {
    pub fn new(inner: CollectionClient<SubscriptionPlan>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_plan(&self, params: PlanCreate) -> Result<PlanId, PlanError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_plan(&self, id: PlanId, update: PlanUpdate) -> Result<SubscriptionPlan, PlanError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl DocumentClient<SubscriptionPlan> for PlanClient {
    type Error = PlanError;

    fn inner(&self) -> &CollectionClient<SubscriptionPlan> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        recover(e, |e| match e {
            StoreError::NotFound(id) => PlanError::NotFound(id),
            e => PlanError::ActorCommunicationError(e.to_string()),
        })
    }
}
