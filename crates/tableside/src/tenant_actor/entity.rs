//! Document trait implementation for the Tenant domain type.

use super::error::TenantError;
use crate::model::{Tenant, TenantCreate, TenantId, TenantUpdate};
use async_trait::async_trait;
use doc_framework::Document;
use std::convert::Infallible;

#[async_trait]
impl Document for Tenant {
    type Id = TenantId;
    type Create = TenantCreate;
    type Update = TenantUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = TenantError;

    fn from_create_params(id: TenantId, params: TenantCreate) -> Result<Self, Self::Error> {
        let business_name = validated_name(params.business_name)?;
        Ok(Self {
            id,
            business_name,
            plan_id: params.plan_id,
            subscription_status: params.subscription_status,
            billing_date: params.billing_date,
        })
    }

    /// Handles updates to the Tenant document.
    ///
    /// # Fields Updated
    /// - `business_name`: must not be blank
    /// - `plan_id`: `Some(None)` detaches the plan
    /// - `subscription_status`
    /// - `billing_date`
    async fn on_update(&mut self, update: TenantUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.business_name {
            self.business_name = validated_name(name)?;
        }
        if let Some(plan_id) = update.plan_id {
            self.plan_id = plan_id;
        }
        if let Some(status) = update.subscription_status {
            self.subscription_status = status;
        }
        if let Some(date) = update.billing_date {
            self.billing_date = Some(date);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

fn validated_name(name: String) -> Result<String, TenantError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TenantError::ValidationError("business name is empty".into()));
    }
    Ok(trimmed.to_string())
}
