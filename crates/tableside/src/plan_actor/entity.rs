//! Document trait implementation for the SubscriptionPlan domain type.

use super::error::PlanError;
use crate::model::{PlanCreate, PlanId, PlanUpdate, SubscriptionPlan};
use async_trait::async_trait;
use doc_framework::Document;
use rust_decimal::Decimal;
use std::convert::Infallible;

#[async_trait]
impl Document for SubscriptionPlan {
    type Id = PlanId;
    type Create = PlanCreate;
    type Update = PlanUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = PlanError;

    fn from_create_params(id: PlanId, params: PlanCreate) -> Result<Self, Self::Error> {
        check_name(&params.name)?;
        check_price(params.monthly_price)?;
        Ok(Self {
            id,
            name: params.name,
            monthly_price: params.monthly_price,
            table_quota: params.table_quota,
            features: params.features,
        })
    }

    async fn on_update(&mut self, update: PlanUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            check_name(&name)?;
            self.name = name;
        }
        if let Some(price) = update.monthly_price {
            check_price(price)?;
            self.monthly_price = price;
        }
        if let Some(quota) = update.table_quota {
            self.table_quota = quota;
        }
        if let Some(features) = update.features {
            self.features = features;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

fn check_name(name: &str) -> Result<(), PlanError> {
    if name.trim().is_empty() {
        return Err(PlanError::ValidationError("plan name is empty".into()));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), PlanError> {
    if price.is_sign_negative() {
        return Err(PlanError::ValidationError(format!("negative monthly price {price}")));
    }
    Ok(())
}
