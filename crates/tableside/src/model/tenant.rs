//! A restaurant business on the platform.

use crate::model::PlanId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TenantId(pub u32);

impl From<u32> for TenantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tenant_{}", self.0)
    }
}

/// Billing state of a tenant's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    Overdue,
    Canceled,
}

impl SubscriptionStatus {
    /// Only active and trialing subscriptions unlock plan features.
    pub fn is_entitled(self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub business_name: String,
    #[serde(default)]
    pub plan_id: Option<PlanId>,
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub billing_date: Option<NaiveDate>,
}

impl Tenant {
    pub fn is_entitled(&self) -> bool {
        self.subscription_status.is_entitled()
    }
}

#[derive(Debug, Clone)]
pub struct TenantCreate {
    pub business_name: String,
    pub plan_id: Option<PlanId>,
    pub subscription_status: SubscriptionStatus,
    pub billing_date: Option<NaiveDate>,
}

/// Partial update; `None` leaves a field untouched.
///
/// `plan_id: Some(None)` detaches the tenant from its plan.
#[derive(Debug, Clone, Default)]
pub struct TenantUpdate {
    pub business_name: Option<String>,
    pub plan_id: Option<Option<PlanId>>,
    pub subscription_status: Option<SubscriptionStatus>,
    pub billing_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entitled_statuses() {
        assert!(SubscriptionStatus::Active.is_entitled());
        assert!(SubscriptionStatus::Trialing.is_entitled());
        assert!(!SubscriptionStatus::Overdue.is_entitled());
        assert!(!SubscriptionStatus::Canceled.is_entitled());
    }

    #[test]
    fn test_tenant_document_shape() {
        let tenant: Tenant = serde_json::from_str(
            r#"{"id":2,"business_name":"Blue Door Cafe","subscription_status":"overdue"}"#,
        )
        .unwrap();
        assert_eq!(tenant.plan_id, None);
        assert_eq!(tenant.subscription_status, SubscriptionStatus::Overdue);
        assert!(!tenant.is_entitled());
    }
}
