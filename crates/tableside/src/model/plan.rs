//! A subscription tier sold to tenants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanId(pub u32);

impl From<u32> for PlanId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "plan_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    pub monthly_price: Decimal,
    /// Number of tables a tenant may configure. `0` means unlimited.
    pub table_quota: u32,
    /// Free-form feature tags. Unrecognized tags are carried but ignored.
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PlanCreate {
    pub name: String,
    pub monthly_price: Decimal,
    pub table_quota: u32,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub monthly_price: Option<Decimal>,
    pub table_quota: Option<u32>,
    pub features: Option<Vec<String>>,
}
