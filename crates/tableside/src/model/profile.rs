//! Per-user profile: role and tenant membership.

use crate::model::TenantId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identity-provider user id. Profiles are stored under the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(format!("user_{id}"))
    }
}

impl From<&str> for UserId {
    fn from(uid: &str) -> Self {
        Self(uid.to_string())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Barista,
    Service,
    Cashier,
    Customer,
    PlatformAdmin,
}

impl Role {
    /// Roles that belong to exactly one tenant's staff.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Manager | Role::Barista | Role::Service | Role::Cashier)
    }

    pub fn can_advance_orders(self) -> bool {
        matches!(self, Role::Manager | Role::Barista | Role::Service)
    }

    pub fn can_settle_bills(self) -> bool {
        matches!(self, Role::Manager | Role::Cashier | Role::Service)
    }

    /// Menus, tables and QR codes.
    pub fn can_configure(self) -> bool {
        self == Role::Manager
    }

    pub fn can_manage_tenants(self) -> bool {
        self == Role::PlatformAdmin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Barista => "barista",
            Role::Service => "service",
            Role::Cashier => "cashier",
            Role::Customer => "customer",
            Role::PlatformAdmin => "platform_admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
    /// Absent for customers and platform admins.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
}

#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub display_name: String,
    pub role: Role,
    pub tenant_id: Option<TenantId>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub tenant_id: Option<Option<TenantId>>,
}
