//! What the identity provider asserts about a signed-in user.

use crate::model::{Role, TenantId, UserId};
use serde::{Deserialize, Serialize};

/// Claims carried by an authenticated session.
///
/// Role and tenant claims are hints only; the profile document is
/// authoritative. `platform_admin` is the one claim trusted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthCredential {
    pub uid: UserId,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    #[serde(default)]
    pub platform_admin: bool,
}

impl AuthCredential {
    pub fn user(uid: impl Into<UserId>) -> Self {
        Self {
            uid: uid.into(),
            role: None,
            tenant_id: None,
            platform_admin: false,
        }
    }

    pub fn platform_admin(uid: impl Into<UserId>) -> Self {
        Self {
            platform_admin: true,
            role: Some(Role::PlatformAdmin),
            ..Self::user(uid)
        }
    }

    /// True for the admin flag or an explicit platform_admin role claim.
    pub fn is_platform_admin(&self) -> bool {
        self.platform_admin || self.role == Some(Role::PlatformAdmin)
    }
}
