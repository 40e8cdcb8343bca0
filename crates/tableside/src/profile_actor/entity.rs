//! Document trait implementation for the UserProfile domain type.
//!
//! Profiles are never created through id allocation: the client inserts
//! them under the identity provider's uid.

use super::error::ProfileError;
use crate::clients::TenantClient;
use crate::model::{ProfileCreate, ProfileUpdate, Role, TenantId, UserId, UserProfile};
use async_trait::async_trait;
use doc_framework::{Document, DocumentClient};
use std::convert::Infallible;

/// Collections the profile hooks consult.
#[derive(Clone)]
pub struct ProfileContext {
    pub tenants: TenantClient,
}

impl ProfileContext {
    pub fn new(tenants: TenantClient) -> Self {
        Self { tenants }
    }
}

#[async_trait]
impl Document for UserProfile {
    type Id = UserId;
    type Create = ProfileCreate;
    type Update = ProfileUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ProfileContext;
    type Error = ProfileError;

    fn from_create_params(id: UserId, params: ProfileCreate) -> Result<Self, Self::Error> {
        let profile = Self {
            id,
            display_name: params.display_name,
            role: params.role,
            tenant_id: params.tenant_id,
        };
        profile.check_membership()?;
        Ok(profile)
    }

    async fn on_create(&mut self, ctx: &ProfileContext) -> Result<(), Self::Error> {
        ensure_tenant(self.tenant_id, ctx).await
    }

    async fn on_update(&mut self, update: ProfileUpdate, ctx: &ProfileContext) -> Result<(), Self::Error> {
        if let Some(name) = update.display_name {
            self.display_name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        let tenant_changed = update.tenant_id.is_some();
        if let Some(tenant_id) = update.tenant_id {
            self.tenant_id = tenant_id;
        }
        self.check_membership()?;
        if tenant_changed {
            ensure_tenant(self.tenant_id, ctx).await?;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &ProfileContext) -> Result<(), Self::Error> {
        match action {}
    }
}

impl UserProfile {
    /// Staff belong to one tenant; everyone else to none.
    fn check_membership(&self) -> Result<(), ProfileError> {
        match (self.role.is_staff(), self.tenant_id) {
            (true, None) => Err(ProfileError::ValidationError(format!(
                "{} profile {} needs a tenant",
                self.role, self.id
            ))),
            (false, Some(tenant)) => Err(ProfileError::ValidationError(format!(
                "{} profile {} cannot belong to {tenant}",
                self.role, self.id
            ))),
            _ => Ok(()),
        }
    }
}

async fn ensure_tenant(tenant_id: Option<TenantId>, ctx: &ProfileContext) -> Result<(), ProfileError> {
    let Some(tenant_id) = tenant_id else {
        return Ok(());
    };
    match ctx.tenants.get(tenant_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ProfileError::InvalidTenant(tenant_id.to_string())),
        Err(e) => Err(ProfileError::InvalidTenant(format!("{tenant_id}: {e}"))),
    }
}
