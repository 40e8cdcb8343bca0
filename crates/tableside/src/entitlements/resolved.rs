use crate::entitlements::capability::{CapabilitySet, Feature, TableQuota};
use crate::model::{Role, SubscriptionPlan, Tenant, TenantId, UserProfile};

/// Role, tenant and plan flattened into what the user may do.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntitlements {
    pub role: Role,
    pub is_platform_admin: bool,
    /// False when no profile document exists for the user.
    pub profile_found: bool,
    pub tenant: Option<Tenant>,
    pub plan: Option<SubscriptionPlan>,
    pub table_quota: TableQuota,
    pub capabilities: CapabilitySet,
}

impl ResolvedEntitlements {
    /// No profile, no tenant, no plan.
    pub fn restricted(default_quota: u32) -> Self {
        Self::flatten(None, None, None, default_quota)
    }

    /// Platform administrators manage tenants; they belong to none.
    pub fn platform_admin(default_quota: u32) -> Self {
        Self {
            role: Role::PlatformAdmin,
            is_platform_admin: true,
            profile_found: false,
            tenant: None,
            plan: None,
            table_quota: TableQuota::Limited(default_quota),
            capabilities: CapabilitySet::empty(),
        }
    }

    /// Flattens whatever part of the chain resolved.
    ///
    /// A plan only counts when it is the one the tenant references, and
    /// features and quota only apply while the tenant's subscription is
    /// active or trialing.
    pub fn flatten(
        profile: Option<&UserProfile>,
        tenant: Option<&Tenant>,
        plan: Option<&SubscriptionPlan>,
        default_quota: u32,
    ) -> Self {
        let role = profile.map(|p| p.role).unwrap_or(Role::Customer);
        let plan = plan.filter(|plan| tenant.is_some_and(|t| t.plan_id == Some(plan.id)));

        let (capabilities, table_quota) = match (tenant, plan) {
            (Some(tenant), Some(plan)) if tenant.is_entitled() => (
                CapabilitySet::from_tags(plan.features.iter().map(String::as_str)),
                TableQuota::from_plan(plan.table_quota),
            ),
            _ => (CapabilitySet::empty(), TableQuota::Limited(default_quota)),
        };

        Self {
            role,
            is_platform_admin: role == Role::PlatformAdmin,
            profile_found: profile.is_some(),
            tenant: tenant.cloned(),
            plan: plan.cloned(),
            table_quota,
            capabilities,
        }
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant.as_ref().map(|t| t.id)
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.capabilities.contains(feature)
    }

    pub fn has_analytics(&self) -> bool {
        self.has(Feature::Analytics)
    }

    pub fn has_ai_menu_suggestions(&self) -> bool {
        self.has(Feature::AiMenuSuggestions)
    }

    pub fn has_ai_sales_summary(&self) -> bool {
        self.has(Feature::AiSalesSummary)
    }

    pub fn has_kitchen_display(&self) -> bool {
        self.has(Feature::KitchenDisplay)
    }

    pub fn has_custom_branding(&self) -> bool {
        self.has(Feature::CustomBranding)
    }

    pub fn has_priority_support(&self) -> bool {
        self.has(Feature::PrioritySupport)
    }

    /// Whether the tenant may configure `tables` tables.
    pub fn allows_tables(&self, tables: u32) -> bool {
        self.table_quota.allows(tables)
    }
}
