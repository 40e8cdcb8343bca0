use doc_framework::DocumentClient;
use rust_decimal::Decimal;
use tableside::config::PlatformConfig;
use tableside::entitlements::{Feature, TableQuota};
use tableside::lifecycle::PlatformSystem;
use tableside::model::{
    AuthCredential, PlanCreate, PlanId, ProfileCreate, ProfileUpdate, Role, SubscriptionStatus, TenantCreate,
    TenantId, TenantUpdate, UserId,
};

struct Fixture {
    system: PlatformSystem,
    plan_id: PlanId,
    tenant_id: TenantId,
    uid: UserId,
}

async fn plan(system: &PlatformSystem, name: &str, table_quota: u32, features: &[&str]) -> PlanId {
    system
        .plan_client
        .create_plan(PlanCreate {
            name: name.into(),
            monthly_price: Decimal::new(4900, 2),
            table_quota,
            features: features.iter().map(|f| f.to_string()).collect(),
        })
        .await
        .expect("Failed to create plan")
}

/// A barista at a tenant on the "Pro" plan.
async fn fixture(status: SubscriptionStatus) -> Fixture {
    let system = PlatformSystem::new(PlatformConfig::default());
    let plan_id = plan(&system, "Pro", 10, &["Analytics", "Kitchen Display", "Loyalty Points"]).await;
    let tenant_id = system
        .tenant_client
        .create_tenant(TenantCreate {
            business_name: "Corner Bistro".into(),
            plan_id: Some(plan_id),
            subscription_status: status,
            billing_date: None,
        })
        .await
        .expect("Failed to create tenant");
    let uid = UserId::from("barista-1");
    system
        .profile_client
        .create_profile(
            uid.clone(),
            ProfileCreate {
                display_name: "Robin".into(),
                role: Role::Barista,
                tenant_id: Some(tenant_id),
            },
        )
        .await
        .expect("Failed to create profile");
    Fixture {
        system,
        plan_id,
        tenant_id,
        uid,
    }
}

async fn listener_counts(system: &PlatformSystem) -> (usize, usize, usize) {
    (
        system.profile_client.inner().watcher_count().await.unwrap(),
        system.tenant_client.inner().watcher_count().await.unwrap(),
        system.plan_client.inner().watcher_count().await.unwrap(),
    )
}

#[tokio::test]
async fn test_active_tenant_resolves_plan_features() {
    let f = fixture(SubscriptionStatus::Active).await;
    let session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;

    let value = session.current();
    assert_eq!(value.role, Role::Barista);
    assert!(value.profile_found);
    assert_eq!(value.tenant_id(), Some(f.tenant_id));
    assert_eq!(value.plan.as_ref().map(|p| p.id), Some(f.plan_id));
    assert!(value.has_analytics());
    assert!(value.has_kitchen_display());
    assert!(!value.has_ai_menu_suggestions());
    assert_eq!(value.capabilities.len(), 2);
    assert_eq!(value.table_quota, TableQuota::Limited(10));
    assert!(value.allows_tables(10));
    assert!(!value.allows_tables(11));
    assert_eq!(listener_counts(&f.system).await, (1, 1, 1));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_overdue_tenant_gets_no_features() {
    let f = fixture(SubscriptionStatus::Overdue).await;
    let session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;

    let value = session.current();
    assert!(!value.has_analytics());
    assert!(value.capabilities.is_empty());
    assert_eq!(value.table_quota, TableQuota::Limited(3));
    assert!(value.tenant.is_some());

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_platform_admin_short_circuits() {
    let f = fixture(SubscriptionStatus::Active).await;
    let credential = AuthCredential {
        tenant_id: Some(f.tenant_id),
        ..AuthCredential::platform_admin("ops-1")
    };
    let session = f.system.entitlements().start(credential).await;

    let value = session.current();
    assert_eq!(value.role, Role::PlatformAdmin);
    assert!(value.is_platform_admin);
    assert!(value.tenant.is_none());
    assert!(value.plan.is_none());
    assert_eq!(listener_counts(&f.system).await, (0, 0, 0));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_user_is_restricted_customer() {
    let f = fixture(SubscriptionStatus::Active).await;
    let session = f.system.entitlements().start(AuthCredential::user("stranger")).await;

    let value = session.current();
    assert_eq!(value.role, Role::Customer);
    assert!(!value.profile_found);
    assert!(value.tenant.is_none());
    assert!(value.capabilities.is_empty());
    // Only the profile listener exists, waiting for the profile to appear.
    assert_eq!(listener_counts(&f.system).await, (1, 0, 0));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_tenant_deleted_before_lookup() {
    let f = fixture(SubscriptionStatus::Active).await;
    f.system.tenant_client.delete(f.tenant_id).await.unwrap();

    let session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;
    let value = session.current();
    assert_eq!(value.role, Role::Barista);
    assert!(value.tenant.is_none());
    assert!(value.plan.is_none());
    assert!(value.capabilities.is_empty());
    assert_eq!(value.table_quota, TableQuota::Limited(3));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_live_tenant_deletion_drops_plan() {
    let f = fixture(SubscriptionStatus::Active).await;
    let mut session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;
    assert!(session.current().has_analytics());

    f.system.tenant_client.delete(f.tenant_id).await.unwrap();
    let value = session.wait_for(|v| v.tenant.is_none()).await.unwrap();
    assert!(value.plan.is_none());
    assert!(!value.has_analytics());
    assert_eq!(listener_counts(&f.system).await, (1, 1, 0));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscription_lapse_and_plan_change_propagate() {
    let f = fixture(SubscriptionStatus::Active).await;
    let mut session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;

    f.system
        .tenant_client
        .set_subscription_status(f.tenant_id, SubscriptionStatus::Overdue)
        .await
        .unwrap();
    let value = session.wait_for(|v| !v.has_analytics()).await.unwrap();
    assert_eq!(value.table_quota, TableQuota::Limited(3));

    let enterprise = plan(&f.system, "Enterprise", 0, &["Analytics", "AI Menu Suggestions"]).await;
    f.system
        .tenant_client
        .update_tenant(
            f.tenant_id,
            TenantUpdate {
                plan_id: Some(Some(enterprise)),
                subscription_status: Some(SubscriptionStatus::Trialing),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let value = session
        .wait_for(|v| v.plan.as_ref().is_some_and(|p| p.id == enterprise))
        .await
        .unwrap();
    assert!(value.has(Feature::AiMenuSuggestions));
    assert!(!value.has_kitchen_display());
    assert_eq!(value.table_quota, TableQuota::Unlimited);

    f.system
        .plan_client
        .update_plan(
            enterprise,
            tableside::model::PlanUpdate {
                features: Some(vec!["Custom Branding".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let value = session.wait_for(|v| v.has_custom_branding()).await.unwrap();
    assert!(!value.has_analytics());

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_repeated_tenant_updates_do_not_leak_listeners() {
    let f = fixture(SubscriptionStatus::Active).await;
    let mut session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;

    for round in 1..=5 {
        f.system
            .tenant_client
            .update_tenant(
                f.tenant_id,
                TenantUpdate {
                    business_name: Some(format!("Corner Bistro {round}")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
    let value = session
        .wait_for(|v| v.tenant.as_ref().is_some_and(|t| t.business_name == "Corner Bistro 5"))
        .await
        .unwrap();
    assert!(value.has_analytics());
    assert_eq!(listener_counts(&f.system).await, (1, 1, 1));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_profile_change_rebuilds_downstream_only() {
    let f = fixture(SubscriptionStatus::Active).await;
    let mut session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;

    f.system
        .profile_client
        .update_profile(
            f.uid.clone(),
            ProfileUpdate {
                role: Some(Role::Manager),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let value = session.wait_for(|v| v.role == Role::Manager).await.unwrap();
    assert!(value.has_analytics());
    assert_eq!(listener_counts(&f.system).await, (1, 1, 1));

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_moving_to_another_tenant_follows_its_plan() {
    let f = fixture(SubscriptionStatus::Active).await;
    let mut session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;
    assert!(session.current().has_kitchen_display());

    let enterprise = plan(&f.system, "Enterprise", 0, &["Analytics", "AI Menu Suggestions"]).await;
    let harbor = f
        .system
        .tenant_client
        .create_tenant(TenantCreate {
            business_name: "Harbor Cafe".into(),
            plan_id: Some(enterprise),
            subscription_status: SubscriptionStatus::Active,
            billing_date: None,
        })
        .await
        .expect("Failed to create tenant");

    f.system
        .profile_client
        .update_profile(
            f.uid.clone(),
            ProfileUpdate {
                tenant_id: Some(Some(harbor)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let value = session.wait_for(|v| v.tenant_id() == Some(harbor)).await.unwrap();
    assert_eq!(value.plan.as_ref().map(|p| p.id), Some(enterprise));
    assert!(value.has_ai_menu_suggestions());
    assert!(!value.has_kitchen_display());
    assert_eq!(value.table_quota, TableQuota::Unlimited);
    // The old tenant and plan listeners are gone.
    assert_eq!(listener_counts(&f.system).await, (1, 1, 1));

    // Changes to the old tenant and plan no longer reach the session.
    f.system
        .tenant_client
        .set_subscription_status(f.tenant_id, SubscriptionStatus::Canceled)
        .await
        .unwrap();
    f.system
        .plan_client
        .update_plan(
            f.plan_id,
            tableside::model::PlanUpdate {
                features: Some(vec!["Custom Branding".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    f.system
        .tenant_client
        .update_tenant(
            harbor,
            TenantUpdate {
                business_name: Some("Harbor Cafe & Bar".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let value = session
        .wait_for(|v| v.tenant.as_ref().is_some_and(|t| t.business_name == "Harbor Cafe & Bar"))
        .await
        .unwrap();
    assert_eq!(value.tenant_id(), Some(harbor));
    assert!(value.has_analytics());
    assert!(!value.has_custom_branding());

    session.shutdown().await;
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_releases_listeners_and_stops_publishing() {
    let f = fixture(SubscriptionStatus::Active).await;
    let session = f.system.entitlements().start(AuthCredential::user(f.uid.clone())).await;
    let mut receiver = session.subscribe();
    assert_eq!(listener_counts(&f.system).await, (1, 1, 1));

    session.shutdown().await;
    assert_eq!(listener_counts(&f.system).await, (0, 0, 0));

    f.system
        .tenant_client
        .set_subscription_status(f.tenant_id, SubscriptionStatus::Canceled)
        .await
        .unwrap();
    assert!(receiver.changed().await.is_err());
    assert!(receiver.borrow().has_analytics());

    f.system.shutdown().await.unwrap();
}
