//! The profile → tenant → plan listener chain.
//!
//! Every stage owns a [`CancellationToken`]; the tenant token is a child of
//! the profile token and the plan token a child of the tenant token, all
//! under one session root. Tearing a stage down cancels its token, which
//! silences its subscription at once, even if notifications are still
//! queued.

use crate::clients::{PlanClient, ProfileClient, TenantClient};
use crate::entitlements::resolved::ResolvedEntitlements;
use crate::model::{AuthCredential, SubscriptionPlan, Tenant, UserId, UserProfile};
use doc_framework::{DocumentClient, Subscription};
use std::fmt::Display;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Starts entitlement sessions against the profile, tenant and plan
/// collections.
#[derive(Clone)]
pub struct EntitlementResolver {
    profiles: ProfileClient,
    tenants: TenantClient,
    plans: PlanClient,
    default_quota: u32,
}

impl EntitlementResolver {
    pub fn new(profiles: ProfileClient, tenants: TenantClient, plans: PlanClient, default_quota: u32) -> Self {
        Self {
            profiles,
            tenants,
            plans,
            default_quota,
        }
    }

    /// Resolves the chain for `credential` and keeps it live.
    ///
    /// Returns once the first value is known. Lookup failures never surface
    /// as errors: a stage that cannot be resolved is treated as absent.
    pub async fn start(&self, credential: AuthCredential) -> EntitlementHandle {
        let root = CancellationToken::new();

        if credential.is_platform_admin() {
            info!(uid = %credential.uid, "Platform admin session, skipping profile chain");
            let (_, receiver) = watch::channel(ResolvedEntitlements::platform_admin(self.default_quota));
            return EntitlementHandle {
                receiver,
                root,
                task: None,
            };
        }

        let mut chain = Chain {
            uid: credential.uid,
            profiles: self.profiles.clone(),
            tenants: self.tenants.clone(),
            plans: self.plans.clone(),
            default_quota: self.default_quota,
            profile_token: root.child_token(),
            root: root.clone(),
            profile: None,
            tenant: None,
            plan: None,
            profile_stage: None,
            tenant_stage: None,
            plan_stage: None,
        };
        chain.resolve_profile().await;
        let (sender, receiver) = watch::channel(chain.flatten());
        let task = tokio::spawn(chain.run(sender));

        EntitlementHandle {
            receiver,
            root,
            task: Some(task),
        }
    }
}

/// A live entitlement session.
///
/// Dropping the handle stops every listener of the session.
pub struct EntitlementHandle {
    receiver: watch::Receiver<ResolvedEntitlements>,
    root: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl EntitlementHandle {
    pub fn current(&self) -> ResolvedEntitlements {
        (*self.receiver.borrow()).clone()
    }

    /// Waits for the next distinct value. `None` once the session ended.
    pub async fn changed(&mut self) -> Option<ResolvedEntitlements> {
        self.receiver.changed().await.ok()?;
        Some((*self.receiver.borrow_and_update()).clone())
    }

    /// Waits until the value satisfies `predicate`.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&ResolvedEntitlements) -> bool,
    ) -> Option<ResolvedEntitlements> {
        self.receiver
            .wait_for(predicate)
            .await
            .ok()
            .map(|value| (*value).clone())
    }

    /// Another receiver of the same session.
    pub fn subscribe(&self) -> watch::Receiver<ResolvedEntitlements> {
        self.receiver.clone()
    }

    /// Cancels every stage and waits for the session task to finish.
    pub async fn shutdown(mut self) {
        self.root.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for EntitlementHandle {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// One live listener.
struct Stage<V> {
    token: CancellationToken,
    subscription: Subscription<Option<V>>,
}

impl<V> Stage<V> {
    fn teardown(self) {
        self.token.cancel();
    }
}

struct Chain {
    uid: UserId,
    profiles: ProfileClient,
    tenants: TenantClient,
    plans: PlanClient,
    default_quota: u32,
    root: CancellationToken,
    profile_token: CancellationToken,
    profile: Option<UserProfile>,
    tenant: Option<Tenant>,
    plan: Option<SubscriptionPlan>,
    profile_stage: Option<Stage<UserProfile>>,
    tenant_stage: Option<Stage<Tenant>>,
    plan_stage: Option<Stage<SubscriptionPlan>>,
}

impl Chain {
    async fn run(mut self, sender: watch::Sender<ResolvedEntitlements>) {
        info!(uid = %self.uid, "Entitlement session started");
        loop {
            tokio::select! {
                biased;
                _ = self.root.cancelled() => break,
                change = next_change(&mut self.profile_stage) => {
                    debug!(uid = %self.uid, "Profile changed");
                    if change.is_none() {
                        self.profile_stage = None;
                    }
                    self.profile = change.flatten();
                    self.resolve_tenant().await;
                }
                change = next_change(&mut self.tenant_stage) => {
                    debug!(uid = %self.uid, "Tenant changed");
                    if change.is_none() {
                        self.tenant_stage = None;
                    }
                    self.tenant = change.flatten();
                    self.resolve_plan().await;
                }
                change = next_change(&mut self.plan_stage) => {
                    debug!(uid = %self.uid, "Plan changed");
                    if change.is_none() {
                        self.plan_stage = None;
                    }
                    self.plan = change.flatten();
                }
            }
            self.publish(&sender);
        }
        self.teardown_tenant();
        if let Some(stage) = self.profile_stage.take() {
            stage.teardown();
        }
        info!(uid = %self.uid, "Entitlement session stopped");
    }

    fn flatten(&self) -> ResolvedEntitlements {
        ResolvedEntitlements::flatten(
            self.profile.as_ref(),
            self.tenant.as_ref(),
            self.plan.as_ref(),
            self.default_quota,
        )
    }

    fn publish(&self, sender: &watch::Sender<ResolvedEntitlements>) {
        if self.root.is_cancelled() {
            return;
        }
        let next = self.flatten();
        sender.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    async fn resolve_profile(&mut self) {
        let watched = self.profiles.watch(self.uid.clone()).await;
        let (profile, stage) = attach(watched, self.profile_token.clone(), "profile").await;
        self.profile = profile;
        self.profile_stage = stage;
        self.resolve_tenant().await;
    }

    /// Replaces the tenant and plan listeners.
    async fn resolve_tenant(&mut self) {
        self.teardown_tenant();
        let Some(tenant_id) = self.profile.as_ref().and_then(|p| p.tenant_id) else {
            return;
        };
        let watched = self.tenants.watch(tenant_id).await;
        let token = self.profile_token.child_token();
        let (tenant, stage) = attach(watched, token, "tenant").await;
        self.tenant = tenant;
        self.tenant_stage = stage;
        self.resolve_plan().await;
    }

    /// Replaces the plan listener.
    async fn resolve_plan(&mut self) {
        self.teardown_plan();
        let Some(plan_id) = self.tenant.as_ref().and_then(|t| t.plan_id) else {
            return;
        };
        let Some(parent) = self.tenant_stage.as_ref().map(|s| s.token.clone()) else {
            return;
        };
        let watched = self.plans.watch(plan_id).await;
        let (plan, stage) = attach(watched, parent.child_token(), "plan").await;
        self.plan = plan;
        self.plan_stage = stage;
    }

    fn teardown_plan(&mut self) {
        if let Some(stage) = self.plan_stage.take() {
            stage.teardown();
        }
        self.plan = None;
    }

    /// Leaf first: the plan goes before the tenant.
    fn teardown_tenant(&mut self) {
        self.teardown_plan();
        if let Some(stage) = self.tenant_stage.take() {
            stage.teardown();
        }
        self.tenant = None;
    }
}

/// Binds a fresh subscription to `token` and takes its first snapshot.
async fn attach<V, E: Display>(
    watched: Result<Subscription<Option<V>>, E>,
    token: CancellationToken,
    stage: &'static str,
) -> (Option<V>, Option<Stage<V>>) {
    match watched {
        Ok(subscription) => {
            let mut subscription = subscription.bind(token.clone());
            match subscription.next().await {
                Some(value) => (value, Some(Stage { token, subscription })),
                None => {
                    warn!(stage, "Listener closed before its first snapshot");
                    token.cancel();
                    (None, None)
                }
            }
        }
        Err(e) => {
            warn!(stage, error = %e, "Listener unavailable, treating as absent");
            token.cancel();
            (None, None)
        }
    }
}

/// Next notification of a stage; pending forever when there is none.
///
/// `None` means the listener ended.
async fn next_change<V>(stage: &mut Option<Stage<V>>) -> Option<Option<V>> {
    match stage {
        Some(stage) => stage.subscription.next().await,
        None => std::future::pending().await,
    }
}
