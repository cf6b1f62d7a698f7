//! The workspace and compute discovery manager.
//!
//! One published [`Snapshot`] is swapped whole on every successful refresh.
//! Readers never block on the network: they read whatever was last published.
//! A refresh fans out one task per subscription, then one task per running
//! workspace, on the context's io runtime. Dropping a refresh future drops its
//! `JoinSet`, which aborts whatever is still in flight.
//!
//! Sign-out and subscription changes clear the snapshot and bump an
//! invalidation epoch; a refresh that started before the bump is discarded
//! instead of published.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

use arc_auth::{AuthError, AuthEvent, ListenerId};
use arc_core::{ComputeModel, Subscription, WorkspaceModel};
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinSet;

use crate::context::DiscoveryContext;
use crate::error::DiscoveryError;
use crate::snapshot::Snapshot;
use crate::workspace::Workspace;

static GLOBAL: OnceLock<DiscoveryManager> = OnceLock::new();

pub struct DiscoveryManager {
    shared: Arc<Shared>,
    listener: ListenerId,
}

struct Shared {
    ctx: DiscoveryContext,
    snapshot: RwLock<Arc<Snapshot>>,
    epoch: AtomicU64,
}

impl DiscoveryManager {
    /// Create a manager with an empty snapshot.
    ///
    /// The session listener is registered immediately, signed in or not, and
    /// holds only a weak reference back to the manager.
    #[must_use]
    pub fn new(ctx: DiscoveryContext) -> Self {
        let shared = Arc::new(Shared {
            ctx,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            epoch: AtomicU64::new(0),
        });

        let weak: Weak<Shared> = Arc::downgrade(&shared);
        let listener = shared.ctx.auth.subscribe(Arc::new(move |event: AuthEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.on_auth_event(event);
            }
        }));

        Self { shared, listener }
    }

    /// Process-wide manager, created from `ctx` on first call.
    ///
    /// Later calls return the existing manager and ignore `ctx`.
    pub fn init_global(ctx: DiscoveryContext) -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(ctx))
    }

    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }

    /// The last published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.shared.current()
    }

    /// Compute pools of every running workspace. Never touches the network.
    ///
    /// Empty when nobody is signed in.
    #[must_use]
    pub fn current_clusters(&self) -> BTreeSet<ComputeModel> {
        if self.shared.ctx.auth.principal().is_none() {
            return BTreeSet::new();
        }
        self.shared.current().running_computes()
    }

    /// Running workspaces of the current snapshot.
    ///
    /// Non-running entries are pruned from the published snapshot as a side
    /// effect, under the same lock as the read.
    #[must_use]
    pub fn workspaces(&self) -> Vec<Arc<Workspace>> {
        let mut slot = self.shared.write_slot();
        let running = slot.running_only();
        if running.len() != slot.len() {
            tracing::debug!(
                pruned = slot.len() - running.len(),
                "dropping non-running workspaces"
            );
            *slot = Arc::new(running);
        }
        slot.iter().cloned().collect()
    }

    /// Resolve a compute pool's parent workspace in the current snapshot.
    #[must_use]
    pub fn workspace_of(&self, compute: &ComputeModel) -> Option<Arc<Workspace>> {
        self.shared.current().get(&compute.workspace.key()).cloned()
    }

    /// Clear the snapshot and discard any refresh already in flight.
    pub fn invalidate(&self) {
        self.shared.invalidate("requested");
    }

    /// Refresh, then publish. Failures are logged, not returned.
    pub async fn refresh_async(&self) -> &Self {
        if let Err(error) = self.shared.refresh().await {
            log_refresh_failure(&error);
        }
        self
    }

    /// Refresh, then publish, surfacing the failure instead of logging it.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NotSignedIn`] without a session,
    /// [`DiscoveryError::Invalidated`] if the session changed mid-refresh, or
    /// the subscription listing error from the session gateway.
    pub async fn try_refresh(&self) -> Result<&Self, DiscoveryError> {
        self.shared.refresh().await?;
        Ok(self)
    }

    /// Refresh on the io runtime and block until it finishes or times out.
    ///
    /// On a current-thread runtime blocking would deadlock, so the refresh is
    /// skipped with a warning and the prior snapshot stays published.
    pub fn refresh_blocking(&self) -> &Self {
        let caller = Handle::try_current().ok();
        if caller
            .as_ref()
            .is_some_and(|handle| handle.runtime_flavor() == RuntimeFlavor::CurrentThread)
        {
            tracing::warn!("refresh_blocking called on a current-thread runtime; skipping refresh");
            return self;
        }

        let shared = Arc::clone(&self.shared);
        let limit = self.shared.ctx.refresh_timeout;
        let task = self
            .shared
            .ctx
            .io
            .spawn(async move { tokio::time::timeout(limit, shared.refresh()).await });

        let joined = if caller.is_some() {
            tokio::task::block_in_place(|| futures::executor::block_on(task))
        } else {
            futures::executor::block_on(task)
        };

        match joined {
            Ok(Ok(Ok(count))) => tracing::debug!(count, "blocking refresh finished"),
            Ok(Ok(Err(error))) => log_refresh_failure(&error),
            Ok(Err(_elapsed)) => log_refresh_failure(&DiscoveryError::Timeout(limit)),
            Err(error) => tracing::warn!(%error, "refresh task did not complete"),
        }
        self
    }

    /// Lazily find compute pools by tenant, workspace name and pool name.
    ///
    /// Matches from the current snapshot come first. Only when those are
    /// exhausted does the stream refresh and continue with the fresh matches.
    /// Each distinct pool is yielded once.
    pub fn find_compute<'a>(
        &'a self,
        tenant_id: &'a str,
        workspace_name: &'a str,
        compute_name: &'a str,
    ) -> BoxStream<'a, ComputeModel> {
        let cached = stream::once(async move { self.current_clusters() });
        let fresh = stream::once(async move { self.refresh_async().await.current_clusters() });
        let mut seen = HashSet::new();

        cached
            .chain(fresh)
            .flat_map(stream::iter)
            .filter(move |compute| {
                future::ready(
                    compute.matches(tenant_id, workspace_name, compute_name)
                        && seen.insert(compute.clone()),
                )
            })
            .boxed()
    }

    /// First compute pool yielded by [`Self::find_compute`].
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::ComputeNotFound`] if neither the cached nor the
    /// refreshed snapshot contains a match.
    pub async fn locate_compute(
        &self,
        tenant_id: &str,
        workspace_name: &str,
        compute_name: &str,
    ) -> Result<ComputeModel, DiscoveryError> {
        self.find_compute(tenant_id, workspace_name, compute_name)
            .next()
            .await
            .ok_or_else(|| DiscoveryError::ComputeNotFound {
                tenant_id: tenant_id.to_string(),
                workspace: workspace_name.to_string(),
                compute: compute_name.to_string(),
            })
    }
}

impl std::fmt::Debug for DiscoveryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryManager")
            .field("workspaces", &self.shared.current().len())
            .field("epoch", &self.shared.epoch.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Drop for DiscoveryManager {
    fn drop(&mut self) {
        self.shared.ctx.auth.unsubscribe(self.listener);
    }
}

impl Shared {
    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Arc<Snapshot>> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_auth_event(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedOut => self.invalidate("signed out"),
            AuthEvent::SubscriptionsChanged => self.invalidate("subscriptions changed"),
            AuthEvent::SignedIn => {}
        }
    }

    fn invalidate(&self, reason: &str) {
        let mut slot = self.write_slot();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *slot = Arc::new(Snapshot::default());
        drop(slot);
        tracing::debug!(reason, "workspace snapshot invalidated");
    }

    /// Publish unless an invalidation happened since `epoch` was read.
    fn publish(&self, snapshot: Snapshot, epoch: u64) -> bool {
        let mut slot = self.write_slot();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return false;
        }
        *slot = Arc::new(snapshot);
        true
    }

    async fn refresh(&self) -> Result<usize, DiscoveryError> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        if self.ctx.auth.principal().is_none() {
            return Err(DiscoveryError::NotSignedIn);
        }

        let subscriptions = match self.ctx.auth.selected_subscriptions().await {
            Ok(subscriptions) => subscriptions,
            Err(AuthError::NotAuthenticated) => return Err(DiscoveryError::NotSignedIn),
            Err(error) => return Err(error.into()),
        };

        let snapshot = if subscriptions.is_empty() {
            Snapshot::default()
        } else {
            let models = self.list_workspaces(subscriptions).await;
            Snapshot::from_workspaces(self.fill_computes(models).await)
        };

        let count = snapshot.len();
        if self.publish(snapshot, epoch) {
            tracing::info!(workspaces = count, "published workspace snapshot");
            Ok(count)
        } else {
            Err(DiscoveryError::Invalidated)
        }
    }

    /// One task per subscription. A failing subscription contributes nothing.
    async fn list_workspaces(&self, subscriptions: Vec<Subscription>) -> Vec<WorkspaceModel> {
        let mut tasks = JoinSet::new();
        for subscription in subscriptions {
            let api = self.ctx.api.clone();
            tasks.spawn_on(
                async move {
                    let result = api.list_workspaces(&subscription).await;
                    (subscription, result)
                },
                &self.ctx.io,
            );
        }

        // Keyed by resource id: a duplicate id keeps the last descriptor seen.
        let mut by_id: BTreeMap<String, WorkspaceModel> = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(models))) => {
                    for model in models {
                        by_id.insert(model.id.clone(), model);
                    }
                }
                Ok((subscription, Err(source))) => {
                    let error = DiscoveryError::SubscriptionListFailure {
                        subscription_id: subscription.id.clone(),
                        source,
                    };
                    tracing::warn!(subscription = %subscription.id, %error, "skipping subscription");
                }
                Err(error) => tracing::warn!(%error, "workspace listing task failed"),
            }
        }
        by_id.into_values().collect()
    }

    /// One task per running workspace. A failing workspace keeps an empty cache.
    async fn fill_computes(&self, models: Vec<WorkspaceModel>) -> Vec<Workspace> {
        let mut workspaces = Vec::with_capacity(models.len());
        let mut tasks = JoinSet::new();
        for model in models {
            let workspace = Workspace::new(model);
            if !workspace.is_running() {
                workspaces.push(workspace);
                continue;
            }
            let api = self.ctx.api.clone();
            tasks.spawn_on(
                async move {
                    let refreshed = workspace.refresh_computes(&api).await;
                    refreshed.unwrap_or(workspace)
                },
                &self.ctx.io,
            );
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(workspace) => workspaces.push(workspace),
                Err(error) => tracing::warn!(%error, "compute refresh task failed"),
            }
        }
        // Same-key workspaces resolve by resource id, never by completion order.
        workspaces.sort_by(|a, b| a.model().id.cmp(&b.model().id));
        workspaces
    }
}

fn log_refresh_failure(error: &DiscoveryError) {
    match error {
        DiscoveryError::NotSignedIn | DiscoveryError::Invalidated => {
            tracing::debug!(%error, "workspace refresh skipped");
        }
        _ => tracing::warn!(%error, "workspace refresh failed"),
    }
}
