//! A discovered workspace together with its cached compute pools.

use std::collections::BTreeSet;

use arc_core::{ComputeModel, Subscription, WorkspaceKey, WorkspaceModel};
use arc_rest::ArcadiaApi;
use chrono::{DateTime, Utc};

use crate::error::DiscoveryError;

/// Immutable value: a compute refresh yields a new `Workspace`.
#[derive(Debug, Clone)]
pub struct Workspace {
    model: WorkspaceModel,
    computes: BTreeSet<ComputeModel>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Workspace {
    /// A workspace whose compute pools have not been fetched yet.
    #[must_use]
    pub const fn new(model: WorkspaceModel) -> Self {
        Self {
            model,
            computes: BTreeSet::new(),
            refreshed_at: None,
        }
    }

    /// Replace the cached compute pools, stamping the refresh time.
    #[must_use]
    pub fn with_computes(self, computes: impl IntoIterator<Item = ComputeModel>) -> Self {
        Self {
            model: self.model,
            computes: computes.into_iter().collect(),
            refreshed_at: Some(Utc::now()),
        }
    }

    #[must_use]
    pub const fn model(&self) -> &WorkspaceModel {
        &self.model
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.model.name
    }

    #[must_use]
    pub const fn subscription(&self) -> &Subscription {
        &self.model.subscription
    }

    #[must_use]
    pub fn key(&self) -> WorkspaceKey {
        self.model.key()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.model.is_running()
    }

    /// Cached compute pools, ordered.
    #[must_use]
    pub const fn list_computes(&self) -> &BTreeSet<ComputeModel> {
        &self.computes
    }

    /// When the compute cache was last filled, if ever.
    #[must_use]
    pub const fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Fetch this workspace's compute pools.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::WorkspaceRefreshFailure`] if the listing fails.
    pub async fn try_refresh_computes(&self, api: &ArcadiaApi) -> Result<Self, DiscoveryError> {
        let computes = api.list_computes(&self.model).await.map_err(|source| {
            DiscoveryError::WorkspaceRefreshFailure {
                workspace: self.model.name.clone(),
                source,
            }
        })?;
        tracing::debug!(
            workspace = %self.model.name,
            count = computes.len(),
            "refreshed Spark computes"
        );
        Ok(self.clone().with_computes(computes))
    }

    /// Like [`Self::try_refresh_computes`], but logs the failure and yields `None`.
    pub async fn refresh_computes(&self, api: &ArcadiaApi) -> Option<Self> {
        match self.try_refresh_computes(api).await {
            Ok(refreshed) => Some(refreshed),
            Err(error) => {
                tracing::warn!(workspace = %self.model.name, %error, "compute refresh failed");
                None
            }
        }
    }
}

/// Equality ignores the refresh stamp.
impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.computes == other.computes
    }
}

impl Eq for Workspace {}
