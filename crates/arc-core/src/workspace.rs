use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compute::WorkspaceRef;
use crate::errors::CoreError;
use crate::identity::Subscription;
use crate::state::ResourceState;

/// Composite key of a workspace inside a snapshot.
///
/// Workspace names are only unique within a subscription, so the subscription
/// id comes first. The derived ordering is the snapshot ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkspaceKey {
    pub subscription_id: String,
    pub name: String,
}

/// An Arcadia workspace as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceModel {
    /// ARM resource id (`/subscriptions/{sub}/resourceGroups/{rg}/providers/.../workspaces/{name}`).
    pub id: String,
    pub name: String,
    /// Subscription the workspace was listed under.
    pub subscription: Subscription,
    /// Control-plane endpoint the workspace was discovered through. Workspace-scoped
    /// sub-resources (compute pools) are addressed relative to it.
    pub management_endpoint: String,
    pub state: ResourceState,
    pub location: Option<String>,
    /// Data-plane endpoints keyed by kind (`dev`, `sql`, `web`, ...).
    #[serde(default)]
    pub connectivity_endpoints: BTreeMap<String, String>,
}

impl WorkspaceModel {
    #[must_use]
    pub fn key(&self) -> WorkspaceKey {
        WorkspaceKey {
            subscription_id: self.subscription.id.clone(),
            name: self.name.clone(),
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Value relation used by compute pools to point back at this workspace.
    #[must_use]
    pub fn as_ref_key(&self) -> WorkspaceRef {
        WorkspaceRef {
            subscription_id: self.subscription.id.clone(),
            workspace_name: self.name.clone(),
            tenant_id: self.subscription.tenant_id.clone(),
            workspace_id: self.id.clone(),
        }
    }

    /// Absolute URI of the workspace resource on its management endpoint.
    #[must_use]
    pub fn resource_uri(&self) -> String {
        let base = self.management_endpoint.trim_end_matches('/');
        if self.id.starts_with('/') {
            format!("{base}{}", self.id)
        } else {
            format!("{base}/{}", self.id)
        }
    }

    /// Check the fields every later lookup depends on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the id or name is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "workspace '{}' has an empty resource id",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "workspace {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}
