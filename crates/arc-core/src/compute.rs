use serde::{Deserialize, Serialize};

use crate::state::ResourceState;
use crate::workspace::WorkspaceKey;

/// Non-owning relation from a compute pool to its parent workspace.
///
/// Resolved against the current snapshot when the workspace itself is needed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub subscription_id: String,
    pub workspace_name: String,
    pub tenant_id: String,
    pub workspace_id: String,
}

impl WorkspaceRef {
    #[must_use]
    pub fn key(&self) -> WorkspaceKey {
        WorkspaceKey {
            subscription_id: self.subscription_id.clone(),
            name: self.workspace_name.clone(),
        }
    }
}

/// A Spark compute pool inside a workspace.
///
/// Ordered by parent workspace first, then by pool name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComputeModel {
    pub workspace: WorkspaceRef,
    pub name: String,
    pub id: String,
    pub state: ResourceState,
    pub node_size: Option<String>,
    pub node_count: Option<u32>,
    pub spark_version: Option<String>,
}

impl ComputeModel {
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.workspace.tenant_id
    }

    #[must_use]
    pub fn workspace_name(&self) -> &str {
        &self.workspace.workspace_name
    }

    /// Exact match on tenant, workspace name and compute name.
    #[must_use]
    pub fn matches(&self, tenant_id: &str, workspace_name: &str, compute_name: &str) -> bool {
        self.workspace.tenant_id == tenant_id
            && self.workspace.workspace_name == workspace_name
            && self.name == compute_name
    }
}
