use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use arc_core::{ComputeModel, WorkspaceKey};

use crate::workspace::Workspace;

/// One published view of every discovered workspace, keyed by
/// `(subscription id, workspace name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    workspaces: BTreeMap<WorkspaceKey, Arc<Workspace>>,
}

impl Snapshot {
    /// Later entries with the same key replace earlier ones.
    #[must_use]
    pub fn from_workspaces(workspaces: impl IntoIterator<Item = Workspace>) -> Self {
        Self {
            workspaces: workspaces
                .into_iter()
                .map(|workspace| (workspace.key(), Arc::new(workspace)))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &WorkspaceKey) -> Option<&Arc<Workspace>> {
        self.workspaces.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Workspace>> {
        self.workspaces.values()
    }

    /// Copy of this snapshot without the non-running workspaces.
    #[must_use]
    pub fn running_only(&self) -> Self {
        Self {
            workspaces: self
                .workspaces
                .iter()
                .filter(|(_, workspace)| workspace.is_running())
                .map(|(key, workspace)| (key.clone(), Arc::clone(workspace)))
                .collect(),
        }
    }

    /// Compute pools of every running workspace.
    #[must_use]
    pub fn running_computes(&self) -> BTreeSet<ComputeModel> {
        self.iter()
            .filter(|workspace| workspace.is_running())
            .flat_map(|workspace| workspace.list_computes().iter().cloned())
            .collect()
    }
}
