//! Lifecycle state shared by workspaces and Spark compute pools.
//!
//! The control plane reports state as a free-form string, sometimes as a
//! top-level `state` and sometimes only as an ARM `provisioningState`.
//! Parsing is case-insensitive; ARM's `Succeeded` counts as running.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of a workspace or compute pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceState {
    Running,
    Provisioning,
    Stopped,
    Deleting,
    Failed,
    /// Any state string this crate does not model, kept verbatim.
    Other(String),
}

impl ResourceState {
    /// Parse a state string as reported by the control plane.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "running" | "succeeded" => Self::Running,
            "provisioning" | "creating" | "updating" => Self::Provisioning,
            "stopped" | "paused" => Self::Stopped,
            "deleting" => Self::Deleting,
            "failed" => Self::Failed,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Return the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "Running",
            Self::Provisioning => "Provisioning",
            Self::Stopped => "Stopped",
            Self::Deleting => "Deleting",
            Self::Failed => "Failed",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResourceState {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for ResourceState {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<ResourceState> for String {
    fn from(state: ResourceState) -> Self {
        state.as_str().to_string()
    }
}
