//! Workspace discovery settings.

use serde::{Deserialize, Serialize};

const fn default_refresh_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Overall bound on a blocking refresh, in seconds.
    #[serde(default = "default_refresh_timeout_secs")]
    pub refresh_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            refresh_timeout_secs: default_refresh_timeout_secs(),
        }
    }
}
