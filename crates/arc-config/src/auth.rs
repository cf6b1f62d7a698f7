//! Non-interactive session configuration.
//!
//! Interactive sign-in is owned by the host. Standalone use (the `arcadia`
//! binary, CI) supplies an already-acquired bearer token and the selected
//! subscriptions here, usually through `ARCADIA_AUTH__ACCESS_TOKEN`.

use arc_core::Subscription;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Signed-in account name.
    #[serde(default)]
    pub user: String,

    /// Home tenant of the account.
    #[serde(default)]
    pub tenant_id: String,

    /// Bearer token presented to the control plane.
    #[serde(default)]
    pub access_token: String,

    /// Subscriptions selected for discovery.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl AuthConfig {
    /// Check if a session can be built from this config.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() && !self.tenant_id.is_empty()
    }
}
