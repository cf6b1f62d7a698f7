use std::sync::Arc;
use std::time::Duration;

use arc_auth::AuthGateway;
use arc_config::ArcConfig;
use arc_rest::{ArcadiaApi, AzureHttpClient, RestClient};
use tokio::runtime::Handle;

use crate::error::DiscoveryError;

/// Everything a [`crate::DiscoveryManager`] needs from its surroundings.
#[derive(Clone)]
pub struct DiscoveryContext {
    pub auth: Arc<dyn AuthGateway>,
    pub api: ArcadiaApi,
    /// Runtime the per-subscription and per-workspace fetches are spawned on.
    pub io: Handle,
    /// Overall bound on [`crate::DiscoveryManager::refresh_blocking`].
    pub refresh_timeout: Duration,
}

impl DiscoveryContext {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        rest: Arc<dyn RestClient>,
        config: &ArcConfig,
        io: Handle,
    ) -> Self {
        Self {
            auth,
            api: ArcadiaApi::new(rest, config.azure.clone()),
            io,
            refresh_timeout: config.refresh_timeout(),
        }
    }

    /// Wire an [`AzureHttpClient`] tagged with a per-process UUID user agent.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Rest`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &ArcConfig,
        auth: Arc<dyn AuthGateway>,
        io: Handle,
    ) -> Result<Self, DiscoveryError> {
        let client = AzureHttpClient::new(Arc::clone(&auth), config)?.with_uuid_user_agent();
        Ok(Self::new(auth, Arc::new(client), config, io))
    }
}
