use std::sync::Arc;

use anyhow::Context;
use arc_auth::{AuthGateway, SessionGateway};
use arc_config::ArcConfig;
use arc_discovery::{DiscoveryContext, DiscoveryManager};
use tokio::runtime::Handle;

pub fn load_config() -> anyhow::Result<ArcConfig> {
    ArcConfig::load_with_dotenv().context("failed to load arcadia configuration")
}

pub struct AppContext {
    pub config: ArcConfig,
    pub auth: Arc<SessionGateway>,
    pub manager: &'static DiscoveryManager,
}

impl AppContext {
    pub fn init(config: ArcConfig) -> anyhow::Result<Self> {
        let auth = Arc::new(SessionGateway::from_config(&config.auth));
        if auth.principal().is_none() {
            tracing::warn!(
                "no Azure session configured; set ARCADIA_AUTH__TENANT_ID and ARCADIA_AUTH__ACCESS_TOKEN"
            );
        }

        let ctx = DiscoveryContext::from_config(&config, auth.clone(), Handle::current())
            .context("failed to build the Azure HTTP client")?;
        let manager = DiscoveryManager::init_global(ctx);

        Ok(Self {
            config,
            auth,
            manager,
        })
    }
}
