//! Authenticated GET against the Azure control plane.

use std::sync::Arc;
use std::time::Duration;

use arc_auth::{AuthGateway, PromptPolicy};
use arc_config::ArcConfig;
use arc_core::Subscription;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::error::RestError;
use crate::http::check_response;

/// Transport seam used by the discovery layer.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// GET `url` with a bearer token bound to `subscription`'s tenant and
    /// return the response body.
    async fn get(&self, subscription: &Subscription, url: &str) -> Result<String, RestError>;
}

/// GET `url` and decode the body as `T`.
///
/// # Errors
///
/// Returns [`RestError`] if the request fails or the body does not decode.
pub async fn get_json<T: DeserializeOwned>(
    client: &dyn RestClient,
    subscription: &Subscription,
    url: &str,
) -> Result<T, RestError> {
    let body = client.get(subscription, url).await?;
    serde_json::from_str(&body).map_err(|e| RestError::Parse(format!("{url}: {e}")))
}

/// `reqwest`-backed [`RestClient`] for the resource manager endpoint.
pub struct AzureHttpClient {
    http: reqwest::Client,
    auth: Arc<dyn AuthGateway>,
    resource: String,
    user_agent: String,
    permits: Arc<Semaphore>,
}

impl AzureHttpClient {
    /// Build a client from the `azure` and `http` config sections.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the underlying `reqwest::Client` fails
    /// to build (TLS backend initialisation).
    pub fn new(auth: Arc<dyn AuthGateway>, config: &ArcConfig) -> Result<Self, RestError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            auth,
            resource: config.azure.management_resource.clone(),
            user_agent: config.http.user_agent.clone(),
            permits: Arc::new(Semaphore::new(config.http.max_concurrent_requests)),
        })
    }

    /// Replace the `User-Agent` sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Tag the `User-Agent` with a per-client UUID so server-side traces of
    /// one session can be correlated.
    #[must_use]
    pub fn with_uuid_user_agent(mut self) -> Self {
        self.user_agent = format!("{} {}", self.user_agent, uuid::Uuid::new_v4());
        self
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl RestClient for AzureHttpClient {
    async fn get(&self, subscription: &Subscription, url: &str) -> Result<String, RestError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| RestError::Unavailable(e.to_string()))?;

        let token = self
            .auth
            .access_token(&subscription.tenant_id, &self.resource, PromptPolicy::Auto)
            .await?;

        tracing::debug!(subscription = %subscription.id, url, "GET");
        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.text().await?)
    }
}
