//! Bearer-token injection for Spark batch submission to ESP clusters.
//!
//! Each call requests a fresh token from the [`AuthGateway`]; nothing is
//! cached and nothing is retried.

use std::sync::Arc;

use arc_auth::{AuthError, AuthGateway, PromptPolicy};
use arc_config::ArcConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::RestError;

/// Resource ESP-secured HDInsight clusters accept tokens for.
pub const ESP_RESOURCE: &str = "https://hib.azurehdinsight.net";

pub struct EspMfaSubmission {
    auth: Arc<dyn AuthGateway>,
    tenant_id: String,
    name: String,
    resource: String,
}

impl EspMfaSubmission {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        tenant_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            tenant_id: tenant_id.into(),
            name: name.into(),
            resource: ESP_RESOURCE.to_string(),
        }
    }

    /// Same as [`Self::new`] with the resource taken from `submission.resource`.
    #[must_use]
    pub fn from_config(
        auth: Arc<dyn AuthGateway>,
        config: &ArcConfig,
        tenant_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            resource: config.submission.resource.clone(),
            ..Self::new(auth, tenant_id, name)
        }
    }

    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Acquire a token for the ESP resource in the user's tenant.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the gateway cannot issue a token.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        self.auth
            .access_token(&self.tenant_id, &self.resource, PromptPolicy::Auto)
            .await
    }

    /// Build an HTTP client that sends `Authorization: Bearer <token>` on
    /// every request. TLS trust and proxy settings are the system defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Auth`] if no token can be acquired, or
    /// [`RestError::Http`] if the client fails to build.
    pub async fn http_client(&self) -> Result<reqwest::Client, RestError> {
        let token = self.access_token().await?;
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| RestError::Parse(format!("token is not a valid header value: {e}")))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(reqwest::Client::builder().default_headers(headers).build()?)
    }

    /// `"Bearer <token>"`, or `None` when token acquisition fails.
    pub async fn auth_code(&self) -> Option<String> {
        match self.access_token().await {
            Ok(token) => Some(format!("Bearer {token}")),
            Err(error) => {
                tracing::debug!(
                    tenant_id = %self.tenant_id,
                    submission = %self.name,
                    %error,
                    "no auth code for ESP submission"
                );
                None
            }
        }
    }
}
