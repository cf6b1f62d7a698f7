//! # arc-config
//!
//! Layered configuration loading for Arcadia using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ARCADIA_*` prefix, `__` as separator)
//! 2. Project-level `.arcadia/config.toml`
//! 3. User-level `~/.config/arcadia/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `ARCADIA_AZURE__API_VERSION` -> `azure.api_version`,
//! `ARCADIA_AUTH__ACCESS_TOKEN` -> `auth.access_token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use arc_config::ArcConfig;
//!
//! let config = ArcConfig::load_with_dotenv().expect("config");
//! println!("control plane: {}", config.azure.management_endpoint);
//! ```

mod auth;
mod azure;
mod discovery;
mod error;
mod http;
mod submission;

pub use auth::AuthConfig;
pub use azure::AzureConfig;
pub use discovery::DiscoveryConfig;
pub use error::ConfigError;
pub use http::HttpConfig;
pub use submission::SubmissionConfig;

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArcConfig {
    #[serde(default)]
    pub azure: AzureConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl ArcConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".arcadia/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ARCADIA_").split("__"))
    }

    /// Reject values the HTTP and discovery layers cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.azure.management_endpoint.starts_with("https://")
            && !self.azure.management_endpoint.starts_with("http://")
        {
            return Err(invalid(
                "azure.management_endpoint",
                "must be an http(s) URL",
            ));
        }
        if self.azure.arcadia_namespace.trim().is_empty() {
            return Err(invalid("azure.arcadia_namespace", "must not be empty"));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(invalid("http.request_timeout_secs", "must be greater than 0"));
        }
        if self.http.max_concurrent_requests == 0 {
            return Err(invalid(
                "http.max_concurrent_requests",
                "must be greater than 0",
            ));
        }
        if self.discovery.refresh_timeout_secs == 0 {
            return Err(invalid(
                "discovery.refresh_timeout_secs",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.request_timeout_secs)
    }

    #[must_use]
    pub const fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery.refresh_timeout_secs)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arcadia").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ArcConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.auth.is_configured());
        assert_eq!(config.refresh_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = ArcConfig::default();
        config.http.request_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http.request_timeout_secs"));
    }

    #[test]
    fn invalid_value_names_field_and_reason() {
        let mut config = ArcConfig::default();
        config.discovery.refresh_timeout_secs = 0;
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "config field 'discovery.refresh_timeout_secs' is invalid: must be greater than 0"
        );
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let mut config = ArcConfig::default();
        config.azure.management_endpoint = "management.azure.com".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
