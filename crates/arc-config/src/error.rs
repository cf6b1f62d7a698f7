//! Errors raised while loading or validating [`crate::ArcConfig`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or did not deserialize.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A value parsed but is outside what the client accepts.
    #[error("config field '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}
