//! REST error types.

use arc_auth::AuthError;
use thiserror::Error;

/// Errors that can occur when talking to the Azure control plane.
#[derive(Debug, Error)]
pub enum RestError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The control plane returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to decode a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The control plane returned 429 Too Many Requests.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// No bearer token could be obtained for the request.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The client is shutting down and no longer accepts requests.
    #[error("client unavailable: {0}")]
    Unavailable(String),
}
