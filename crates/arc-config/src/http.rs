//! HTTP transport settings shared by every control-plane client.

use serde::{Deserialize, Serialize};

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_concurrent_requests() -> usize {
    8
}

fn default_user_agent() -> String {
    format!("arcadia-toolkit/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on in-flight GET requests across all fan-outs.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Base `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrent_requests: default_max_concurrent_requests(),
            user_agent: default_user_agent(),
        }
    }
}
