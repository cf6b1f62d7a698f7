//! Status handling for Azure Resource Manager responses.

use serde::Deserialize;

use crate::error::RestError;

/// Throttled requests without a usable `Retry-After` wait this long.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// ARM wraps failures as `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ArmErrorEnvelope {
    error: ArmError,
}

#[derive(Debug, Deserialize)]
struct ArmError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Pass 2xx responses through; map throttling and failures to [`RestError`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RestError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RestError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(RestError::Api {
        status: status.as_u16(),
        message: arm_message(&body),
    })
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// `"{code}: {message}"` from an ARM error body, or the raw body otherwise.
fn arm_message(body: &str) -> String {
    match serde_json::from_str::<ArmErrorEnvelope>(body) {
        Ok(ArmErrorEnvelope { error }) if error.code.is_empty() => error.message,
        Ok(ArmErrorEnvelope { error }) => format!("{}: {}", error.code, error.message),
        Err(_) => body.trim().to_string(),
    }
}
