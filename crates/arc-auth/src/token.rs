use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::AuthError;

/// Tokens expiring within this window are treated as expired.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Read the `exp` claim of a JWT without validating its signature.
///
/// Azure AD access tokens are JWTs; this is only used to avoid sending a token
/// the control plane will reject anyway.
///
/// # Errors
///
/// Returns `AuthError::Other` when `jwt` is not three dot-separated segments,
/// the payload is not base64url JSON, or `exp` is absent or out of range.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let mut segments = jwt.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::Other("token is not a three-part JWT".into()));
    };

    let claims: serde_json::Value = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::Other(format!("JWT payload is not base64url: {e}")))
        .and_then(|bytes| {
            serde_json::from_slice(&bytes)
                .map_err(|e| AuthError::Other(format!("JWT payload is not JSON: {e}")))
        })?;

    claims
        .get("exp")
        .and_then(serde_json::Value::as_i64)
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
        .ok_or_else(|| AuthError::Other("JWT has no usable exp claim".into()))
}

/// Reject a token that is a JWT and expires within [`EXPIRY_BUFFER_SECS`].
///
/// Opaque (non-JWT) tokens pass through: their lifetime is unknown here.
///
/// # Errors
///
/// Returns `AuthError::TokenExpired` for an expired or near-expiry JWT.
pub fn ensure_fresh(token: &str) -> Result<(), AuthError> {
    match decode_expiry(token) {
        Ok(expires_at) => {
            let threshold = Utc::now() + TimeDelta::seconds(EXPIRY_BUFFER_SECS);
            if expires_at <= threshold {
                tracing::warn!(%expires_at, "access token expires within {EXPIRY_BUFFER_SECS}s");
                return Err(AuthError::TokenExpired);
            }
            Ok(())
        }
        Err(error) => {
            tracing::debug!(%error, "token is not a decodable JWT; skipping expiry check");
            Ok(())
        }
    }
}

#[cfg(test)]
pub(crate) fn make_jwt_with_exp(exp: i64) -> String {
    let segments = [
        URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(format!(
            r#"{{"aud":"https://management.core.windows.net/","tid":"t-1","exp":{exp}}}"#
        )),
        URL_SAFE_NO_PAD.encode("signature"),
    ];
    segments.join(".")
}
