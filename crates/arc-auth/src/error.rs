use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in — sign in to Azure before listing workspaces")]
    NotAuthenticated,

    #[error("access token expired — sign in again to refresh it")]
    TokenExpired,

    #[error("failed to acquire token for tenant {tenant_id} and resource {resource}: {reason}")]
    TokenAcquisition {
        tenant_id: String,
        resource: String,
        reason: String,
    },

    #[error("failed to list selected subscriptions: {0}")]
    Subscriptions(String),

    #[error("{0}")]
    Other(String),
}
