//! Discovery error types.

use std::time::Duration;

use arc_auth::AuthError;
use arc_rest::RestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Nobody is signed in.
    #[error("not signed in — sign in to Azure to discover Arcadia workspaces")]
    NotSignedIn,

    /// Listing the workspaces of one subscription failed.
    #[error("failed to list workspaces of subscription {subscription_id}: {source}")]
    SubscriptionListFailure {
        subscription_id: String,
        #[source]
        source: RestError,
    },

    /// Listing the compute pools of one workspace failed.
    #[error("failed to refresh Spark computes of workspace {workspace}: {source}")]
    WorkspaceRefreshFailure {
        workspace: String,
        #[source]
        source: RestError,
    },

    /// A blocking refresh did not finish in time.
    #[error("workspace refresh timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The session changed while the refresh was in flight; its result was dropped.
    #[error("session changed during refresh; result discarded")]
    Invalidated,

    /// No compute matched a lookup.
    #[error("can't find Spark compute ({workspace}:{compute}) at tenant {tenant_id}")]
    ComputeNotFound {
        tenant_id: String,
        workspace: String,
        compute: String,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Rest(#[from] RestError),
}
