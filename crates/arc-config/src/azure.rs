//! Azure control-plane endpoints.

use serde::{Deserialize, Serialize};

fn default_management_endpoint() -> String {
    "https://management.azure.com".into()
}

fn default_management_resource() -> String {
    "https://management.core.windows.net/".into()
}

fn default_arcadia_namespace() -> String {
    "Microsoft.ProjectArcadia".into()
}

fn default_api_version() -> String {
    "2019-06-01-preview".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureConfig {
    /// Resource manager endpoint of the target cloud.
    #[serde(default = "default_management_endpoint")]
    pub management_endpoint: String,

    /// OAuth2 resource the control-plane bearer token is bound to.
    #[serde(default = "default_management_resource")]
    pub management_resource: String,

    /// Resource provider namespace for Arcadia workspaces.
    #[serde(default = "default_arcadia_namespace")]
    pub arcadia_namespace: String,

    /// `api-version` pinned on every control-plane request.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            management_endpoint: default_management_endpoint(),
            management_resource: default_management_resource(),
            arcadia_namespace: default_arcadia_namespace(),
            api_version: default_api_version(),
        }
    }
}
