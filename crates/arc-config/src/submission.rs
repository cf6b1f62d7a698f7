//! Spark batch submission settings.

use serde::{Deserialize, Serialize};

fn default_resource() -> String {
    "https://hib.azurehdinsight.net".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionConfig {
    /// OAuth2 resource ESP cluster tokens are bound to.
    #[serde(default = "default_resource")]
    pub resource: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            resource: default_resource(),
        }
    }
}
