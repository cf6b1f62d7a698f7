//! Arcadia resource-provider endpoints.

use std::sync::Arc;

use arc_config::AzureConfig;
use arc_core::{ComputeModel, Subscription, WorkspaceModel};

use crate::client::{RestClient, get_json};
use crate::error::RestError;
use crate::models::{ComputeDescriptor, ListResponse, WorkspaceDescriptor};

/// Endpoint-aware façade over a [`RestClient`].
#[derive(Clone)]
pub struct ArcadiaApi {
    rest: Arc<dyn RestClient>,
    azure: AzureConfig,
}

impl ArcadiaApi {
    #[must_use]
    pub fn new(rest: Arc<dyn RestClient>, azure: AzureConfig) -> Self {
        Self { rest, azure }
    }

    /// `{endpoint}/subscriptions/{id}/providers/{namespace}/workspaces?api-version={v}`
    #[must_use]
    pub fn workspaces_uri(&self, subscription: &Subscription) -> String {
        format!(
            "{}/subscriptions/{}/providers/{}/workspaces?api-version={}",
            self.azure.management_endpoint.trim_end_matches('/'),
            subscription.id,
            self.azure.arcadia_namespace,
            self.azure.api_version,
        )
    }

    /// `{workspace resource uri}/sparkComputes?api-version={v}`
    #[must_use]
    pub fn computes_uri(&self, workspace: &WorkspaceModel) -> String {
        format!(
            "{}/sparkComputes?api-version={}",
            workspace.resource_uri(),
            self.azure.api_version,
        )
    }

    /// List the workspaces of one subscription.
    ///
    /// Descriptors that fail validation are dropped with a debug log.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the request fails or the body does not decode.
    pub async fn list_workspaces(
        &self,
        subscription: &Subscription,
    ) -> Result<Vec<WorkspaceModel>, RestError> {
        let uri = self.workspaces_uri(subscription);
        tracing::debug!(subscription = %subscription.id, %uri, "listing workspaces");

        let resp: ListResponse<WorkspaceDescriptor> =
            get_json(self.rest.as_ref(), subscription, &uri).await?;
        Ok(resp
            .items
            .into_iter()
            .map(|d| d.into_model(subscription, &self.azure.management_endpoint))
            .filter(|model| match model.validate() {
                Ok(()) => true,
                Err(error) => {
                    tracing::debug!(subscription = %subscription.id, %error, "skipping workspace");
                    false
                }
            })
            .collect())
    }

    /// List the Spark compute pools of one workspace.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the request fails or the body does not decode.
    pub async fn list_computes(
        &self,
        workspace: &WorkspaceModel,
    ) -> Result<Vec<ComputeModel>, RestError> {
        let uri = self.computes_uri(workspace);
        let resp: ListResponse<ComputeDescriptor> =
            get_json(self.rest.as_ref(), &workspace.subscription, &uri).await?;
        Ok(resp
            .items
            .into_iter()
            .map(|d| d.into_model(workspace))
            .collect())
    }
}
