//! Control-plane response envelopes and their mapping onto core models.

use std::collections::BTreeMap;

use arc_core::{ComputeModel, ResourceState, Subscription, WorkspaceModel};
use serde::Deserialize;

/// List envelope. Arcadia returns `items`; ARM-style `value` is accepted too.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default, alias = "value")]
    pub items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceProperties {
    pub state: Option<String>,
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub connectivity_endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceDescriptor {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub properties: WorkspaceProperties,
}

impl WorkspaceDescriptor {
    #[must_use]
    pub fn into_model(self, subscription: &Subscription, management_endpoint: &str) -> WorkspaceModel {
        let state = resolve_state(
            self.state,
            self.properties.state,
            self.properties.provisioning_state,
        );
        WorkspaceModel {
            id: self.id,
            name: self.name,
            subscription: subscription.clone(),
            management_endpoint: management_endpoint.to_string(),
            state,
            location: self.location,
            connectivity_endpoints: self.properties.connectivity_endpoints,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeProperties {
    pub state: Option<String>,
    pub provisioning_state: Option<String>,
    pub node_size: Option<String>,
    pub node_count: Option<u32>,
    pub spark_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ComputeDescriptor {
    pub id: String,
    pub name: String,
    pub state: Option<String>,
    #[serde(default)]
    pub properties: ComputeProperties,
}

impl ComputeDescriptor {
    #[must_use]
    pub fn into_model(self, workspace: &WorkspaceModel) -> ComputeModel {
        let state = resolve_state(
            self.state,
            self.properties.state,
            self.properties.provisioning_state,
        );
        ComputeModel {
            workspace: workspace.as_ref_key(),
            name: self.name,
            id: self.id,
            state,
            node_size: self.properties.node_size,
            node_count: self.properties.node_count,
            spark_version: self.properties.spark_version,
        }
    }
}

/// Top-level `state` wins over `properties.state`, which wins over
/// `properties.provisioningState`.
fn resolve_state(
    top: Option<String>,
    nested: Option<String>,
    provisioning: Option<String>,
) -> ResourceState {
    top.or(nested)
        .or(provisioning)
        .map(ResourceState::from)
        .unwrap_or_default()
}
