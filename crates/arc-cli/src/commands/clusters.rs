use arc_core::ComputeModel;
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ComputeRow {
    pub tenant_id: String,
    pub subscription_id: String,
    pub workspace: String,
    pub name: String,
    pub state: String,
    pub node_size: Option<String>,
    pub node_count: Option<u32>,
    pub spark_version: Option<String>,
}

impl From<ComputeModel> for ComputeRow {
    fn from(compute: ComputeModel) -> Self {
        Self {
            state: compute.state.to_string(),
            tenant_id: compute.workspace.tenant_id,
            subscription_id: compute.workspace.subscription_id,
            workspace: compute.workspace.workspace_name,
            name: compute.name,
            node_size: compute.node_size,
            node_count: compute.node_count,
            spark_version: compute.spark_version,
        }
    }
}

pub async fn handle(app: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<ComputeRow> = app
        .manager
        .try_refresh()
        .await?
        .current_clusters()
        .into_iter()
        .map(ComputeRow::from)
        .collect();

    tracing::debug!(count = rows.len(), "listing running Spark computes");
    output(&rows, flags.format)
}
