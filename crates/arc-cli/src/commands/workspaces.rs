use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct WorkspaceRow {
    subscription_id: String,
    tenant_id: String,
    name: String,
    state: String,
    location: Option<String>,
    computes: usize,
}

pub async fn handle(app: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<WorkspaceRow> = app
        .manager
        .try_refresh()
        .await?
        .workspaces()
        .iter()
        .map(|workspace| {
            let model = workspace.model();
            WorkspaceRow {
                subscription_id: model.subscription.id.clone(),
                tenant_id: model.subscription.tenant_id.clone(),
                name: model.name.clone(),
                state: model.state.to_string(),
                location: model.location.clone(),
                computes: workspace.list_computes().len(),
            }
        })
        .collect();

    output(&rows, flags.format)
}
