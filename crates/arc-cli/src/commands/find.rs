use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::FindArgs;
use crate::commands::clusters::ComputeRow;
use crate::output::output;

/// Fails, and so exits non-zero, when no pool matches.
pub async fn handle(args: &FindArgs, app: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let compute = app
        .manager
        .locate_compute(&args.tenant, &args.workspace, &args.compute)
        .await?;

    if let Some(workspace) = app.manager.workspace_of(&compute) {
        tracing::debug!(
            workspace = workspace.name(),
            endpoints = workspace.model().connectivity_endpoints.len(),
            "resolved parent workspace"
        );
    }
    output(&ComputeRow::from(compute), flags.format)
}
