use arc_rest::EspMfaSubmission;
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuthCodeArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuthCodeResponse {
    tenant_id: String,
    resource: String,
    available: bool,
    scheme: Option<String>,
}

pub async fn handle(
    args: &AuthCodeArgs,
    app: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let submission =
        EspMfaSubmission::from_config(app.auth.clone(), &app.config, &args.tenant, &args.name);
    let code = submission.auth_code().await;

    let response = AuthCodeResponse {
        tenant_id: submission.tenant_id().to_string(),
        resource: submission.resource().to_string(),
        available: code.is_some(),
        // Only the scheme is printed; the token itself never leaves the process.
        scheme: code.and_then(|code| code.split_whitespace().next().map(str::to_string)),
    };
    output(&response, flags.format)
}
