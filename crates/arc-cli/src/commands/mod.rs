use crate::bootstrap::AppContext;
use crate::cli::{Commands, GlobalFlags};

pub mod auth_code;
pub mod clusters;
pub mod find;
pub mod workspaces;

pub async fn dispatch(command: Commands, app: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Clusters => clusters::handle(app, flags).await,
        Commands::Workspaces => workspaces::handle(app, flags).await,
        Commands::Find(args) => find::handle(&args, app, flags).await,
        Commands::AuthCode(args) => auth_code::handle(&args, app, flags).await,
    }
}
