use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Refresh and list running Spark compute pools.
    Clusters,
    /// Refresh and list running workspaces.
    Workspaces,
    /// Locate one compute pool by tenant, workspace and name.
    Find(FindArgs),
    /// Check whether an ESP submission auth code can be acquired.
    AuthCode(AuthCodeArgs),
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Tenant id of the workspace's subscription.
    pub tenant: String,
    /// Workspace name.
    pub workspace: String,
    /// Spark compute pool name.
    pub compute: String,
}

#[derive(Debug, Args)]
pub struct AuthCodeArgs {
    /// Tenant to request the token in.
    #[arg(long)]
    pub tenant: String,

    /// Submission name used in logs.
    #[arg(long, default_value = "arcadia")]
    pub name: String,
}
