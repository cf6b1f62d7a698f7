//! # arc-discovery
//!
//! Discovers Arcadia workspaces and their Spark compute pools across every
//! subscription the signed-in user selected, and keeps the last result as an
//! immutable snapshot for cheap reads.

pub mod context;
pub mod manager;
pub mod snapshot;
pub mod workspace;

mod error;

pub use context::DiscoveryContext;
pub use error::DiscoveryError;
pub use manager::DiscoveryManager;
pub use snapshot::Snapshot;
pub use workspace::Workspace;
