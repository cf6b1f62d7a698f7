//! # arc-vfs
//!
//! Read-only view of remote storage (ADLS Gen2 and blob containers) for
//! browsing Spark job artifacts. Nodes are listed by the caller and linked
//! into a tree; every mutating operation is refused.

pub mod file;
pub mod info;
pub mod storage;

mod error;

pub use error::VfsError;
pub use file::RemoteVirtualFile;
pub use info::RemoteFileInfo;
pub use storage::StorageVirtualFile;
