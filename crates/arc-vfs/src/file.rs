//! The virtual file contract.

use std::io::{Read, Write};
use std::sync::Arc;

use crate::error::VfsError;
use crate::info::RemoteFileInfo;

/// A node of a remote file system.
///
/// Only naming is required; everything else defaults to a valid, empty,
/// read-only node.
pub trait RemoteVirtualFile: Send + Sync {
    fn name(&self) -> &str;

    /// Full path inside the storage account.
    fn path(&self) -> &str;

    fn is_directory(&self) -> bool;

    fn is_valid(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        false
    }

    /// Size in bytes.
    fn length(&self) -> u64 {
        0
    }

    /// Modification time in epoch milliseconds.
    fn timestamp(&self) -> i64 {
        0
    }

    fn file_info(&self) -> Option<&RemoteFileInfo> {
        None
    }

    /// # Errors
    ///
    /// The default never fails and yields no bytes.
    fn contents_to_bytes(&self) -> Result<Vec<u8>, VfsError> {
        Ok(Vec::new())
    }

    /// # Errors
    ///
    /// Returns [`VfsError::Unsupported`] unless the node can stream content.
    fn input_stream(&self) -> Result<Box<dyn Read + Send>, VfsError> {
        Err(VfsError::Unsupported {
            operation: "reading",
            path: self.path().to_string(),
        })
    }

    /// # Errors
    ///
    /// Always [`VfsError::ReadOnly`].
    fn output_stream(&self) -> Result<Box<dyn Write + Send>, VfsError> {
        Err(read_only("open for writing", self.path()))
    }

    /// # Errors
    ///
    /// Always [`VfsError::ReadOnly`].
    fn write(&self, _contents: &[u8]) -> Result<(), VfsError> {
        Err(read_only("write", self.path()))
    }

    /// # Errors
    ///
    /// Always [`VfsError::ReadOnly`].
    fn rename(&self, _new_name: &str) -> Result<(), VfsError> {
        Err(read_only("rename", self.path()))
    }

    /// # Errors
    ///
    /// Always [`VfsError::ReadOnly`].
    fn delete(&self) -> Result<(), VfsError> {
        Err(read_only("delete", self.path()))
    }

    /// # Errors
    ///
    /// Always [`VfsError::ReadOnly`].
    fn create_child(
        &self,
        _name: &str,
        _directory: bool,
    ) -> Result<Arc<dyn RemoteVirtualFile>, VfsError> {
        Err(read_only("create a child in", self.path()))
    }

    /// Re-read remote state. Nodes without a backing listing do nothing.
    fn refresh(&self) {}
}

fn read_only(operation: &'static str, path: &str) -> VfsError {
    VfsError::ReadOnly {
        operation,
        path: path.to_string(),
    }
}
