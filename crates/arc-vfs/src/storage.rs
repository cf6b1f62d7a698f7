//! Tree nodes built from a storage listing.

use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::file::RemoteVirtualFile;
use crate::info::RemoteFileInfo;

/// A file or directory in a storage container.
///
/// Parents are held weakly so a dropped tree frees itself.
#[derive(Debug)]
pub struct StorageVirtualFile {
    name: String,
    path: String,
    directory: bool,
    info: Option<RemoteFileInfo>,
    parent: RwLock<Weak<StorageVirtualFile>>,
    children: RwLock<Vec<Arc<StorageVirtualFile>>>,
}

impl StorageVirtualFile {
    fn build(
        name: String,
        path: String,
        directory: bool,
        info: Option<RemoteFileInfo>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            path,
            directory,
            info,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Vec::new()),
        })
    }

    /// A container root, e.g. `abfss://fs@account.dfs.core.windows.net/`.
    #[must_use]
    pub fn root(name: impl Into<String>, path: impl Into<String>) -> Arc<Self> {
        Self::build(name.into(), path.into(), true, None)
    }

    #[must_use]
    pub fn from_info(info: RemoteFileInfo) -> Arc<Self> {
        Self::build(
            info.name().to_string(),
            info.path.clone(),
            info.is_directory,
            Some(info),
        )
    }

    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    pub fn set_parent(&self, parent: &Arc<Self>) {
        *self.parent.write().unwrap_or_else(PoisonError::into_inner) = Arc::downgrade(parent);
    }

    /// Attach `child`, pointing its parent back at `self`.
    ///
    /// A child with the same name replaces the earlier one.
    pub fn add_child(self: &Arc<Self>, child: Arc<Self>) {
        child.set_parent(self);
        let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
        children.retain(|existing| existing.name != child.name);
        children.push(child);
    }

    /// Replace every child at once.
    pub fn set_children(self: &Arc<Self>, children: impl IntoIterator<Item = Arc<Self>>) {
        let children: Vec<_> = children
            .into_iter()
            .inspect(|child| child.set_parent(self))
            .collect();
        tracing::debug!(path = %self.path, count = children.len(), "listed remote directory");
        *self.children.write().unwrap_or_else(PoisonError::into_inner) = children;
    }

    #[must_use]
    pub fn children(&self) -> Vec<Arc<Self>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<Arc<Self>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|child| child.name == name)
            .cloned()
    }
}

impl RemoteVirtualFile for StorageVirtualFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn is_directory(&self) -> bool {
        self.directory
    }

    fn length(&self) -> u64 {
        self.info.as_ref().map_or(0, |info| info.length)
    }

    fn timestamp(&self) -> i64 {
        self.info.as_ref().map_or(0, RemoteFileInfo::timestamp_millis)
    }

    fn file_info(&self) -> Option<&RemoteFileInfo> {
        self.info.as_ref()
    }
}
