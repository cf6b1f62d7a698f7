use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata reported by a storage listing for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileInfo {
    pub path: String,
    #[serde(default)]
    pub is_directory: bool,
    #[serde(default, alias = "contentLength")]
    pub length: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}

impl RemoteFileInfo {
    /// Last path segment, ignoring a trailing slash.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Modification time in epoch milliseconds, or 0 when unknown.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.last_modified.map_or(0, |at| at.timestamp_millis())
    }
}
