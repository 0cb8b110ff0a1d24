use std::path::{Path, PathBuf};

use crate::utils::project_name_from_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentProjectEntry {
    pub name: String,
    pub path: PathBuf,
    pub timestamp_millis: i64,
}

impl RecentProjectEntry {
    /// Build an entry, deriving the display name from the last path segment
    pub fn new(path: &Path, timestamp_millis: i64) -> Self {
        Self {
            name: project_name_from_path(&path.to_string_lossy()),
            path: path.to_path_buf(),
            timestamp_millis,
        }
    }
}
