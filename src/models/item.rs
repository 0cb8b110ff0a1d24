use std::path::PathBuf;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::models::{AppInfo, RecentProjectEntry};
use crate::utils::file_uri;

/// A recent project joined with the application that opens it
///
/// Serialized field names follow the host's item shape
/// (`title`, `description`, `icon`, plus the launch payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub title: String,
    pub description: String,
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
    #[serde(rename = "icon")]
    pub icon_uri: String,
    #[serde(rename = "exec")]
    pub exec_path: PathBuf,
    #[serde(rename = "path")]
    pub project_path: PathBuf,
}

impl ListItem {
    pub fn from_entry(app: &AppInfo, entry: &RecentProjectEntry) -> Self {
        Self {
            title: entry.name.clone(),
            description: describe(entry),
            timestamp_millis: entry.timestamp_millis,
            icon_uri: file_uri(&app.icon_path),
            exec_path: app.executable_path.clone(),
            project_path: entry.path.clone(),
        }
    }

    /// Case-insensitive substring match against title or description
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

fn describe(entry: &RecentProjectEntry) -> String {
    let time = match Local.timestamp_millis_opt(entry.timestamp_millis).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => entry.timestamp_millis.to_string(),
    };
    format!("Time: {} Path: {}", time, entry.path.display())
}
