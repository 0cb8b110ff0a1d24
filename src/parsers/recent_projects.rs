use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{DiscoveryError, Result};
use crate::models::RecentProjectEntry;
use crate::utils::Environment;
use crate::utils::paths::read_descriptor;

/// Placeholder the IDE writes in place of the user's home directory
const USER_HOME_PLACEHOLDER: &str = "$USER_HOME$";

/// Position of the last-opened timestamp among a project's meta options
const TIMESTAMP_OPTION_INDEX: usize = 4;

/// Named options consulted when the positional timestamp is unusable
const FALLBACK_TIMESTAMP_OPTIONS: [&str; 2] = ["projectOpenTimestamp", "activationTimestamp"];

/// `<application>` root of a recent-projects descriptor
#[derive(Debug, Deserialize)]
struct ApplicationXml {
    #[serde(rename = "component", default)]
    components: Vec<ComponentXml>,
}

#[derive(Debug, Deserialize)]
struct ComponentXml {
    #[serde(rename = "option", default)]
    options: Vec<ComponentOptionXml>,
}

#[derive(Debug, Deserialize)]
struct ComponentOptionXml {
    #[serde(default)]
    map: Option<EntryMapXml>,
}

#[derive(Debug, Deserialize)]
struct EntryMapXml {
    #[serde(rename = "entry", default)]
    entries: Vec<EntryXml>,
}

#[derive(Debug, Deserialize)]
struct EntryXml {
    #[serde(rename = "@key")]
    key: String,
    #[serde(default)]
    value: Option<EntryValueXml>,
}

#[derive(Debug, Deserialize)]
struct EntryValueXml {
    #[serde(rename = "RecentProjectMetaInfo", default)]
    meta: Option<MetaInfoXml>,
}

#[derive(Debug, Deserialize)]
struct MetaInfoXml {
    #[serde(rename = "option", default)]
    options: Vec<MetaOptionXml>,
}

#[derive(Debug, Deserialize)]
struct MetaOptionXml {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@value", default)]
    value: String,
}

impl MetaInfoXml {
    fn last_opened_millis(&self) -> Option<i64> {
        self.options
            .get(TIMESTAMP_OPTION_INDEX)
            .and_then(|option| option.millis())
            .or_else(|| {
                FALLBACK_TIMESTAMP_OPTIONS.iter().find_map(|name| {
                    self.options.iter().find(|option| option.name == *name)?.millis()
                })
            })
    }
}

impl MetaOptionXml {
    fn millis(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }
}

/// One `<entry>` of a recent-projects map, before path resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProjectEntry {
    /// Path as written by the IDE, possibly containing `$USER_HOME$`
    pub key: String,
    pub timestamp_millis: Option<i64>,
}

/// Parse the XML text of a recent-projects descriptor into raw entries
///
/// Navigates `application > component[0] > option[0] > map > entry*`.
///
/// # Errors
///
/// - [`DiscoveryError::DescriptorMalformed`] if the text is not XML or has no
///   `component`/`option` where one is expected
/// - [`DiscoveryError::NoRecentProjects`] if the first option carries no map, which is
///   how an IDE without any project history writes the file
pub fn parse_descriptor(xml: &str, path: &Path) -> Result<Vec<RawProjectEntry>> {
    let malformed = |reason: String| DiscoveryError::DescriptorMalformed {
        path: path.to_path_buf(),
        reason,
    };

    let application: ApplicationXml =
        quick_xml::de::from_str(xml).map_err(|e| malformed(e.to_string()))?;

    let component = application
        .components
        .into_iter()
        .next()
        .ok_or_else(|| malformed("missing <component> element".to_string()))?;
    let option = component
        .options
        .into_iter()
        .next()
        .ok_or_else(|| malformed("missing <option> element in first component".to_string()))?;
    let map = option.map.ok_or_else(|| DiscoveryError::NoRecentProjects(path.to_path_buf()))?;

    Ok(map
        .entries
        .into_iter()
        .map(|entry| RawProjectEntry {
            timestamp_millis: entry
                .value
                .as_ref()
                .and_then(|value| value.meta.as_ref())
                .and_then(MetaInfoXml::last_opened_millis),
            key: entry.key,
        })
        .collect())
}

/// Substitute `$USER_HOME$` in a recorded project path
pub fn resolve_project_path(key: &str, env: &Environment) -> Result<PathBuf> {
    if key.contains(USER_HOME_PLACEHOLDER) {
        let home = env.home().map_err(|e| e.in_template(key))?.to_string_lossy().into_owned();
        return Ok(PathBuf::from(key.replace(USER_HOME_PLACEHOLDER, &home)));
    }
    Ok(PathBuf::from(key))
}

/// Read the recent projects recorded in the descriptor at `config_path`
///
/// Entries whose project path no longer exists on disk, or that carry no usable
/// timestamp, are dropped with a warning.
///
/// # Errors
///
/// See [`parse_descriptor`]; I/O failures surface as [`DiscoveryError::Io`].
pub async fn parse_recent_projects(
    config_path: &Path,
    env: &Environment,
) -> Result<Vec<RecentProjectEntry>> {
    let content = read_descriptor(config_path).await.map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => DiscoveryError::DescriptorMalformed {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        },
        _ => DiscoveryError::io(config_path, e),
    })?;

    let raw_entries = parse_descriptor(&content, config_path)?;
    let total = raw_entries.len();
    let mut projects = Vec::with_capacity(total);

    for raw in raw_entries {
        let path = resolve_project_path(&raw.key, env)?;

        let Some(timestamp_millis) = raw.timestamp_millis else {
            warn!(project = %path.display(), "skipping recent project without a timestamp");
            continue;
        };

        if !fs::try_exists(&path).await.unwrap_or(false) {
            warn!(project = %path.display(), "skipping recent project that no longer exists");
            continue;
        }

        projects.push(RecentProjectEntry::new(&path, timestamp_millis));
    }

    debug!(
        descriptor = %config_path.display(),
        kept = projects.len(),
        dropped = total - projects.len(),
        "parsed recent projects"
    );

    Ok(projects)
}
