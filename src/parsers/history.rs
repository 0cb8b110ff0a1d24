use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::models::AppInfo;
use crate::utils::paths::read_descriptor;
use crate::utils::{Environment, Platform, expand_config_template};

const HISTORY_FILENAME: &str = ".history.json";
const OPTIONS_DIR: &str = "options";

/// Recent-projects descriptor names, in priority order
pub const RECENT_PROJECT_FILES: [&str; 2] = ["recentProjectDirectories.xml", "recentProjects.xml"];

/// Installer-maintained record of every install/update of one app
///
/// Records are kept untyped: older installs may follow an earlier schema, and only
/// the active one has to be complete.
#[derive(Debug, Deserialize)]
struct HistoryDescriptor {
    history: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    item: InstallItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallItem {
    pub name: String,
    #[serde(rename = "system-app-path")]
    pub system_app_path: PathBuf,
    #[serde(default)]
    pub package: Option<PackageInfo>,
    pub intellij_platform: IntellijPlatform,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntellijPlatform {
    pub shell_script_name: String,
    pub default_config_directories: ConfigDirectories,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDirectories {
    #[serde(rename = "idea.config.path")]
    pub config_path: String,
}

impl InstallItem {
    /// Executable of this install, following the platform's bundle layout
    pub fn executable_path(&self, platform: Platform) -> std::result::Result<PathBuf, String> {
        let shell = &self.intellij_platform.shell_script_name;
        let path = match platform {
            Platform::Windows => {
                let command = self
                    .package
                    .as_ref()
                    .and_then(|p| p.command.as_deref())
                    .ok_or_else(|| "missing field `package.command`".to_string())?;
                self.system_app_path.join(command)
            }
            Platform::MacOS => self.system_app_path.join("Contents").join("MacOS").join(shell),
            Platform::Linux => self.system_app_path.join("bin").join(format!("{}.sh", shell)),
        };
        Ok(path)
    }

    /// SVG icon shipped with this install
    pub fn icon_path(&self, platform: Platform) -> PathBuf {
        let bin = match platform {
            Platform::MacOS => self.system_app_path.join("Contents").join("bin"),
            Platform::Windows | Platform::Linux => self.system_app_path.join("bin"),
        };
        bin.join(format!("{}.svg", self.intellij_platform.shell_script_name))
    }
}

/// Parse the contents of a `.history.json` descriptor and return its active install
///
/// The installer appends, so the last record is current. Earlier records are not
/// validated.
///
/// # Errors
///
/// [`DiscoveryError::HistoryMalformed`] if the text is not a `history` list, the list
/// is empty, or the last record lacks a required field.
pub fn parse_history(content: &str, path: &Path) -> Result<InstallItem> {
    let malformed = |reason: String| DiscoveryError::HistoryMalformed {
        path: path.to_path_buf(),
        reason,
    };

    let descriptor: HistoryDescriptor =
        serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
    let last = descriptor
        .history
        .into_iter()
        .next_back()
        .ok_or_else(|| malformed("history list is empty".to_string()))?;
    let record: HistoryRecord = serde_json::from_value(last)
        .map_err(|e| malformed(format!("active install record: {}", e)))?;

    Ok(record.item)
}

/// Resolve the launch metadata of the app installed in `install_dir`
///
/// Reads `<install_dir>/.history.json`, takes its last record as the active install,
/// and probes the install's `options` directory for a recent-projects descriptor
/// (see [`RECENT_PROJECT_FILES`]); the first existing file wins.
///
/// # Errors
///
/// - [`DiscoveryError::HistoryMissing`] if there is no history descriptor
/// - [`DiscoveryError::HistoryMalformed`] if it cannot be parsed, has no records, or
///   lacks a field the platform needs
/// - [`DiscoveryError::TemplateUnresolved`] if the config directory template
///   references an unset variable
/// - [`DiscoveryError::RecentConfigNotFound`] if no candidate descriptor exists
pub async fn read_app_info(
    install_dir: &Path,
    platform: Platform,
    env: &Environment,
) -> Result<AppInfo> {
    let history_path = install_dir.join(HISTORY_FILENAME);
    if !fs::try_exists(&history_path).await.unwrap_or(false) {
        return Err(DiscoveryError::HistoryMissing(install_dir.to_path_buf()));
    }

    let content = read_descriptor(&history_path).await.map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => {
            DiscoveryError::HistoryMalformed { path: history_path.clone(), reason: e.to_string() }
        }
        _ => DiscoveryError::io(&history_path, e),
    })?;
    let active = parse_history(&content, &history_path)?;
    let executable_path = active.executable_path(platform).map_err(|reason| {
        DiscoveryError::HistoryMalformed { path: history_path.clone(), reason }
    })?;
    let icon_path = active.icon_path(platform);

    let options_dir =
        expand_config_template(&active.intellij_platform.default_config_directories.config_path, env)?
            .join(OPTIONS_DIR);
    let recent_config_path = find_recent_config(&options_dir).await?;

    debug!(
        app = %active.name,
        exec = %executable_path.display(),
        config = %recent_config_path.display(),
        "resolved app info"
    );

    Ok(AppInfo {
        display_name: active.name,
        executable_path,
        icon_path,
        recent_config_path,
    })
}

async fn find_recent_config(options_dir: &Path) -> Result<PathBuf> {
    for filename in RECENT_PROJECT_FILES {
        let candidate = options_dir.join(filename);
        if fs::try_exists(&candidate).await.unwrap_or(false) {
            return Ok(candidate);
        }
    }
    Err(DiscoveryError::RecentConfigNotFound(options_dir.to_path_buf()))
}
