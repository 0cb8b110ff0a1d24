use std::path::PathBuf;

/// An application directory found under the Toolbox apps root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    /// Directory name, e.g. `IDEA-U`
    pub name: String,
    /// The current-channel install directory (`<apps root>/<name>/ch-0`)
    pub install_dir: PathBuf,
}

/// Metadata of the active install of an application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub display_name: String,
    pub executable_path: PathBuf,
    pub icon_path: PathBuf,
    /// Existing recent-projects descriptor for this app
    pub recent_config_path: PathBuf,
}
