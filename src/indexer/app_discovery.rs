use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::models::InstalledApp;

/// Subdirectory holding an app's current-channel install
pub const CHANNEL_DIR: &str = "ch-0";

/// List the applications installed under the Toolbox apps root
///
/// Every immediate subdirectory is one app; plain files and symlinks are ignored.
/// Apps are returned sorted by directory name so later tie-breaking does not depend
/// on the platform's directory listing order. The channel directory is not checked
/// here; a missing one surfaces later as a missing history descriptor.
///
/// # Errors
///
/// Returns [`DiscoveryError::AppsRootUnreadable`] if the apps root cannot be listed.
pub async fn list_installed_apps(apps_root: &Path) -> Result<Vec<InstalledApp>> {
    let unreadable = |source: std::io::Error| DiscoveryError::AppsRootUnreadable {
        path: apps_root.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(apps_root).await.map_err(unreadable)?;
    let mut apps = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(e) => {
                debug!(entry = %entry.path().display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        apps.push(InstalledApp { install_dir: entry.path().join(CHANNEL_DIR), name });
    }

    apps.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(apps_root = %apps_root.display(), count = apps.len(), "listed installed apps");

    Ok(apps)
}
