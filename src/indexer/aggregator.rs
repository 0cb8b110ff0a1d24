use futures_util::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::indexer::app_discovery::list_installed_apps;
use crate::models::{InstalledApp, ListItem};
use crate::parsers::{parse_recent_projects, read_app_info};

/// Run one aggregation pass over every installed app
///
/// Apps are processed with at most `config.concurrency` in flight, each bounded by
/// `config.app_timeout`. Results are merged in enumeration order and then sorted by
/// last-opened time, newest first; the sort is stable, so equal timestamps keep
/// enumeration order.
///
/// # Errors
///
/// Only root-level errors are returned: an unresolvable, missing or unreadable apps
/// root. Any failure inside a single app skips that app with a warning.
///
/// # Examples
///
/// ```no_run
/// use quickjet::{DiscoveryConfig, aggregate};
///
/// # async fn demo() -> Result<(), quickjet::DiscoveryError> {
/// let items = aggregate(&DiscoveryConfig::from_env()).await?;
/// println!("Found {} recent projects", items.len());
/// # Ok(())
/// # }
/// ```
pub async fn aggregate(config: &DiscoveryConfig) -> Result<Vec<ListItem>> {
    let apps_root = config.apps_root().await?;
    let apps = list_installed_apps(&apps_root).await?;
    let app_count = apps.len();

    let outcomes: Vec<(InstalledApp, Result<Vec<ListItem>>)> = stream::iter(apps)
        .map(|app| async move {
            let outcome = collect_app(&app, config).await;
            (app, outcome)
        })
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    let mut items = Vec::new();
    let mut skipped = 0;

    for (app, outcome) in outcomes {
        match outcome {
            Ok(app_items) => items.extend(app_items),
            Err(DiscoveryError::NoRecentProjects(path)) => {
                debug!(app = %app.name, descriptor = %path.display(), "no recent projects recorded");
            }
            Err(e) => {
                skipped += 1;
                warn!(app = %app.name, error = %e, "skipping app");
            }
        }
    }

    sort_newest_first(&mut items);

    info!(
        projects = items.len(),
        apps = app_count,
        skipped,
        "aggregated {} projects from {} apps ({} skipped)",
        items.len(),
        app_count,
        skipped
    );

    Ok(items)
}

/// Stable sort by last-opened time, newest first
pub fn sort_newest_first(items: &mut [ListItem]) {
    items.sort_by(|a, b| b.timestamp_millis.cmp(&a.timestamp_millis));
}

async fn collect_app(app: &InstalledApp, config: &DiscoveryConfig) -> Result<Vec<ListItem>> {
    match timeout(config.app_timeout, read_app_items(app, config)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(DiscoveryError::AppTimedOut {
            app: app.name.clone(),
            timeout: config.app_timeout,
        }),
    }
}

async fn read_app_items(app: &InstalledApp, config: &DiscoveryConfig) -> Result<Vec<ListItem>> {
    let info = read_app_info(&app.install_dir, config.platform, &config.environment).await?;
    let projects = parse_recent_projects(&info.recent_config_path, &config.environment).await?;

    Ok(projects.iter().map(|project| ListItem::from_entry(&info, project)).collect())
}
