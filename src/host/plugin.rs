use tracing::warn;

use crate::error::{DiscoveryError, Result};
use crate::host::{Host, Launcher};
use crate::models::ListItem;
use crate::session::{ProjectSource, SessionCache, Snapshot};

/// The "recent JetBrains projects" list feature
///
/// Per-app problems never reach the host; they are already filtered out by the
/// aggregation pass. A total discovery failure is shown as a notification with an
/// empty list, and also returned so callers can react to it.
pub struct QuickJet<S, L> {
    session: SessionCache<S>,
    launcher: L,
}

impl<S: ProjectSource, L: Launcher> QuickJet<S, L> {
    pub fn new(source: S, launcher: L) -> Self {
        Self { session: SessionCache::new(source), launcher }
    }

    pub fn session(&self) -> &SessionCache<S> {
        &self.session
    }

    /// Render the full list
    pub async fn on_enter<H: Host>(&self, host: &mut H) -> Result<Snapshot> {
        match self.session.list().await {
            Ok(items) => {
                host.render(&items);
                Ok(items)
            }
            Err(e) => Err(report(host, e)),
        }
    }

    /// Render the items matching `term`
    pub async fn on_search<H: Host>(&self, term: &str, host: &mut H) -> Result<Vec<ListItem>> {
        match self.session.search(term).await {
            Ok(items) => {
                host.render(&items);
                Ok(items)
            }
            Err(e) => Err(report(host, e)),
        }
    }

    /// Open `item` in its IDE and close the host
    pub async fn on_select<H: Host>(&self, item: &ListItem, host: &mut H) -> Result<()> {
        let launched = self.session.select(item, &self.launcher).await;
        if let Err(e) = &launched {
            warn!(error = %e, "launch failed");
            host.notify(&e.to_string());
        }
        host.close();
        launched
    }
}

fn report<H: Host>(host: &mut H, error: DiscoveryError) -> DiscoveryError {
    warn!(error = %error, "project discovery failed");
    host.notify(&format!("Could not find JetBrains Toolbox apps: {}", error));
    host.render(&[]);
    error
}
