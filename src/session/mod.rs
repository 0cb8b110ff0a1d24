//! Session cache and query surface
//!
//! [`SessionCache`] holds at most one aggregation snapshot. It starts EMPTY, becomes
//! POPULATED on the first [`list`](SessionCache::list) or
//! [`search`](SessionCache::search), and returns to EMPTY on
//! [`select`](SessionCache::select) or [`invalidate`](SessionCache::invalidate).
//! There is no background refresh.
//!
//! The slot is guarded by an async mutex that stays locked while an aggregation runs,
//! so callers arriving mid-pass wait for that pass and share its snapshot instead of
//! starting a second filesystem scan.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::host::Launcher;
use crate::indexer::aggregate;
use crate::models::ListItem;

/// One aggregation result, shared between the cache and its readers
pub type Snapshot = Arc<Vec<ListItem>>;

/// Anything that can produce a fresh, sorted list of recent projects
pub trait ProjectSource {
    fn aggregate(&self) -> impl Future<Output = Result<Vec<ListItem>>> + Send;
}

/// Aggregates the Toolbox installation described by a [`DiscoveryConfig`]
#[derive(Debug, Clone)]
pub struct ToolboxSource {
    config: DiscoveryConfig,
}

impl ToolboxSource {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }
}

impl ProjectSource for ToolboxSource {
    fn aggregate(&self) -> impl Future<Output = Result<Vec<ListItem>>> + Send {
        aggregate(&self.config)
    }
}

#[derive(Debug, Default)]
enum CacheState {
    #[default]
    Empty,
    Populated(Snapshot),
}

pub struct SessionCache<S> {
    source: S,
    state: Mutex<CacheState>,
}

impl<S: ProjectSource> SessionCache<S> {
    pub fn new(source: S) -> Self {
        Self { source, state: Mutex::new(CacheState::Empty) }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cached snapshot, aggregating first if the cache is empty
    ///
    /// A failed aggregation leaves the cache empty and returns the error.
    pub async fn list(&self) -> Result<Snapshot> {
        let mut state = self.state.lock().await;
        if let CacheState::Populated(snapshot) = &*state {
            return Ok(Arc::clone(snapshot));
        }

        debug!("session cache empty, aggregating");
        let snapshot: Snapshot = Arc::new(self.source.aggregate().await?);
        *state = CacheState::Populated(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Items of the current snapshot whose title or description contains `term`,
    /// ignoring case
    pub async fn search(&self, term: &str) -> Result<Vec<ListItem>> {
        let snapshot = self.list().await?;
        Ok(filter_items(&snapshot, term))
    }

    /// Launch `item` through `launcher`, then drop the cached snapshot
    ///
    /// The cache is invalidated even when the launch fails.
    pub async fn select<L: Launcher>(&self, item: &ListItem, launcher: &L) -> Result<()> {
        let launched = launcher.launch(&item.exec_path, &item.project_path);
        self.invalidate().await;
        launched
    }

    pub async fn invalidate(&self) {
        *self.state.lock().await = CacheState::Empty;
    }

    pub async fn is_populated(&self) -> bool {
        matches!(*self.state.lock().await, CacheState::Populated(_))
    }
}

/// Case-insensitive substring filter over title and description
///
/// An empty term matches everything.
pub fn filter_items(items: &[ListItem], term: &str) -> Vec<ListItem> {
    let needle = term.to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).cloned().collect()
}
