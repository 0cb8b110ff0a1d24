//! QuickJet - Find and open recently used JetBrains Toolbox projects
//!
//! This library discovers the IDEs installed by JetBrains Toolbox and merges their
//! recent-project histories into one searchable list. It supports:
//!
//! - Resolving the Toolbox apps directory per platform
//! - Reading each app's `.history.json` to find its executable, icon and config directory
//! - Parsing `recentProjects.xml` / `recentProjectDirectories.xml` into project entries
//! - Aggregating all apps into one list, newest first, isolating per-app failures
//! - Caching the list per session, searching it, and launching a selected project
//!
//! # Example
//!
//! ```no_run
//! use quickjet::{DiscoveryConfig, SessionCache, ToolboxSource};
//!
//! # async fn demo() -> Result<(), quickjet::DiscoveryError> {
//! let cache = SessionCache::new(ToolboxSource::new(DiscoveryConfig::from_env()));
//! for item in cache.search("backend").await? {
//!     println!("{} - {}", item.title, item.project_path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::DiscoveryConfig;
pub use error::DiscoveryError;
pub use host::{DetachedLauncher, Host, Launcher, QuickJet};
pub use indexer::{aggregate, list_installed_apps};
pub use models::{AppInfo, InstalledApp, ListItem, RecentProjectEntry};
pub use parsers::{parse_recent_projects, read_app_info};
pub use session::{ProjectSource, SessionCache, Snapshot, ToolboxSource, filter_items};
pub use utils::{Environment, Platform, file_uri, project_name_from_path, resolve_apps_root};
