//! Parsers for the two descriptor formats Toolbox installations carry
//!
//! - [`history`]: the installer-maintained `.history.json` of each app, from which the
//!   active install's launch paths and config directory are resolved
//! - [`recent_projects`]: the IDE-maintained `recentProjects.xml` /
//!   `recentProjectDirectories.xml`, from which recent project entries are read
//!
//! # Error Handling Strategy
//!
//! Both parsers deserialize into typed records and fail fast with a descriptive
//! [`DiscoveryError`](crate::DiscoveryError) naming the file when a required field is
//! absent. Failures are scoped to one app: the aggregator decides whether to skip it.
//!
//! Inside a valid recent-projects descriptor, individual entries that cannot be used
//! (vanished project path, missing timestamp) are logged and dropped, so one stale
//! entry never hides the rest of an app's history.

pub mod history;
pub mod recent_projects;

pub use history::read_app_info;
pub use recent_projects::parse_recent_projects;
