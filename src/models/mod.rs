//! Data models for Toolbox project discovery.
//!
//! - [`InstalledApp`] - One application directory under the Toolbox apps root
//! - [`AppInfo`] - Launch metadata resolved from an app's history descriptor
//! - [`RecentProjectEntry`] - One project recorded in an app's recent-projects descriptor
//! - [`ListItem`] - The flattened, host-ready unit served by the session cache
//!
//! All of these are value objects built fresh on every aggregation pass.

pub mod app;
pub mod item;
pub mod project;

pub use app::{AppInfo, InstalledApp};
pub use item::ListItem;
pub use project::RecentProjectEntry;
