//! Discovery and aggregation of recent projects across Toolbox apps
//!
//! # Error Handling Strategy
//!
//! - **Root-level failures**: an unresolvable or unreadable apps root aborts the pass,
//!   since no partial result is possible.
//! - **App-level failures**: a missing or malformed descriptor, an unresolved config
//!   template, or a timeout skips that one app with a warning. An app without any
//!   recorded projects contributes zero items and is not counted as skipped.
//! - **Summary reporting**: every pass logs how many projects were aggregated from how
//!   many apps, and how many apps were skipped.

pub mod aggregator;
pub mod app_discovery;

pub use aggregator::{aggregate, sort_newest_first};
pub use app_discovery::list_installed_apps;
