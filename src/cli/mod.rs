//! Terminal host for the recent-projects list
//!
//! Stands in for a launcher UI: `list` and `search` render the session's items,
//! `open` selects one of them.

pub mod commands;

pub use commands::{Cli, Commands, TerminalHost, run};
