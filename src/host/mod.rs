//! Integration surface for the list-style host application
//!
//! The host renders items, shows notifications and closes its window; the
//! [`QuickJet`] plugin maps the host's enter/search/select callbacks onto a
//! [`SessionCache`](crate::session::SessionCache). Launching goes through a
//! [`Launcher`] so the process-spawn collaborator can be swapped out.

pub mod launcher;
pub mod plugin;

use std::path::Path;

use crate::error::Result;
use crate::models::ListItem;

pub use launcher::DetachedLauncher;
pub use plugin::QuickJet;

/// The list-mode UI shell the plugin runs inside
pub trait Host {
    fn render(&mut self, items: &[ListItem]);
    fn notify(&mut self, message: &str);
    fn close(&mut self);
}

/// Starts an application binary with a project path as its only argument
pub trait Launcher {
    fn launch(&self, exec: &Path, project: &Path) -> Result<()>;
}
