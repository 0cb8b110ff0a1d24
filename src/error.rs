//! Error taxonomy for project discovery
//!
//! Errors fall into two groups:
//!
//! - **Root-level** ([`DiscoveryError::is_root_level`]): the apps root cannot be
//!   resolved or read, so no partial result is possible. These reach the host.
//! - **Per-app**: a single installation is broken. The aggregator logs these and
//!   skips the app; they never reach the host.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("environment variable {variable} is not set")]
    EnvironmentUnresolved { variable: &'static str },

    #[error("cannot expand {template}: environment variable {variable} is not set")]
    TemplateUnresolved { variable: &'static str, template: String },

    #[error("Toolbox apps directory not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("failed to read Toolbox apps directory {}: {source}", path.display())]
    AppsRootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no .history.json found in {}", .0.display())]
    HistoryMissing(PathBuf),

    #[error("malformed history descriptor {}: {reason}", path.display())]
    HistoryMalformed { path: PathBuf, reason: String },

    #[error("no recent projects descriptor found in {}", .0.display())]
    RecentConfigNotFound(PathBuf),

    #[error("no recent projects recorded in {}", .0.display())]
    NoRecentProjects(PathBuf),

    #[error("malformed recent projects descriptor {}: {reason}", path.display())]
    DescriptorMalformed { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("app {app} did not respond within {}ms", timeout.as_millis())]
    AppTimedOut { app: String, timeout: Duration },

    #[error("failed to launch {}: {source}", exec.display())]
    LaunchFailed {
        exec: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiscoveryError {
    /// Whether this error aborts a whole discovery run rather than a single app
    pub fn is_root_level(&self) -> bool {
        matches!(
            self,
            Self::EnvironmentUnresolved { .. }
                | Self::PathNotFound(_)
                | Self::AppsRootUnreadable { .. }
        )
    }

    /// Rescope an unset-variable error to the per-app path `template` that needed it
    pub(crate) fn in_template(self, template: &str) -> Self {
        match self {
            Self::EnvironmentUnresolved { variable } => {
                Self::TemplateUnresolved { variable, template: template.to_string() }
            }
            other => other,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_level_classification() {
        assert!(DiscoveryError::PathNotFound(PathBuf::from("/missing")).is_root_level());
        assert!(DiscoveryError::EnvironmentUnresolved { variable: "HOME" }.is_root_level());
        assert!(!DiscoveryError::HistoryMissing(PathBuf::from("/apps/IDEA-U/ch-0")).is_root_level());
        assert!(!DiscoveryError::NoRecentProjects(PathBuf::from("/x.xml")).is_root_level());
    }

    #[test]
    fn test_template_errors_are_per_app() {
        let err = DiscoveryError::EnvironmentUnresolved { variable: "APPDATA" }
            .in_template("$APPDATA/JetBrains/Rider");

        assert!(matches!(err, DiscoveryError::TemplateUnresolved { variable: "APPDATA", .. }));
        assert!(!err.is_root_level());
        assert_eq!(
            err.to_string(),
            "cannot expand $APPDATA/JetBrains/Rider: environment variable APPDATA is not set"
        );

        let other = DiscoveryError::PathNotFound(PathBuf::from("/missing")).in_template("$HOME");
        assert!(matches!(other, DiscoveryError::PathNotFound(_)));
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = DiscoveryError::RecentConfigNotFound(PathBuf::from("/cfg/options"));
        assert!(err.to_string().contains("/cfg/options"));

        let err = DiscoveryError::AppTimedOut {
            app: "IDEA-U".to_string(),
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "app IDEA-U did not respond within 250ms");
    }
}
