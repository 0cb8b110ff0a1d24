use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::Result;
use crate::utils::{Environment, Platform, ensure_dir, resolve_apps_root};

pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_APP_TIMEOUT: Duration = Duration::from_secs(5);

const ENV_APPS_ROOT: &str = "QUICKJET_APPS_ROOT";
const ENV_CONCURRENCY: &str = "QUICKJET_CONCURRENCY";
const ENV_APP_TIMEOUT_MS: &str = "QUICKJET_APP_TIMEOUT_MS";

/// Everything an aggregation pass needs to know about its surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub platform: Platform,
    pub environment: Environment,
    /// Use this directory instead of the platform's Toolbox apps root
    pub apps_root_override: Option<PathBuf>,
    /// Maximum number of apps processed at once
    pub concurrency: usize,
    /// Time budget for reading one app's descriptors
    pub app_timeout: Duration,
}

impl DiscoveryConfig {
    pub fn new(platform: Platform, environment: Environment) -> Self {
        Self {
            platform,
            environment,
            apps_root_override: None,
            concurrency: DEFAULT_CONCURRENCY,
            app_timeout: DEFAULT_APP_TIMEOUT,
        }
    }

    /// Configuration for the current process
    ///
    /// Starts from the compile-time platform and the process environment, then
    /// applies `QUICKJET_APPS_ROOT`, `QUICKJET_CONCURRENCY` and
    /// `QUICKJET_APP_TIMEOUT_MS` when set.
    pub fn from_env() -> Self {
        Self::new(Platform::current(), Environment::from_process())
            .with_overrides(|name| env::var(name).ok())
    }

    /// Apply `QUICKJET_*` overrides looked up through `lookup`
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(root) = lookup(ENV_APPS_ROOT).filter(|v| !v.is_empty()) {
            self.apps_root_override = Some(PathBuf::from(root));
        }

        if let Some(raw) = lookup(ENV_CONCURRENCY) {
            match raw.trim().parse::<usize>() {
                Ok(n) => self = self.with_concurrency(n),
                Err(e) => warn!(variable = ENV_CONCURRENCY, value = %raw, error = %e, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_APP_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self = self.with_app_timeout(Duration::from_millis(ms)),
                Err(e) => warn!(variable = ENV_APP_TIMEOUT_MS, value = %raw, error = %e, "ignoring invalid value"),
            }
        }

        self
    }

    pub fn with_apps_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.apps_root_override = Some(root.into());
        self
    }

    /// Set the fan-out limit (at least one app at a time)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_app_timeout(mut self, timeout: Duration) -> Self {
        self.app_timeout = timeout;
        self
    }

    /// The existing apps root this configuration points at
    ///
    /// # Errors
    ///
    /// Root-level errors only: [`crate::DiscoveryError::EnvironmentUnresolved`] or
    /// [`crate::DiscoveryError::PathNotFound`].
    pub async fn apps_root(&self) -> Result<PathBuf> {
        match &self.apps_root_override {
            Some(root) => {
                ensure_dir(root).await?;
                Ok(root.clone())
            }
            None => resolve_apps_root(self.platform, &self.environment).await,
        }
    }
}
