use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DiscoveryError, Result};

/// Host operating system family, resolved once and passed explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
}

impl Platform {
    /// Platform the binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOS
        } else {
            Self::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOS => "macos",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "macos" | "mac" | "darwin" => Ok(Self::MacOS),
            "linux" => Ok(Self::Linux),
            other => Err(format!("unknown platform '{}' (expected windows, macos or linux)", other)),
        }
    }
}

/// Snapshot of the environment variables used for path templating
///
/// Captured once so the rest of the pipeline never reads the process
/// environment directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub home: Option<PathBuf>,
    pub app_data: Option<PathBuf>,
    pub local_app_data: Option<PathBuf>,
    pub xdg_data_home: Option<PathBuf>,
}

impl Environment {
    /// Read `HOME`/`USERPROFILE`, `APPDATA`, `LOCALAPPDATA` and `XDG_DATA_HOME`
    pub fn from_process() -> Self {
        Self {
            home: var_path("HOME").or_else(|| var_path("USERPROFILE")).or_else(dirs::home_dir),
            app_data: var_path("APPDATA"),
            local_app_data: var_path("LOCALAPPDATA"),
            xdg_data_home: var_path("XDG_DATA_HOME"),
        }
    }

    /// Environment with only a home directory set
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: Some(home.into()), ..Self::default() }
    }

    pub fn home(&self) -> Result<&Path> {
        self.home.as_deref().ok_or(DiscoveryError::EnvironmentUnresolved { variable: "HOME" })
    }

    pub fn app_data(&self) -> Result<&Path> {
        self.app_data.as_deref().ok_or(DiscoveryError::EnvironmentUnresolved { variable: "APPDATA" })
    }

    pub fn local_app_data(&self) -> Result<&Path> {
        self.local_app_data
            .as_deref()
            .ok_or(DiscoveryError::EnvironmentUnresolved { variable: "LOCALAPPDATA" })
    }
}

fn var_path(name: &str) -> Option<PathBuf> {
    env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}
