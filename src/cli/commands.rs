use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::config::DiscoveryConfig;
use crate::host::{DetachedLauncher, Host, QuickJet};
use crate::models::ListItem;
use crate::session::ToolboxSource;
use crate::utils::{Platform, format_age, format_path_with_tilde};

#[derive(Parser)]
#[command(name = "quickjet")]
#[command(version = "0.1.0")]
#[command(about = "Find and open recent JetBrains Toolbox projects", long_about = None)]
pub struct Cli {
    /// Toolbox apps directory (defaults to the platform's location)
    #[arg(long, global = true, value_name = "DIR")]
    pub apps_root: Option<PathBuf>,

    /// Directory layout to assume: windows, macos or linux
    #[arg(long, global = true)]
    pub platform: Option<Platform>,

    /// Maximum number of apps read at once
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Time budget per app, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recent projects, newest first (default)
    List {
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recent projects whose name or description contains TERM
    Search {
        term: String,
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the project at position INDEX (1-based) in its IDE
    Open {
        index: usize,
        /// Pick from the results of this search instead of the full list
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Human,
    Json,
    Quiet,
}

/// [`Host`] that prints to the terminal
pub struct TerminalHost {
    output: Output,
    home: Option<PathBuf>,
    closed: bool,
}

impl TerminalHost {
    fn new(output: Output, home: Option<PathBuf>) -> Self {
        Self { output, home, closed: false }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn print_human(&self, items: &[ListItem]) {
        if items.is_empty() {
            println!("No recent projects found");
            return;
        }

        let now = Utc::now();
        for (position, item) in items.iter().enumerate() {
            println!("{:>3}. {}  ({})", position + 1, item.title, format_age(item.timestamp_millis, &now));
            println!("     {}", format_path_with_tilde(&item.project_path, self.home.as_deref()));
        }
    }
}

impl Host for TerminalHost {
    fn render(&mut self, items: &[ListItem]) {
        match self.output {
            Output::Human => self.print_human(items),
            Output::Json => match serde_json::to_string_pretty(items) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("quickjet: failed to serialize items: {}", e),
            },
            Output::Quiet => {}
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("quickjet: {}", message);
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Layer CLI flags over the environment-derived configuration
pub fn build_config(cli: &Cli) -> DiscoveryConfig {
    let mut config = DiscoveryConfig::from_env();

    if let Some(platform) = cli.platform {
        config.platform = platform;
    }
    if let Some(root) = &cli.apps_root {
        config = config.with_apps_root(root);
    }
    if let Some(concurrency) = cli.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(ms) = cli.timeout_ms {
        config = config.with_app_timeout(Duration::from_millis(ms));
    }

    config
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli);
    let home = config.environment.home.clone();
    let plugin = QuickJet::new(ToolboxSource::new(config), DetachedLauncher);

    match cli.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => {
            let mut host = TerminalHost::new(output(json), home);
            plugin.on_enter(&mut host).await.context("Failed to list recent projects")?;
        }
        Commands::Search { term, json } => {
            let mut host = TerminalHost::new(output(json), home);
            plugin.on_search(&term, &mut host).await.context("Failed to search recent projects")?;
        }
        Commands::Open { index, search } => {
            let mut host = TerminalHost::new(Output::Quiet, home);
            let items: Vec<ListItem> = match &search {
                Some(term) => plugin.on_search(term, &mut host).await?,
                None => plugin.on_enter(&mut host).await?.to_vec(),
            };

            let item = index
                .checked_sub(1)
                .and_then(|position| items.get(position))
                .with_context(|| {
                    format!("No project at position {} ({} available)", index, items.len())
                })?;

            plugin
                .on_select(item, &mut host)
                .await
                .with_context(|| format!("Failed to open {}", item.project_path.display()))?;
            println!("Opening {} with {}", item.title, item.exec_path.display());
        }
    }

    Ok(())
}

fn output(json: bool) -> Output {
    if json { Output::Json } else { Output::Human }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "quickjet",
            "search",
            "api",
            "--platform",
            "macos",
            "--apps-root",
            "/srv/apps",
            "--concurrency",
            "2",
            "--timeout-ms",
            "750",
        ]);

        let config = build_config(&cli);
        assert_eq!(config.platform, Platform::MacOS);
        assert_eq!(config.apps_root_override, Some(PathBuf::from("/srv/apps")));
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.app_timeout, Duration::from_millis(750));
        assert!(matches!(cli.command, Some(Commands::Search { ref term, json: false }) if term == "api"));
    }

    #[test]
    fn test_invalid_platform_is_rejected() {
        assert!(Cli::try_parse_from(["quickjet", "--platform", "beos", "list"]).is_err());
    }

    #[test]
    fn test_terminal_host_close() {
        let mut host = TerminalHost::new(Output::Quiet, None);
        host.render(&[]);
        assert!(!host.is_closed());
        host.close();
        assert!(host.is_closed());
    }
}
