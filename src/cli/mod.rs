//! Command-line interface for the RCOS project monitor.
//!
//! # Available Commands
//!
//! - `render` - Run one pass and write the dashboard HTML
//! - `serve` - Serve the dashboard over HTTP
//! - `rank` - Print projects ranked by staleness
//! - `stats` - Print roster statistics
//! - `laggards` - Print projects quiet for more than two weeks
//! - `key` - Print the color legend
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors
//! - `--config` - Path to a `monitor.toml`
//! - `--roster` - Path to the roster YAML, overriding the config file
//!
//! # Example
//!
//! ```bash
//! rcos-monitor --roster projects.yml rank
//! rcos-monitor render --output dashboard.html
//! rcos-monitor --verbose serve --bind 0.0.0.0:8080
//! ```

mod key;
mod render;
mod report;
mod serve;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::MonitorConfig;
use crate::feed::{FeedClient, ReqwestFetcher};

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive command execution with
/// explicit settings.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter, used when `RUST_LOG` is unset.
    ///
    /// `None` leaves logging uninitialized.
    pub log_level: Option<String>,

    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,

    /// Roster file overriding the configuration file.
    pub roster: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with no log level and no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global `tracing` subscriber.
    ///
    /// `RUST_LOG` wins over the level chosen by `--verbose`/`--quiet`. Logs
    /// go to stderr so command output on stdout stays clean. Calling this
    /// twice is harmless.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the monitor configuration and apply the roster override.
    pub async fn load_monitor_config(&self) -> Result<MonitorConfig> {
        let config = MonitorConfig::load(self.config_path.as_deref()).await?;
        Ok(config.with_overrides(self.roster.clone(), None))
    }
}

/// Build the production feed client from configuration.
pub(crate) fn feed_client(config: &MonitorConfig) -> Result<FeedClient<ReqwestFetcher>> {
    let fetcher = ReqwestFetcher::new(&config.user_agent, config.request_timeout())?;
    Ok(FeedClient::new(fetcher))
}

/// Main CLI structure for `rcos-monitor`.
#[derive(Parser)]
#[command(
    name = "rcos-monitor",
    about = "RCOS project monitor - rank projects by blog and commit activity",
    version,
    author,
    long_about = "Reads a roster of open source projects, checks their blogs and repository feeds, and ranks them from most to least recently active."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging, per-fetch and per-project details).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `$RCOS_MONITOR_CONFIG`, then `./monitor.toml`.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the roster YAML file.
    #[arg(long, global = true, value_name = "FILE")]
    roster: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one rendering pass and write the dashboard HTML.
    Render(render::RenderCommand),

    /// Serve the dashboard over HTTP.
    Serve(serve::ServeCommand),

    /// Print projects ranked from most to least recently active.
    Rank(report::RankCommand),

    /// Print roster statistics.
    Stats(report::StatsCommand),

    /// Print projects with no blog or source code activity in two weeks.
    Laggards(report::LaggardsCommand),

    /// Print the age to color legend.
    Key(key::KeyCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` selects `debug`, `--quiet` selects `error`, otherwise `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
            roster: self.roster.clone(),
        }
    }

    /// Execute the CLI with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Render(cmd) => cmd.execute(&config).await,
            Commands::Serve(cmd) => cmd.execute(&config).await,
            Commands::Rank(cmd) => cmd.execute(&config).await,
            Commands::Stats(cmd) => cmd.execute(&config).await,
            Commands::Laggards(cmd) => cmd.execute(&config).await,
            Commands::Key(cmd) => cmd.execute(),
        }
    }
}
