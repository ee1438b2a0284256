//! Configuration for the monitor.
//!
//! Settings live in an optional TOML file. Every field has a default, so an
//! empty or missing file yields a working configuration:
//!
//! ```toml
//! roster = "projects.yml"
//! bind = "127.0.0.1:4567"
//! cache_max_age_secs = 21600
//! request_timeout_secs = 30
//! user_agent = "rcos-monitor/0.2.0"
//! ```
//!
//! # Location
//!
//! The first of these that applies is used:
//!
//! 1. The `--config` command-line flag
//! 2. The `RCOS_MONITOR_CONFIG` environment variable
//! 3. `monitor.toml` in the working directory, if it exists
//! 4. Built-in defaults
//!
//! An explicitly named file (1 or 2) must exist. Command-line flags such as
//! `--roster` and `--bind` override values from the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_CACHE_MAX_AGE_SECS, DEFAULT_ROSTER_FILE, default_request_timeout,
};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "RCOS_MONITOR_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "monitor.toml";

/// Monitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Path to the roster YAML file
    pub roster: PathBuf,

    /// Address `serve` listens on
    pub bind: String,

    /// `Cache-Control: max-age` sent with the dashboard page
    pub cache_max_age_secs: u64,

    /// Timeout for each outbound feed or page request
    pub request_timeout_secs: u64,

    /// User-Agent sent with outbound requests
    pub user_agent: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            roster: PathBuf::from(DEFAULT_ROSTER_FILE),
            bind: DEFAULT_BIND_ADDR.to_string(),
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            request_timeout_secs: default_request_timeout().as_secs(),
            user_agent: format!("rcos-monitor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl MonitorConfig {
    /// Load the configuration following the lookup order described in the module docs.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match Self::resolve_path(explicit, env_path, Path::new(DEFAULT_CONFIG_FILE)) {
            Some(path) => Self::load_from(&path).await,
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Pick the configuration file to read, if any.
    ///
    /// `fallback` is only returned when it exists.
    #[must_use]
    pub fn resolve_path(
        explicit: Option<&Path>,
        env_path: Option<PathBuf>,
        fallback: &Path,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
            return Some(path);
        }
        fallback.exists().then(|| fallback.to_path_buf())
    }

    /// Load the configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, roster: Option<PathBuf>, bind: Option<String>) -> Self {
        if let Some(roster) = roster {
            self.roster = roster;
        }
        if let Some(bind) = bind {
            self.bind = bind;
        }
        self
    }

    /// Outbound request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `Cache-Control` header value for the dashboard page.
    #[must_use]
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age_secs)
    }
}
