//! `serve` command.

use anyhow::Result;
use clap::Args;

use super::{CliConfig, feed_client};
use crate::server::{AppState, run_server};

/// Serve the dashboard over HTTP.
#[derive(Args)]
pub struct ServeCommand {
    /// Address to listen on, e.g. `0.0.0.0:8080`.
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,
}

impl ServeCommand {
    pub async fn execute(self, cli_config: &CliConfig) -> Result<()> {
        let config = cli_config.load_monitor_config().await?.with_overrides(None, self.bind);
        let client = feed_client(&config)?;

        run_server(AppState::new(config, client)?).await?;
        Ok(())
    }
}
