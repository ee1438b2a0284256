//! `render` command: one pass, HTML out.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use super::{CliConfig, feed_client};
use crate::render::{PageRenderer, index_page};
use crate::roster::load_roster;

/// Run one rendering pass and write the dashboard HTML.
#[derive(Args)]
pub struct RenderCommand {
    /// Write the page to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, cli_config: &CliConfig) -> Result<()> {
        let config = cli_config.load_monitor_config().await?;
        let client = feed_client(&config)?;
        let renderer = PageRenderer::new()?;

        let projects = load_roster(&config.roster).await?;
        let html = index_page(&renderer, &client, &projects).await?;

        match self.output {
            Some(path) => {
                fs::write(&path, html)
                    .await
                    .with_context(|| format!("Failed to write dashboard to {}", path.display()))?;
                info!("Wrote dashboard to {}", path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}
