//! Terminal reports: `rank`, `stats` and `laggards`.
//!
//! Each report runs one rendering pass and prints either a colored text
//! table or pretty JSON.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{CliConfig, feed_client};
use crate::feed::{FeedClient, ReqwestFetcher};
use crate::freshness::{DashboardStats, RankedProject, RenderPass};
use crate::render::LaggardRow;
use crate::roster::{ProjectRecord, load_roster};

/// Output format flag shared by the reports.
#[derive(Args)]
pub struct FormatArgs {
    /// Output format: text or json.
    #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

impl FormatArgs {
    fn is_json(&self) -> bool {
        self.format == "json"
    }
}

async fn load(cli_config: &CliConfig) -> Result<(FeedClient<ReqwestFetcher>, Vec<ProjectRecord>)> {
    let config = cli_config.load_monitor_config().await?;
    let client = feed_client(&config)?;
    let projects = load_roster(&config.roster).await?;
    Ok((client, projects))
}

/// Print projects ranked from most to least recently active.
#[derive(Args)]
pub struct RankCommand {
    #[command(flatten)]
    format: FormatArgs,
}

impl RankCommand {
    pub async fn execute(self, cli_config: &CliConfig) -> Result<()> {
        let (client, projects) = load(cli_config).await?;

        let mut pass = RenderPass::new(&client);
        let ranked = pass.rank_projects(&projects).await?;
        pass.finish();

        if self.format.is_json() {
            println!("{}", serde_json::to_string_pretty(&rank_json(&ranked))?);
        } else {
            print_rank_table(&ranked);
        }
        Ok(())
    }
}

fn rank_json(ranked: &[RankedProject<'_>]) -> Vec<serde_json::Value> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::json!({
                "rank": i + 1,
                "name": entry.project.name,
                "score": entry.score,
            })
        })
        .collect()
}

fn print_rank_table(ranked: &[RankedProject<'_>]) {
    if ranked.is_empty() {
        println!("No projects in roster.");
        return;
    }

    println!("{:>4}  {:>10}  {}", "#".cyan().bold(), "Score".cyan().bold(), "Project".cyan().bold());
    println!("{}", "-".repeat(48).bright_black());
    for (i, entry) in ranked.iter().enumerate() {
        println!("{:>4}  {:>10.2}  {}", i + 1, entry.score, entry.project.name);
    }
}

/// Print roster statistics.
#[derive(Args)]
pub struct StatsCommand {
    #[command(flatten)]
    format: FormatArgs,
}

impl StatsCommand {
    pub async fn execute(self, cli_config: &CliConfig) -> Result<()> {
        let (client, projects) = load(cli_config).await?;

        let mut pass = RenderPass::new(&client);
        let stats = pass.dashboard_stats(&projects).await?;
        pass.finish();

        if self.format.is_json() {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_stats(&stats);
        }
        Ok(())
    }
}

fn print_stats(stats: &DashboardStats) {
    let lines = [
        ("Projects", stats.num_projects),
        ("Members", stats.members),
        ("Blog, source code and wiki", stats.all_three),
        ("None of the three", stats.none),
        ("Active in the last week", stats.last_week),
    ];
    for (label, value) in lines {
        println!("{:<28} {}", format!("{label}:").bold(), value);
    }
}

/// Print projects with no blog or source code activity in two weeks.
#[derive(Args)]
pub struct LaggardsCommand {
    #[command(flatten)]
    format: FormatArgs,
}

impl LaggardsCommand {
    pub async fn execute(self, cli_config: &CliConfig) -> Result<()> {
        let (client, projects) = load(cli_config).await?;

        let mut pass = RenderPass::new(&client);
        let rows = pass.laggard_rows(&projects).await?;
        pass.finish();

        if self.format.is_json() {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_laggards(&rows);
        }
        Ok(())
    }
}

fn print_laggards(rows: &[LaggardRow]) {
    if rows.is_empty() {
        println!("{}", "No laggards: every project was active in the last two weeks.".green());
        return;
    }

    println!(
        "{:<32} {:>10} {:>12}",
        "Project".cyan().bold(),
        "Blog age".cyan().bold(),
        "Source age".cyan().bold()
    );
    println!("{}", "-".repeat(56).bright_black());
    for row in rows {
        println!("{:<32} {:>10} {:>12}", row.name, row.blog_age, row.source_age);
    }
    println!("{}: {} projects", "Total".yellow().bold(), rows.len());
}
