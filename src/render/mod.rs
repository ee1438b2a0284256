//! HTML rendering for the dashboard pages.
//!
//! Rendering is split in two steps. A [`RenderPass`] turns the roster into
//! plain view data ([`RenderedTable`], [`LaggardRow`]), doing all network
//! access. [`PageRenderer`] then feeds that data through Tera templates
//! compiled into the binary. Templates never call back into the engine.
//!
//! The `*_page` functions combine both steps into one pass with a fresh feed
//! cache, which is what the server and the `render` command use.

pub mod columns;

pub use columns::{Column, value_class};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context as TeraContext, Tera};
use tracing::{debug, info};

use crate::constants::{COLOR_KEY_MAX_DAYS, LAGGARD_THRESHOLD_DAYS};
use crate::core::MonitorResult;
use crate::feed::{FeedClient, HttpFetch};
use crate::freshness::{DashboardStats, RenderPass, color_from_age};
use crate::roster::ProjectRecord;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const KEY_TEMPLATE: &str = include_str!("templates/key.html");
const LAGGARDS_TEMPLATE: &str = include_str!("templates/laggards.html");

/// Format used for the "Generated" footer.
const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Escaped HTML body
    pub html: String,
    /// `yes`, `no` or empty
    pub class: &'static str,
    /// Inline style, empty when the cell is not colored
    pub style: String,
}

/// One project row, in ranked order.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    /// Project name, unescaped
    pub name: String,
    /// Staleness score the row was ranked by
    pub score: f64,
    /// One cell per [`Column::ALL`] entry
    pub cells: Vec<Cell>,
}

/// The dashboard table.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedTable {
    /// Column titles
    pub headers: Vec<&'static str>,
    /// Rows, freshest first
    pub rows: Vec<TableRow>,
}

/// One line of the laggards report.
#[derive(Debug, Clone, Serialize)]
pub struct LaggardRow {
    /// Project name
    pub name: String,
    /// Project website
    pub website: Option<String>,
    /// Contributor names
    pub contributors: Vec<String>,
    /// Blog age in days, one decimal
    pub blog_age: String,
    /// Background color for the blog age
    pub blog_style: String,
    /// Source code age in days, one decimal
    pub source_age: String,
    /// Background color for the source code age
    pub source_style: String,
}

/// One line of the color legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorKeyRow {
    /// Age in whole days
    pub days: u32,
    /// `#rrgg00`
    pub hex: String,
    /// `background-color:#rrgg00;`
    pub style: String,
}

/// Color legend over `0..=COLOR_KEY_MAX_DAYS`.
#[must_use]
pub fn color_key() -> Vec<ColorKeyRow> {
    (0..=COLOR_KEY_MAX_DAYS)
        .map(|days| {
            let color = color_from_age(f64::from(days));
            ColorKeyRow {
                days,
                hex: color.to_hex(),
                style: color.css(),
            }
        })
        .collect()
}

impl<F: HttpFetch + Sync> RenderPass<'_, F> {
    /// Rank the roster and render every cell.
    ///
    /// For each cell the class, then the style, then the body is computed,
    /// so an unsupported repository type fails the pass even though its
    /// body would render.
    pub async fn build_table(&mut self, projects: &[ProjectRecord]) -> MonitorResult<RenderedTable> {
        let ranked = self.rank_projects(projects).await?;

        let mut rows = Vec::with_capacity(ranked.len());
        for entry in ranked {
            let mut cells = Vec::with_capacity(Column::ALL.len());
            for column in Column::ALL {
                let class = value_class(entry.project, column);
                let style = self.value_style(entry.project, column).await?;
                let html = self.render_cell(entry.project, column).await?;
                cells.push(Cell {
                    html,
                    class,
                    style,
                });
            }
            rows.push(TableRow {
                name: entry.project.name.clone(),
                score: entry.score,
                cells,
            });
        }

        Ok(RenderedTable {
            headers: Column::ALL.iter().map(|column| column.title()).collect(),
            rows,
        })
    }

    /// Laggards with their ages and colors.
    pub async fn laggard_rows(&mut self, projects: &[ProjectRecord]) -> MonitorResult<Vec<LaggardRow>> {
        let laggards = self.laggards(projects).await?;

        let mut rows = Vec::with_capacity(laggards.len());
        for project in laggards {
            let blog_age = self.project_blog_age(project).await?;
            let source_age = self.project_source_age(project).await?;
            rows.push(LaggardRow {
                name: project.name.clone(),
                website: project.website.clone(),
                contributors: project.contributors.as_ref().map(|c| c.names()).unwrap_or_default(),
                blog_age: format!("{blog_age:.1}"),
                blog_style: color_from_age(blog_age).css(),
                source_age: format!("{source_age:.1}"),
                source_style: color_from_age(source_age).css(),
            });
        }
        Ok(rows)
    }
}

/// Tera-backed page renderer with the built-in templates.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Compile the built-in templates.
    pub fn new() -> MonitorResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("index.html", INDEX_TEMPLATE),
            ("key.html", KEY_TEMPLATE),
            ("laggards.html", LAGGARDS_TEMPLATE),
        ])?;
        Ok(Self {
            tera,
        })
    }

    /// Dashboard page: statistics above the ranked table.
    pub fn render_index(
        &self,
        table: &RenderedTable,
        stats: &DashboardStats,
        generated_at: DateTime<Utc>,
    ) -> MonitorResult<String> {
        let mut context = TeraContext::new();
        context.insert("table", table);
        context.insert("stats", stats);
        context.insert("generated_at", &generated_at.format(GENERATED_AT_FORMAT).to_string());
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Color legend page.
    pub fn render_key(&self) -> MonitorResult<String> {
        let mut context = TeraContext::new();
        context.insert("rows", &color_key());
        Ok(self.tera.render("key.html", &context)?)
    }

    /// Laggards page.
    pub fn render_laggards(&self, rows: &[LaggardRow], generated_at: DateTime<Utc>) -> MonitorResult<String> {
        let mut context = TeraContext::new();
        context.insert("rows", rows);
        context.insert("threshold_days", &LAGGARD_THRESHOLD_DAYS);
        context.insert("generated_at", &generated_at.format(GENERATED_AT_FORMAT).to_string());
        Ok(self.tera.render("laggards.html", &context)?)
    }
}

/// Run a full pass over the roster and render the dashboard page.
pub async fn index_page<F: HttpFetch + Sync>(
    renderer: &PageRenderer,
    client: &FeedClient<F>,
    projects: &[ProjectRecord],
) -> MonitorResult<String> {
    let mut pass = RenderPass::new(client);
    let table = pass.build_table(projects).await?;
    let stats = pass.dashboard_stats(projects).await?;
    let html = renderer.render_index(&table, &stats, pass.now())?;

    info!("Rendered dashboard for {} projects", projects.len());
    pass.finish();
    Ok(html)
}

/// Run a full pass over the roster and render the laggards page.
pub async fn laggards_page<F: HttpFetch + Sync>(
    renderer: &PageRenderer,
    client: &FeedClient<F>,
    projects: &[ProjectRecord],
) -> MonitorResult<String> {
    let mut pass = RenderPass::new(client);
    let rows = pass.laggard_rows(projects).await?;
    let html = renderer.render_laggards(&rows, pass.now())?;

    debug!("{} of {} projects are lagging", rows.len(), projects.len());
    pass.finish();
    Ok(html)
}
