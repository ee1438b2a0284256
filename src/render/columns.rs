//! Per-cell rendering for the dashboard table.
//!
//! Each cell has three parts: its HTML body, a CSS class marking presence
//! (`yes`/`no`) and an inline background color for the activity columns.
//! Bodies are assembled here and inserted into the page unescaped, so every
//! roster value passes through [`tera::escape_html`] first.

use serde::Serialize;
use tera::escape_html;

use crate::core::MonitorResult;
use crate::feed::HttpFetch;
use crate::freshness::{RenderPass, color_from_age};
use crate::roster::{Contributors, ProjectRecord, RepoKind};

/// Separator between list entries in a cell.
const LIST_SEPARATOR: &str = "\n<br>\n";

/// Dashboard columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    /// Project name, linked to the website
    ProjectName,
    /// Contributor names
    Contributors,
    /// Blog link and last post date
    Blog,
    /// Source code link and last commit date
    SourceCode,
    /// Wiki link
    Wiki,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 5] =
        [Column::ProjectName, Column::Contributors, Column::Blog, Column::SourceCode, Column::Wiki];

    /// Header text, matching the roster key.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Column::ProjectName => "Project Name",
            Column::Contributors => "Contributors",
            Column::Blog => "Blog",
            Column::SourceCode => "Source Code",
            Column::Wiki => "Wiki",
        }
    }
}

fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(href), label)
}

/// Free-form value: anything mentioning `http` becomes a `Yes` link.
fn plain_value(value: &str) -> String {
    if value.contains("http") {
        link(value, "Yes")
    } else {
        escape_html(value)
    }
}

/// Presence class for a cell.
///
/// Name and contributor cells are never classed. Blog cells and source code
/// cells backed by a repository are colored by age instead.
#[must_use]
pub fn value_class(project: &ProjectRecord, column: Column) -> &'static str {
    match column {
        Column::ProjectName | Column::Contributors => "",
        Column::Blog if project.blog.is_none() => "no",
        Column::Blog => "",
        Column::SourceCode if project.source_code.is_none() => "no",
        Column::SourceCode if project.repo.is_some() => "",
        Column::SourceCode => "yes",
        Column::Wiki if project.wiki.is_none() => "no",
        Column::Wiki => "yes",
    }
}

impl<F: HttpFetch + Sync> RenderPass<'_, F> {
    /// HTML body for one cell.
    pub async fn render_cell(&mut self, project: &ProjectRecord, column: Column) -> MonitorResult<String> {
        match column {
            Column::ProjectName => Ok(match &project.website {
                Some(website) => link(website, &escape_html(&project.name)),
                None => escape_html(&project.name),
            }),
            Column::Contributors => Ok(match &project.contributors {
                None => "No".to_string(),
                Some(Contributors::Names(names)) => {
                    names.iter().map(|name| escape_html(name)).collect::<Vec<_>>().join(LIST_SEPARATOR)
                }
                Some(Contributors::Joined(joined)) => plain_value(joined),
            }),
            Column::Blog => match &project.blog {
                None => Ok("No".to_string()),
                Some(blog) => {
                    let label = self.last_update_label(blog).await?;
                    Ok(format!("{} ({})", link(blog.web_url(), "Yes"), label))
                }
            },
            Column::SourceCode => match &project.source_code {
                None => Ok("No".to_string()),
                Some(source) => self.render_source_code(project, source).await,
            },
            Column::Wiki => Ok(match &project.wiki {
                None => "No".to_string(),
                Some(wiki) => plain_value(wiki),
            }),
        }
    }

    // Unsupported repository types fall back to a plain link here; the age
    // lookup is left to `value_style`.
    async fn render_source_code(&mut self, project: &ProjectRecord, source: &str) -> MonitorResult<String> {
        let Some(repo) = &project.repo else {
            return Ok(link(source, "Yes"));
        };

        match repo.kind() {
            RepoKind::RssEnabled => {
                let label = self.repo_update_label(repo).await?.unwrap_or_default();
                Ok(format!("{} ({})", link(source, &escape_html(&repo.repo_type)), label))
            }
            RepoKind::PlainGit => Ok(format!("{} (Unavailable)", link(source, "git"))),
            RepoKind::Unsupported => Ok(link(source, "Yes")),
        }
    }

    /// Inline background color for the activity columns, empty otherwise.
    pub async fn value_style(&mut self, project: &ProjectRecord, column: Column) -> MonitorResult<String> {
        match (column, &project.blog, &project.repo) {
            (Column::Blog, Some(blog), _) => Ok(color_from_age(self.blog_age(blog).await?).css()),
            (Column::SourceCode, _, Some(repo)) => Ok(color_from_age(self.repo_age(repo).await?).css()),
            _ => Ok(String::new()),
        }
    }
}
