//! Project roster model and loading
//!
//! The roster is a YAML list of project records maintained by hand. Keys use
//! the human-readable column names of the dashboard:
//!
//! ```yaml
//! - Project Name: Observatory
//!   Website: https://observatory.example.org
//!   Contributors: Ada Lovelace, Grace Hopper
//!   Blog: https://blog.observatory.example.org
//!   Source Code: https://github.com/example/observatory
//!   Wiki: https://github.com/example/observatory/wiki
//!   Repo:
//!     Type: github
//!     URL: https://github.com/example/observatory/commits/main.atom
//!
//! - Project Name: Lighthouse
//!   Contributors: [Alan Turing]
//!   Blog:
//!     Web: https://lighthouse.example.org/news
//!     Feed: https://lighthouse.example.org/news.xml
//! ```
//!
//! Records are loaded once per rendering pass and borrowed read-only by the
//! freshness engine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::constants::{PLAIN_GIT_REPOSITORY, RSS_ENABLED_REPOSITORIES};
use crate::core::{MonitorError, MonitorResult};

/// One project in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Display name
    #[serde(rename = "Project Name")]
    pub name: String,

    /// Project home page
    #[serde(rename = "Website", default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// People working on the project
    #[serde(rename = "Contributors", default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Contributors>,

    /// Development blog
    #[serde(rename = "Blog", default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogSpec>,

    /// Link target for the source code column
    #[serde(rename = "Source Code", default, skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,

    /// Project wiki
    #[serde(rename = "Wiki", default, skip_serializing_if = "Option::is_none")]
    pub wiki: Option<String>,

    /// Repository metadata used to resolve source code activity
    #[serde(rename = "Repo", default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<RepoDescriptor>,
}

impl ProjectRecord {
    /// Create a record with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website: None,
            contributors: None,
            blog: None,
            source_code: None,
            wiki: None,
            repo: None,
        }
    }

    /// Number of the three tracked dimensions (source code, blog, wiki) that are absent.
    #[must_use]
    pub fn missing_dimensions(&self) -> usize {
        [self.source_code.is_none(), self.blog.is_none(), self.wiki.is_none()]
            .into_iter()
            .filter(|missing| *missing)
            .count()
    }
}

/// Where a project's blog lives.
///
/// A bare URL is a web page whose feed has to be discovered. The structured
/// form names the feed directly and keeps the page URL for links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlogSpec {
    /// Web page URL; the feed is found by autodiscovery.
    DirectUrl(String),

    /// Explicit page and feed URLs.
    WithFeed {
        /// Page shown to visitors
        #[serde(rename = "Web", alias = "web")]
        web: String,
        /// RSS or Atom feed URL
        #[serde(rename = "Feed", alias = "feed")]
        feed: String,
    },
}

impl BlogSpec {
    /// Identifier the feed cache is keyed on.
    #[must_use]
    pub fn cache_key(&self) -> &str {
        match self {
            BlogSpec::DirectUrl(url) => url,
            BlogSpec::WithFeed {
                feed,
                ..
            } => feed,
        }
    }

    /// URL a visitor should be linked to.
    #[must_use]
    pub fn web_url(&self) -> &str {
        match self {
            BlogSpec::DirectUrl(url) => url,
            BlogSpec::WithFeed {
                web,
                ..
            } => web,
        }
    }
}

/// Contributor names, either comma separated or as a YAML list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contributors {
    /// `Contributors: [Ada, Grace]`
    Names(Vec<String>),
    /// `Contributors: Ada, Grace`
    Joined(String),
}

impl Contributors {
    /// Individual names, splitting the joined form on `,` or `, `.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        match self {
            Contributors::Names(names) => names.clone(),
            Contributors::Joined(joined) => joined
                .split(',')
                .map(|name| name.strip_prefix(' ').unwrap_or(name))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Repository metadata from the roster's `Repo` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    /// Hosting type, matched exactly against the known list
    #[serde(rename = "Type", alias = "type")]
    pub repo_type: String,

    /// Activity feed URL for RSS-capable hosts, clone URL otherwise
    #[serde(rename = "URL", alias = "url")]
    pub url: String,
}

/// How a repository's activity can be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoKind {
    /// Host publishes an activity feed at `url`
    RssEnabled,
    /// Plain git hosting; activity is unknowable
    PlainGit,
    /// Anything else
    Unsupported,
}

impl RepoDescriptor {
    /// Create a descriptor.
    pub fn new(repo_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            repo_type: repo_type.into(),
            url: url.into(),
        }
    }

    /// Classify this repository by its type string.
    #[must_use]
    pub fn kind(&self) -> RepoKind {
        if RSS_ENABLED_REPOSITORIES.contains(&self.repo_type.as_str()) {
            RepoKind::RssEnabled
        } else if self.repo_type == PLAIN_GIT_REPOSITORY {
            RepoKind::PlainGit
        } else {
            RepoKind::Unsupported
        }
    }
}

/// Parse roster YAML. `file` is only used in error messages.
pub fn parse_roster(content: &str, file: &str) -> MonitorResult<Vec<ProjectRecord>> {
    // An empty document is an empty roster rather than a parse error
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str(content).map_err(|e| MonitorError::RosterParse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

/// Read and parse the roster file.
pub async fn load_roster(path: &Path) -> MonitorResult<Vec<ProjectRecord>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MonitorError::RosterNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let projects = parse_roster(&content, &path.display().to_string())?;
    debug!("Loaded {} projects from {}", projects.len(), path.display());
    Ok(projects)
}
