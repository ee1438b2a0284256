//! Feed discovery, fetching and parsing
//!
//! The [`FeedClient`] turns a blog or repository activity URL into a
//! [`ParsedFeed`]. Network access goes through the [`HttpFetch`] trait so the
//! same client runs against [`ReqwestFetcher`] in production and an in-memory
//! fetcher in tests.
//!
//! # Flow
//!
//! 1. A structured blog spec names its feed directly: fetch and parse it.
//! 2. A bare page URL is fetched. If the body is already a feed it is parsed
//!    as-is; otherwise the first advertised `<link rel="alternate">` feed is
//!    fetched and parsed.
//!
//! No fetch is ever retried. The first failure is returned to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use rcos_monitor::feed::{FeedClient, ReqwestFetcher};
//! use rcos_monitor::roster::BlogSpec;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = FeedClient::new(ReqwestFetcher::new("rcos-monitor", Duration::from_secs(30))?);
//! let feed = client.load(&BlogSpec::DirectUrl("https://blog.example.com".into())).await?;
//! println!("latest entry: {:?}", feed.latest_timestamp());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod discovery;
pub mod parser;

pub use cache::FeedCache;
pub use discovery::{find_feed_link, looks_like_feed};
pub use parser::{parse_feed, parse_timestamp};

use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::core::{MonitorError, MonitorResult};
use crate::roster::BlogSpec;

/// One item of a syndication feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    /// Entry title
    pub title: Option<String>,
    /// Entry permalink
    pub link: Option<String>,
    /// Atom `<updated>`
    pub updated: Option<DateTime<Utc>>,
    /// Atom `<published>`
    pub published: Option<DateTime<Utc>>,
    /// RSS `<pubDate>`
    pub pub_date: Option<DateTime<Utc>>,
}

impl FeedEntry {
    /// When this entry last changed: `updated`, else `published`, else `pubDate`.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.updated.or(self.published).or(self.pub_date)
    }
}

/// A parsed feed. Entries are in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    /// Channel or feed title
    pub title: Option<String>,
    /// Entries, most recent first
    pub entries: Vec<FeedEntry>,
}

impl ParsedFeed {
    /// The most recent entry, which is the first one in feed order.
    #[must_use]
    pub fn latest(&self) -> Option<&FeedEntry> {
        self.entries.first()
    }

    /// Timestamp of the most recent entry.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.latest().and_then(FeedEntry::timestamp)
    }
}

/// Minimal HTTP GET primitive used by [`FeedClient`].
///
/// Implementations return the response body for 2xx responses and
/// [`MonitorError::Network`] for everything else.
pub trait HttpFetch {
    /// Fetch `url` and return the body as text.
    fn get_text(&self, url: &str) -> impl Future<Output = MonitorResult<String>> + Send;
}

/// [`HttpFetch`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build a fetcher with the given User-Agent and request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> MonitorResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::ConfigError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
        })
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn get_text(&self, url: &str) -> MonitorResult<String> {
        debug!("GET {}", url);

        let network_error = |reason: String| MonitorError::Network {
            url: url.to_string(),
            reason,
        };

        let response = self.client.get(url).send().await.map_err(|e| network_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_error(format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| network_error(e.to_string()))
    }
}

/// Discovers, fetches and parses feeds.
#[derive(Debug, Clone)]
pub struct FeedClient<F> {
    fetcher: F,
}

impl<F: HttpFetch + Sync> FeedClient<F> {
    /// Wrap an HTTP fetcher.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
        }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Find the feed URL for a web page.
    ///
    /// Returns the page URL itself when the page is already a feed.
    pub async fn resolve_feed_url(&self, page_url: &str) -> MonitorResult<String> {
        let body = self.fetcher.get_text(page_url).await?;
        if looks_like_feed(&body) {
            return Ok(page_url.to_string());
        }
        discover(&body, page_url)
    }

    /// Fetch and parse a feed.
    pub async fn fetch_feed(&self, feed_url: &str) -> MonitorResult<ParsedFeed> {
        let body = self.fetcher.get_text(feed_url).await?;
        let feed = parse_feed(&body, feed_url)?;
        debug!("Parsed {} entries from {}", feed.entries.len(), feed_url);
        Ok(feed)
    }

    /// Resolve and fetch the feed behind a blog spec.
    ///
    /// A bare URL whose body is already a feed is parsed without a second
    /// request.
    pub async fn load(&self, blog: &BlogSpec) -> MonitorResult<ParsedFeed> {
        match blog {
            BlogSpec::WithFeed {
                feed,
                ..
            } => self.fetch_feed(feed).await,
            BlogSpec::DirectUrl(page_url) => {
                let body = self.fetcher.get_text(page_url).await?;
                if looks_like_feed(&body) {
                    return parse_feed(&body, page_url);
                }
                let feed_url = discover(&body, page_url)?;
                self.fetch_feed(&feed_url).await
            }
        }
    }
}

fn discover(html: &str, page_url: &str) -> MonitorResult<String> {
    find_feed_link(html, page_url).ok_or_else(|| MonitorError::FeedDiscovery {
        url: page_url.to_string(),
    })
}
