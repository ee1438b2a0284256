//! Feed cache for a single rendering pass.
//!
//! Several projects often point at the same blog, and the same feed is needed
//! by the score, the cell label and the cell color. This cache makes sure each
//! distinct blog is fetched once per pass, no matter how often it is asked
//! for.
//!
//! # Lifetime
//!
//! A cache belongs to exactly one rendering pass and is dropped with it. It is
//! never shared between requests: ages are computed against the time of the
//! fetch, so reusing entries across passes would freeze staleness.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

use super::{FeedClient, HttpFetch, ParsedFeed};
use crate::core::MonitorResult;
use crate::roster::BlogSpec;

/// Parsed feeds keyed by blog identifier.
///
/// The key is the bare page URL for [`BlogSpec::DirectUrl`] and the feed URL
/// for [`BlogSpec::WithFeed`].
#[derive(Debug, Default)]
pub struct FeedCache {
    /// Map from blog identifier to parsed feed
    feeds: HashMap<String, ParsedFeed>,
    /// Cache statistics
    hits: usize,
    misses: usize,
}

impl FeedCache {
    /// Create a new empty feed cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the feed for `blog`, fetching it on first use.
    ///
    /// A hit performs no network access. A failed fetch stores nothing and
    /// returns the error.
    pub async fn get_or_fetch<F: HttpFetch + Sync>(
        &mut self,
        client: &FeedClient<F>,
        blog: &BlogSpec,
    ) -> MonitorResult<&ParsedFeed> {
        let feed = match self.feeds.entry(blog.cache_key().to_string()) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                debug!("Feed cache hit for {}", entry.key());
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                debug!("Feed cache miss for {}", entry.key());
                let feed = client.load(blog).await?;
                entry.insert(feed)
            }
        };
        Ok(&*feed)
    }

    /// Cached feed for `blog`, without fetching.
    pub fn get(&self, blog: &BlogSpec) -> Option<&ParsedFeed> {
        self.feeds.get(blog.cache_key())
    }

    /// Number of distinct feeds held.
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    /// Whether nothing has been fetched yet.
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Get cache statistics as `(hits, misses)`
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}
