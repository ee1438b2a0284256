//! The project freshness engine
//!
//! A [`RenderPass`] is one complete evaluation of the roster. It owns the
//! per-pass [`FeedCache`], fixes the reference time `now` at construction,
//! and exposes the engine operations:
//!
//! - [`age`] - days since last blog or repository activity
//! - [`score`] - composite staleness score and stable ranking
//! - [`color`] - age to urgency color (pure, no pass needed)
//! - [`stats`] - dashboard statistics and the laggards report
//!
//! Every operation that may touch the network takes `&mut self`, so a pass
//! is driven sequentially: one fetch at a time, in roster order. Errors are
//! never absorbed; the first failure ends the pass.
//!
//! # Example
//!
//! ```rust,no_run
//! use rcos_monitor::feed::{FeedClient, ReqwestFetcher};
//! use rcos_monitor::freshness::RenderPass;
//! use rcos_monitor::roster::load_roster;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = FeedClient::new(ReqwestFetcher::new("rcos-monitor", Duration::from_secs(30))?);
//! let projects = load_roster(Path::new("projects.yml")).await?;
//!
//! let mut pass = RenderPass::new(&client);
//! for ranked in pass.rank_projects(&projects).await? {
//!     println!("{:>8.2}  {}", ranked.score, ranked.project.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod age;
pub mod color;
pub mod score;
pub mod stats;

pub use age::age_in_days;
pub use color::{UrgencyColor, color_from_age};
pub use score::RankedProject;
pub use stats::DashboardStats;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::feed::{FeedCache, FeedClient, HttpFetch};

/// One evaluation of the roster against the network.
///
/// Create a new pass per page render and drop it afterwards; its cache must
/// not outlive the render.
pub struct RenderPass<'c, F> {
    client: &'c FeedClient<F>,
    cache: FeedCache,
    now: DateTime<Utc>,
}

impl<'c, F: HttpFetch + Sync> RenderPass<'c, F> {
    /// Start a pass at the current time.
    pub fn new(client: &'c FeedClient<F>) -> Self {
        Self::at(client, Utc::now())
    }

    /// Start a pass with an explicit reference time.
    pub fn at(client: &'c FeedClient<F>, now: DateTime<Utc>) -> Self {
        Self {
            client,
            cache: FeedCache::new(),
            now,
        }
    }

    /// Reference time all ages are measured against.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Feeds fetched so far in this pass.
    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    /// Log cache statistics and end the pass.
    pub fn finish(self) {
        let (hits, misses) = self.cache.stats();
        debug!(
            "Rendering pass done: {} feeds fetched, {} cache hits ({:.1}% hit rate)",
            misses,
            hits,
            self.cache.hit_rate()
        );
    }
}
