//! Age resolution for blogs and repositories.
//!
//! Ages are floating-point day counts measured from the pass's reference
//! time. Missing activity is reported as [`SENTINEL_AGE_DAYS`] rather than an
//! error or an infinity, so that scores stay plain sums.

use chrono::{DateTime, Utc};

use super::RenderPass;
use crate::constants::{NO_UPDATES_LABEL, SECONDS_IN_DAY, SENTINEL_AGE_DAYS};
use crate::core::{MonitorError, MonitorResult};
use crate::feed::HttpFetch;
use crate::roster::{BlogSpec, RepoDescriptor, RepoKind};

/// Days between `then` and `now`, fractional and not clamped.
///
/// Negative when `then` is in the future (clock skew between hosts).
#[must_use]
pub fn age_in_days(now: DateTime<Utc>, then: DateTime<Utc>) -> f64 {
    let elapsed = now - then;
    // Milliseconds keep sub-second precision without overflow concerns
    elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_IN_DAY
}

impl<F: HttpFetch + Sync> RenderPass<'_, F> {
    /// Timestamp of the most recent entry in the blog's feed.
    pub async fn publish_time(&mut self, blog: &BlogSpec) -> MonitorResult<Option<DateTime<Utc>>> {
        let feed = self.cache.get_or_fetch(self.client, blog).await?;
        Ok(feed.latest_timestamp())
    }

    /// Days since the blog's most recent entry, or the sentinel when there is none.
    pub async fn blog_age(&mut self, blog: &BlogSpec) -> MonitorResult<f64> {
        Ok(match self.publish_time(blog).await? {
            Some(published) => age_in_days(self.now, published),
            None => SENTINEL_AGE_DAYS,
        })
    }

    /// Days since the repository's last activity.
    ///
    /// RSS-capable hosts are read like a blog at `repo.url`. Plain `git`
    /// repositories get the sentinel without any network access. Any other
    /// type is a roster defect and fails with
    /// [`MonitorError::UnsupportedRepositoryType`].
    pub async fn repo_age(&mut self, repo: &RepoDescriptor) -> MonitorResult<f64> {
        match repo.kind() {
            RepoKind::RssEnabled => self.blog_age(&BlogSpec::DirectUrl(repo.url.clone())).await,
            RepoKind::PlainGit => Ok(SENTINEL_AGE_DAYS),
            RepoKind::Unsupported => Err(MonitorError::UnsupportedRepositoryType {
                repo_type: repo.repo_type.clone(),
            }),
        }
    }

    /// Date of the blog's last update as `MM/DD`, or `No updates`.
    pub async fn last_update_label(&mut self, blog: &BlogSpec) -> MonitorResult<String> {
        Ok(match self.publish_time(blog).await? {
            Some(published) => published.format("%m/%d").to_string(),
            None => NO_UPDATES_LABEL.to_string(),
        })
    }

    /// Last update label for RSS-capable repositories, `None` for other types.
    pub async fn repo_update_label(&mut self, repo: &RepoDescriptor) -> MonitorResult<Option<String>> {
        match repo.kind() {
            RepoKind::RssEnabled => {
                Ok(Some(self.last_update_label(&BlogSpec::DirectUrl(repo.url.clone())).await?))
            }
            RepoKind::PlainGit | RepoKind::Unsupported => Ok(None),
        }
    }
}
