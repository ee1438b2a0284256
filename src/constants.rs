//! Global constants used throughout the monitor.
//!
//! Scoring weights, sentinel values and the fixed lists that drive
//! repository-type dispatch live here so that the engine, the renderer and
//! the tests all agree on them.

use std::time::Duration;

/// Seconds in one day, used to turn timestamp differences into day counts.
pub const SECONDS_IN_DAY: f64 = 60.0 * 60.0 * 24.0;

/// Stand-in age for "no usable activity signal".
///
/// Used for blogs whose feed has no entries and for plain `git` repositories.
/// It is an ordinary number so that `min`, addition and sorting need no
/// special cases, and it stays well below [`MISSING_DIMENSION_PENALTY`].
pub const SENTINEL_AGE_DAYS: f64 = 100.0;

/// Score added for each of source code, blog and wiki that a project lacks.
pub const MISSING_DIMENSION_PENALTY: f64 = 1000.0;

/// Repository hosts whose activity feed can be located and parsed.
pub const RSS_ENABLED_REPOSITORIES: [&str; 5] = ["github", "Google Code", "bitbucket", "cgit", "Redmine"];

/// Repository type for bare git hosting with no activity feed.
pub const PLAIN_GIT_REPOSITORY: &str = "git";

/// Label shown when a feed has no entries.
pub const NO_UPDATES_LABEL: &str = "No updates";

/// Age threshold in days used by the laggards report.
pub const LAGGARD_THRESHOLD_DAYS: u32 = 14;

/// Age threshold in days for "updated in the last week".
pub const LAST_WEEK_DAYS: f64 = 7.0;

/// Default `Cache-Control: max-age` for the index page (6 hours).
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 60 * 60 * 6;

/// Default outbound request timeout.
pub fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Default address for `rcos-monitor serve`.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4567";

/// Default roster file name.
pub const DEFAULT_ROSTER_FILE: &str = "projects.yml";

/// Day range covered by the color legend page.
pub const COLOR_KEY_MAX_DAYS: u32 = 40;
