//! Test utilities for the RCOS monitor
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`StubFetcher`] - in-memory [`HttpFetch`](crate::feed::HttpFetch) that counts requests
//! - Feed, page and roster fixtures
//! - One-time logging initialization
//!
//! # Example
//!
//! ```rust,no_run
//! use rcos_monitor::feed::FeedClient;
//! use rcos_monitor::test_utils::{StubFetcher, atom_feed};
//!
//! let client = FeedClient::new(
//!     StubFetcher::new().with_page("https://example.com/atom", atom_feed(&["2025-01-01T00:00:00Z"])),
//! );
//! assert_eq!(client.fetcher().total_calls(), 0);
//! ```

pub mod fetcher;
pub mod fixtures;

pub use fetcher::StubFetcher;
pub use fixtures::{atom_feed, atom_feed_aged, html_page_linking, rss_feed, sample_roster};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
