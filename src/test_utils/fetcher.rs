//! In-memory [`HttpFetch`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::{MonitorError, MonitorResult};
use crate::feed::HttpFetch;

/// Serves canned bodies by URL and counts every request.
///
/// Unknown URLs fail with [`MonitorError::Network`], like a 404 would.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StubFetcher {
    /// Create a fetcher that knows no URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Number of requests made for `url`.
    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).get(url).copied().unwrap_or(0)
    }

    /// Number of requests made for any URL.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).values().sum()
    }
}

impl HttpFetch for StubFetcher {
    async fn get_text(&self, url: &str) -> MonitorResult<String> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()).entry(url.to_string()).or_insert(0) += 1;

        self.pages.get(url).cloned().ok_or_else(|| MonitorError::Network {
            url: url.to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        })
    }
}
