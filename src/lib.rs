//! RCOS Monitor - ranked freshness dashboard for open source projects
//!
//! Reads a hand-maintained roster of projects, looks up the most recent
//! activity on each project's blog and source repository through their
//! RSS/Atom feeds, and ranks the projects from most to least recently active.
//! The result is served as an HTML dashboard with color-coded cells, or
//! printed as terminal reports.
//!
//! # Architecture Overview
//!
//! A request or command runs one *rendering pass*:
//!
//! 1. Load the roster ([`roster`])
//! 2. Create a [`freshness::RenderPass`] with a fresh [`feed::FeedCache`] and
//!    a fixed reference time
//! 3. Score and rank every project, fetching each distinct feed once
//! 4. Render the table ([`render`]) or a report ([`cli`])
//!
//! Passes are sequential and share nothing but the HTTP client. The first
//! failure, whether a fetch error or a roster defect, ends the pass.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - `monitor.toml` loading and defaults
//! - [`core`] - Error types and user-facing error formatting
//! - [`feed`] - Feed discovery, fetching, parsing and the per-pass cache
//! - [`freshness`] - Age resolution, scoring, ranking, colors and statistics
//! - [`render`] - Dashboard table and HTML pages
//! - [`roster`] - Project record model and YAML loading
//! - [`server`] - axum HTTP server
//!
//! # Scoring
//!
//! A project's score is `1000` for each missing blog, wiki or source code
//! link plus the age in days of its freshest activity. Projects without a
//! usable activity signal count as `100` days old. Lower is fresher.
//!
//! # Example
//!
//! ```bash
//! # Rank the roster in the terminal
//! rcos-monitor --roster projects.yml rank
//!
//! # Serve the dashboard
//! rcos-monitor serve --bind 0.0.0.0:4567
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod feed;
pub mod freshness;
pub mod render;
pub mod roster;
pub mod server;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
