//! Integration test suite for rcos-monitor
//!
//! End-to-end tests over whole rendering passes, the real `reqwest` fetcher
//! against a local mock server, the axum router and the compiled binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: The `rcos-monitor` binary on rosters that need no network
//! - **feed_fetch**: `ReqwestFetcher` against `wiremock`
//! - **rendering_pass**: Full passes with an in-memory fetcher
//! - **server**: Router requests through `tower::ServiceExt::oneshot`

mod common;

mod cli;
mod feed_fetch;
mod rendering_pass;
mod server;
