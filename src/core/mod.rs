//! Core types shared across the monitor
//!
//! This module holds the error taxonomy used by every engine operation and the
//! helpers that turn those errors into user-friendly CLI output.
//!
//! ## `error` - Error Handling
//!
//! - [`MonitorError`] - Enumerated failure modes of a rendering pass
//! - [`ErrorContext`] - User-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Error Handling Pattern
//!
//! ```rust,no_run
//! use rcos_monitor::core::{MonitorError, MonitorResult, user_friendly_error};
//!
//! fn lookup(repo_type: &str) -> MonitorResult<f64> {
//!     Err(MonitorError::UnsupportedRepositoryType {
//!         repo_type: repo_type.to_string(),
//!     })
//! }
//!
//! if let Err(e) = lookup("svn") {
//!     user_friendly_error(e.into()).display();
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, MonitorError, user_friendly_error};

/// Result alias used by engine operations.
pub type MonitorResult<T> = std::result::Result<T, MonitorError>;
