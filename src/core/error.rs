//! Error handling for the RCOS monitor
//!
//! This module provides the error types shared by the freshness engine and the
//! user-friendly error reporting used by the CLI. The error system follows two
//! principles:
//! 1. **Strongly-typed errors** so the engine can propagate precise failures
//! 2. **User-friendly messages** with actionable suggestions at the CLI boundary
//!
//! # Error Categories
//!
//! - **Feeds**: [`MonitorError::Network`], [`MonitorError::FeedDiscovery`],
//!   [`MonitorError::FeedParse`]
//! - **Roster data**: [`MonitorError::UnsupportedRepositoryType`],
//!   [`MonitorError::RosterNotFound`], [`MonitorError::RosterParse`]
//! - **Ambient**: [`MonitorError::ConfigError`], [`MonitorError::Template`],
//!   [`MonitorError::IoError`], [`MonitorError::Other`]
//!
//! None of these are recovered inside a rendering pass. A single failing
//! project aborts the whole pass, and the error surfaces to whoever started it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rcos_monitor::core::{MonitorError, user_friendly_error};
//!
//! let error = MonitorError::UnsupportedRepositoryType {
//!     repo_type: "svn".to_string(),
//! };
//! assert_eq!(error.to_string(), "Repository type not supported: svn");
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for monitor operations
///
/// Every engine operation returns `Result<_, MonitorError>`. Variants carry the
/// URL or value that caused the failure so that the message alone is enough to
/// locate the offending roster entry.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Fetching a page or feed failed
    ///
    /// Covers DNS failures, timeouts, connection errors and non-2xx responses.
    /// Fetches are never retried.
    #[error("Network error fetching {url}: {reason}")]
    Network {
        /// The URL that could not be fetched
        url: String,
        /// Transport error or HTTP status
        reason: String,
    },

    /// No syndication feed link could be located on a page
    #[error("No RSS or Atom feed found at {url}")]
    FeedDiscovery {
        /// The page that was searched for a feed link
        url: String,
    },

    /// Feed content is not RSS or Atom
    #[error("Failed to parse feed at {url}: {reason}")]
    FeedParse {
        /// The feed URL
        url: String,
        /// What went wrong while parsing
        reason: String,
    },

    /// A roster entry names a repository type the monitor cannot handle
    ///
    /// This indicates a data defect in the roster and is intentionally fatal.
    #[error("Repository type not supported: {repo_type}")]
    UnsupportedRepositoryType {
        /// The offending `Type` value
        repo_type: String,
    },

    /// Roster file not found
    #[error("Roster file not found: {path}")]
    RosterNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Roster file is not a valid project list
    #[error("Invalid roster file {file}: {reason}")]
    RosterParse {
        /// Path to the roster file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Page template failed to render
    #[error("Template rendering failed: {reason}")]
    Template {
        /// Tera error chain
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for MonitorError {
    fn clone(&self) -> Self {
        match self {
            Self::Network {
                url,
                reason,
            } => Self::Network {
                url: url.clone(),
                reason: reason.clone(),
            },
            Self::FeedDiscovery {
                url,
            } => Self::FeedDiscovery {
                url: url.clone(),
            },
            Self::FeedParse {
                url,
                reason,
            } => Self::FeedParse {
                url: url.clone(),
                reason: reason.clone(),
            },
            Self::UnsupportedRepositoryType {
                repo_type,
            } => Self::UnsupportedRepositoryType {
                repo_type: repo_type.clone(),
            },
            Self::RosterNotFound {
                path,
            } => Self::RosterNotFound {
                path: path.clone(),
            },
            Self::RosterParse {
                file,
                reason,
            } => Self::RosterParse {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::Template {
                reason,
            } => Self::Template {
                reason: reason.clone(),
            },
            // io::Error is not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

impl From<tera::Error> for MonitorError {
    fn from(error: tera::Error) -> Self {
        // Tera nests the useful part of the message in its source chain
        let mut reason = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Template {
            reason,
        }
    }
}

/// Error wrapper with user-facing details and a suggestion
///
/// Produced by [`user_friendly_error`] at the CLI boundary and printed with
/// [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying monitor error
    pub error: MonitorError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: MonitorError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`MonitorError`] (anywhere in the chain), [`std::io::Error`],
/// [`serde_yaml::Error`] and [`toml::de::Error`]. Anything else is reported
/// with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(monitor_error) = cause.downcast_ref::<MonitorError>() {
            return create_error_context(monitor_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MonitorError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            std::io::ErrorKind::AddrInUse => {
                return ErrorContext::new(MonitorError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Another process is using this address. Pass a different --bind address");
            }
            _ => {}
        }
    }

    if let Some(yaml_error) = error.downcast_ref::<serde_yaml::Error>() {
        return ErrorContext::new(MonitorError::RosterParse {
            file: "roster".to_string(),
            reason: yaml_error.to_string(),
        })
        .with_suggestion("Check the YAML syntax of the roster file");
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(MonitorError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in monitor.toml");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(MonitorError::Other {
        message,
    })
}

fn create_error_context(error: MonitorError) -> ErrorContext {
    match &error {
        MonitorError::Network {
            url,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check that {url} is reachable from this machine and returns a 2xx response"
            ))
            .with_details("Fetches are not retried; one unreachable blog or repository feed aborts the whole page"),

        MonitorError::FeedDiscovery {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Give the project's Blog entry an explicit feed, e.g. `Blog: {Web: <page>, Feed: <feed url>}`")
            .with_details("The page has no <link rel=\"alternate\"> pointing at an RSS or Atom feed"),

        MonitorError::FeedParse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Verify the feed URL serves RSS or Atom XML rather than an HTML page")
            .with_details("Only RSS 0.9x/2.0, RSS 1.0 (RDF) and Atom documents are understood"),

        MonitorError::UnsupportedRepositoryType {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use one of: github, Google Code, bitbucket, cgit, Redmine, git")
            .with_details("Repository types are matched exactly and case-sensitively"),

        MonitorError::RosterNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass --roster <path> or set `roster` in monitor.toml"),

        MonitorError::RosterParse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("The roster must be a YAML list of projects with a `Project Name` key each"),

        MonitorError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check monitor.toml or the file given with --config"),

        _ => ErrorContext::new(error),
    }
}
