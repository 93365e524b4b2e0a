//! Error types for issue-pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for issue-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid `{field}` timestamp '{value}': {source}")]
    InvalidTimestamp {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("Could not fetch the first page of {resource}: {source}")]
    FirstPage {
        resource: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Collection Errors
    // ============================================================================
    #[error("Page {page} was added twice")]
    DuplicatePage { page: u32 },

    #[error("Page {page} is not tracked")]
    UnknownPage { page: u32 },

    #[error("Fetch task for page {page} did not finish: {message}")]
    Task { page: u32, message: String },

    #[error("Pagination error: {message}")]
    Pagination { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a pagination error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }

    /// Wrap an error as the fatal first-page failure for `resource`
    pub fn first_page(resource: impl Into<String>, source: Error) -> Self {
        Self::FirstPage {
            resource: resource.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an error as the failure of a specific page
    pub fn fetch(page: u32, source: Error) -> Self {
        Self::Fetch {
            page,
            source: Box::new(source),
        }
    }

    /// Check if this error was caused by bad input rather than the remote side
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::InvalidConfigValue { .. }
                | Error::InvalidTimestamp { .. }
                | Error::YamlParse(_)
        )
    }
}

/// Result type alias for issue-pager
pub type Result<T> = std::result::Result<T, Error>;
