//! Error types for the Airtable client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Airtable client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // URL Construction Errors
    // ============================================================================
    /// Input rejected before any request was made
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// A URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// The HTTP request itself failed (connection, TLS, body)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status
    #[error("HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, if any
        message: String,
    },

    /// The API returned 429 and retries were exhausted
    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited {
        /// Server-suggested wait before retrying
        retry_after_seconds: u64,
    },

    /// The request did not complete within the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed
        timeout_ms: u64,
    },

    /// All retry attempts were used without a terminal response
    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded {
        /// The retry limit that was hit
        max_retries: u32,
    },

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    /// The response body was not valid JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A record or page was missing a required key or had the wrong shape
    #[error("Malformed record: {message}")]
    MalformedRecord {
        /// Which key or shape check failed
        message: String,
    },
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an API status error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }

    /// Check if this error is retryable at the transport layer
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable.
///
/// Covers 429, the standard 5xx transient statuses, and the 520-524 range
/// some proxies return for upstream failures. The transport retry loop and
/// [`Error::is_retryable`] both classify through this one predicate.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504 | 520..=524)
}

/// Result type alias for the Airtable client
pub type Result<T> = std::result::Result<T, Error>;
