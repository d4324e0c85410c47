//! Explorer API error types.

use thiserror::Error;

/// Errors that can occur while calling the explorer REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No base URL was configured, so no request can be built.
    #[error("BLOCKSCOUT_API_URL is not set")]
    NotConfigured,

    /// The configured base URL (or a path joined onto it) is not a valid URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The explorer answered with a non-2xx status.
    ///
    /// The body is kept verbatim so upstream diagnostics reach the caller.
    #[error("HTTP error! status: {status}, body: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection-level failure (DNS, TLS, reset, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Create a new "invalid URL" error.
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
