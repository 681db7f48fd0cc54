//! Error types for the SciVal lookup client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the retrieval layer (HTTP fetch and document cache).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// No API key was configured for a live fetch.
    #[error("No API key configured; set SCIVAL_API_KEY or pass --api-key")]
    MissingApiKey,

    /// Invalid or unauthorized credentials (401/403 response)
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Quota exceeded (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// JSON parsing error (response body or cached file)
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the on-disk cache failed.
    #[error("Cache I/O error at {path}: {source}")]
    Cache {
        /// Cache file involved
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configured base URL cannot take an identifier path segment.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(status: u16, message: impl Into<String>) -> Self {
        Self::Unauthorized { status, message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a cache I/O error.
    #[must_use]
    pub fn cache(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Cache { path: path.into(), source }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors surfaced by the publication view.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    /// A list entry is present but lacks a field its record type requires.
    #[error("{record} entry {index} is missing required field '{field}'")]
    MissingRequiredField {
        /// Record type, e.g. "Author"
        record: &'static str,
        /// Position of the entry in its source array
        index: usize,
        /// Name of the missing key
        field: &'static str,
    },

    /// Failure from the retrieval client, passed through unchanged.
    #[error(transparent)]
    Retrieval(#[from] ClientError),
}

impl LookupError {
    /// Create a missing required field error.
    #[must_use]
    pub const fn missing_field(record: &'static str, index: usize, field: &'static str) -> Self {
        Self::MissingRequiredField { record, index, field }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for view operations.
pub type LookupResult<T> = Result<T, LookupError>;
