//! Error types for jobfetch
//!
//! Two layers of errors exist:
//! - [`Error`] is caller-visible. It covers configuration problems detected
//!   before any request is made, plus failures writing the final output.
//! - [`RequestError`] belongs to a single request. It is classified into a
//!   [`FailureReason`], logged, counted, and never propagated out of a batch.

use crate::types::{FailureReason, RequestIndex};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for jobfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jobfetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "concurrency")
        key: Option<String>,
    },

    /// HTTP client could not be constructed
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Io(_) => "io_error",
        }
    }
}

/// Failure of one logical request.
///
/// Every variant carries the [`RequestIndex`] it belongs to so log lines and
/// tallies can be traced back to the request path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// No complete response within the per-request timeout
    #[error("request {index} timed out after {timeout:?}")]
    Timeout {
        /// Index of the request that timed out
        index: RequestIndex,
        /// The deadline that elapsed
        timeout: Duration,
    },

    /// Connection refused, reset, DNS failure, or a broken body stream
    #[error("request {index} failed: {message}")]
    Transport {
        /// Index of the failed request
        index: RequestIndex,
        /// Description from the transport layer
        message: String,
    },

    /// Server answered with a non-success status code
    #[error("request {index} returned HTTP {status}")]
    HttpStatus {
        /// Index of the failed request
        index: RequestIndex,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// Response body could not be decoded into job details
    #[error("request {index} returned an undecodable body: {message}")]
    Decode {
        /// Index of the failed request
        index: RequestIndex,
        /// Decoder error message
        message: String,
    },
}

impl RequestError {
    /// Classify this error for tallying
    pub fn reason(&self) -> FailureReason {
        match self {
            RequestError::Timeout { .. } => FailureReason::Timeout,
            RequestError::Transport { .. } => FailureReason::Transport,
            RequestError::HttpStatus { .. } => FailureReason::HttpStatus,
            RequestError::Decode { .. } => FailureReason::Decode,
        }
    }

    /// Index of the request this error belongs to
    pub fn index(&self) -> RequestIndex {
        match self {
            RequestError::Timeout { index, .. }
            | RequestError::Transport { index, .. }
            | RequestError::HttpStatus { index, .. }
            | RequestError::Decode { index, .. } => *index,
        }
    }
}
