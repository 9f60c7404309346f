//! Error types exposed by the statistics pipeline.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced while validating input, fetching pages, or classifying
/// records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatsError {
    /// Connecting to the server or reading its response exceeded the deadline.
    #[error("timed out waiting for a response from the server: {message}")]
    Timeout {
        /// Transport-level error detail.
        message: String,
    },

    /// The transport could not establish a connection.
    #[error("problem connecting to the server: {message}")]
    Connect {
        /// Transport-level error detail.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Human-readable description of the failure.
        message: String,
    },

    /// One or more pre-flight checks failed.
    #[error("invalid parameters:\n{}", messages.join("\n"))]
    Validation {
        /// Every failed check, in the order the checks ran.
        messages: Vec<String>,
    },

    /// A provider record or page did not have the expected shape.
    #[error("unexpected response shape: {message}")]
    Parse {
        /// Description of the offending record.
        message: String,
    },

    /// The provided URL could not be parsed.
    #[error("repository URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository path is incomplete.
    #[error("repository URL must match /owner/repo")]
    MissingPathSegments,

    /// The API key was missing or blank.
    #[error("API key is required")]
    MissingToken,

    /// A request header could not be encoded.
    #[error("invalid request header: {message}")]
    InvalidHeader {
        /// Detail from the header encoder.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl StatsError {
    /// Builds an [`StatsError::Http`] carrying the provider-specific message
    /// for the given status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        let message = match status {
            StatusCode::UNAUTHORIZED => "authorisation failed; check the API key".to_owned(),
            StatusCode::FORBIDDEN => "access to the resource is restricted".to_owned(),
            StatusCode::NOT_FOUND => {
                "the requested resource was not found; check the URL".to_owned()
            }
            other => format!("HTTP error, status code: {}", other.as_u16()),
        };

        Self::Http {
            status: status.as_u16(),
            message,
        }
    }
}
