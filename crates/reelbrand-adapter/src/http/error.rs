/*
[INPUT]:  Error sources (HTTP, API status, serialization, URL, configuration)
[OUTPUT]: Structured error types with context helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the ReelBrand adapter
#[derive(Error, Debug)]
pub enum ReelbrandError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReelbrandError {
    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        ReelbrandError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ReelbrandError::Api { status, .. } => Some(*status),
            ReelbrandError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the failure happened in transport rather than at the API
    pub fn is_network(&self) -> bool {
        matches!(self, ReelbrandError::Http(err) if err.status().is_none())
    }

    /// Check if the API reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type alias for ReelBrand operations
pub type Result<T> = std::result::Result<T, ReelbrandError>;
