//! Error types for backend communication.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport failure or a non-2xx status.
    #[error("network error: {message}")]
    NetworkFailure {
        /// HTTP status, when the backend answered at all.
        status: Option<u16>,
        /// Backend `detail` if the error body carried one, otherwise a
        /// description of the failure.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// A request could not be built from the given input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be read or is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading or writing configuration.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ClientError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NetworkFailure { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NetworkFailure {
                status: Some(status),
                ..
            } if *status >= 500 => "The verification service failed to process the request.",
            Self::NetworkFailure {
                status: Some(_), ..
            } => "The verification service rejected the request.",
            Self::NetworkFailure { status: None, .. } => {
                "Could not reach the verification service. Please check your connection."
            }
            Self::JsonParse(_) => "The verification service sent an unreadable response.",
            Self::InvalidRequest(_) => "The request could not be prepared.",
            Self::Config(_) | Self::Io(_) => "The client configuration could not be loaded.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkFailure { status: None, .. } => true,
            Self::NetworkFailure {
                status: Some(status),
                ..
            } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkFailure {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
