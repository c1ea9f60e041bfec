//! Errors surfaced by the submission state machine.

use matrix_analysis::NormalizeError;
use matrix_client::ClientError;
use matrix_model::AnalysisKind;
use thiserror::Error;

/// Every way a submission can be refused or fail.
///
/// None of these are fatal; the form stays usable after each one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Declared media type does not match the analysis, or a file was
    /// offered where text is expected (and vice versa).
    #[error("{media_type} is not accepted by {kind}")]
    InvalidFileType {
        kind: AnalysisKind,
        media_type: String,
    },

    /// Nothing ready to submit.
    #[error("no input selected")]
    NoFileSelected,

    /// A request for this form is already pending.
    #[error("a request is already in flight")]
    AlreadyInFlight,

    /// Transport failure or non-2xx status.
    #[error("network failure: {message}")]
    NetworkFailure {
        status: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// Body was not the JSON shape the analysis returns.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Text input is blank.
    #[error("text is empty")]
    EmptyText,

    /// URL input has no http(s) scheme.
    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),

    /// Backend answered but reported a failure in its payload.
    #[error("backend rejected the request: {0}")]
    BackendRejected(String),
}

impl SubmitError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidFileType { kind, .. } => match kind.input_kind().media_prefix() {
                Some("image/") => "Please upload an image file.",
                Some("video/") => "Please upload a video file.",
                Some("audio/") => "Please upload an audio file.",
                _ => "This analysis takes text, not a file.",
            },
            Self::NoFileSelected => "Please select a file or enter text first.",
            Self::AlreadyInFlight => "An analysis is already running.",
            Self::NetworkFailure { .. } => "Failed to analyze. Please try again later.",
            Self::MalformedResponse(_) => "The analysis service returned an unexpected response.",
            Self::EmptyText => "Please enter some text to analyze.",
            Self::InvalidUrl(_) => "Please enter a valid http:// or https:// link.",
            Self::BackendRejected(message) => message,
        }
    }

    /// Returns whether reset and resubmit may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkFailure { retryable, .. } => *retryable,
            Self::BackendRejected(_) => true,
            _ => false,
        }
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::JsonParse(reason) => Self::MalformedResponse(reason),
            other => Self::NetworkFailure {
                status: other.status(),
                retryable: other.is_retryable(),
                message: other.to_string(),
            },
        }
    }
}

impl From<NormalizeError> for SubmitError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::MalformedResponse { .. } => Self::MalformedResponse(err.to_string()),
            NormalizeError::BackendRejected { message, .. } => Self::BackendRejected(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubmitError>;
