use matrix_model::AnalysisKind;
use thiserror::Error;

/// Errors raised while turning a raw backend body into an analysis result.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Body is not JSON, not an object, or does not match the expected shape.
    #[error("malformed {kind} response: {reason}")]
    MalformedResponse { kind: AnalysisKind, reason: String },

    /// Backend answered 2xx but reported an error in its envelope.
    #[error("backend rejected the {kind} request: {message}")]
    BackendRejected { kind: AnalysisKind, message: String },
}

impl NormalizeError {
    pub fn malformed(kind: AnalysisKind, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
