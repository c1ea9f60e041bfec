//! Submission lifecycle types shared by the state machine and front ends.

use serde::Serialize;
use std::fmt;

/// Coarse request state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RequestState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Validating => "validating",
            RequestState::InFlight => "in flight",
            RequestState::Succeeded => "succeeded",
            RequestState::Failed => "failed",
        }
    }

    /// Returns true for `Succeeded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded | RequestState::Failed)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monotonic identifier used to discard stale asynchronous completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SubmissionToken(pub u64);

impl fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Local display-only rendering of a selected input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PreviewHandle {
    /// `data:<media type>;base64,<payload>` for files.
    DataUrl(String),
    /// Echo of submitted text or URL.
    TextEcho(String),
}

impl PreviewHandle {
    pub fn as_str(&self) -> &str {
        match self {
            PreviewHandle::DataUrl(url) => url,
            PreviewHandle::TextEcho(text) => text,
        }
    }
}
