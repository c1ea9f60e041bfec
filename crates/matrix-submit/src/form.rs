//! Upload / preview / submit state machine.
//!
//! The form is synchronous: transitions never wait on I/O. Work that has to
//! happen outside the form (rendering a preview, calling the backend) is
//! returned as an [`Effect`] tagged with a [`SubmissionToken`]; the driver
//! runs it and reports back through [`SubmissionForm::preview_ready`] or
//! [`SubmissionForm::complete`]. Reports carrying a token that is no longer
//! active are discarded, which is how `reset` and re-selection cancel work
//! already underway.
//!
//! ```text
//! Idle ─select─▶ Validating ─preview_ready─▶ PreviewReady ─submit─▶ Submitting
//!                                                                   │
//!                                                 Succeeded ◀─complete─▶ Failed
//! ```

use std::fmt;

use matrix_client::{AnalysisRequest, Payload, has_http_scheme};
use matrix_model::{
    AnalysisKind, AnalysisResult, InputKind, PreviewHandle, RequestState, SubmissionToken,
};

use crate::error::{Result, SubmitError};

/// Fine-grained phase of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing selected.
    #[default]
    Idle,
    /// Input accepted, preview pending.
    Validating,
    /// Preview rendered; submit is enabled.
    PreviewReady,
    /// Request dispatched, awaiting completion.
    Submitting,
    Succeeded,
    Failed,
}

impl Phase {
    /// Coarse state shown to users.
    ///
    /// `PreviewReady` still reads as validating: nothing has been sent yet.
    pub fn request_state(&self) -> RequestState {
        match self {
            Phase::Idle => RequestState::Idle,
            Phase::Validating | Phase::PreviewReady => RequestState::Validating,
            Phase::Submitting => RequestState::InFlight,
            Phase::Succeeded => RequestState::Succeeded,
            Phase::Failed => RequestState::Failed,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::PreviewReady => "preview ready",
            Phase::Submitting => "submitting",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The input currently held by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request: AnalysisRequest,
    /// Token of the most recent effect issued for this submission.
    pub token: SubmissionToken,
}

/// Work the driver must perform on the form's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render a preview of `request` and report it with `preview_ready`.
    GeneratePreview {
        token: SubmissionToken,
        request: AnalysisRequest,
    },
    /// Send `request` to the backend and report the outcome with `complete`.
    Dispatch {
        token: SubmissionToken,
        request: AnalysisRequest,
    },
}

impl Effect {
    pub fn token(&self) -> SubmissionToken {
        match self {
            Effect::GeneratePreview { token, .. } | Effect::Dispatch { token, .. } => *token,
        }
    }
}

/// Whether a reported completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The token was superseded; the report was discarded.
    Stale,
}

/// State of one submission form.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    phase: Phase,
    submission: Option<Submission>,
    preview: Option<PreviewHandle>,
    result: Option<AnalysisResult>,
    error: Option<SubmitError>,
    active: Option<SubmissionToken>,
    last_token: u64,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn request_state(&self) -> RequestState {
        self.phase.request_state()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    /// Token whose reports are currently accepted.
    pub fn active_token(&self) -> Option<SubmissionToken> {
        self.active
    }

    /// Returns true when `submit` would dispatch.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::PreviewReady
    }

    /// Select a file for a file-based analysis.
    pub fn select_file(
        &mut self,
        kind: AnalysisKind,
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Effect> {
        let request = AnalysisRequest::file(kind, name, media_type, bytes);
        self.select(request)
    }

    /// Select text (or a URL) for a text-based analysis.
    pub fn select_text(&mut self, kind: AnalysisKind, text: impl Into<String>) -> Result<Effect> {
        let request = AnalysisRequest::text(kind, text);
        self.select(request)
    }

    /// Replace whatever the form holds with `request`.
    ///
    /// Always allowed. On success the form is `Validating` and a preview
    /// effect is returned; on failure it is `Idle` holding only the error.
    pub fn select(&mut self, request: AnalysisRequest) -> Result<Effect> {
        self.clear();

        let request = match validate(request) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "selection rejected");
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        let token = self.next_token();
        tracing::debug!(kind = %request.kind, token = %token, "input selected");
        self.submission = Some(Submission {
            request: request.clone(),
            token,
        });
        self.phase = Phase::Validating;
        Ok(Effect::GeneratePreview { token, request })
    }

    /// Attach a rendered preview. Ignored unless `token` is active and the
    /// preview is still pending.
    pub fn preview_ready(&mut self, token: SubmissionToken, preview: PreviewHandle) -> Applied {
        if self.active != Some(token) || self.phase != Phase::Validating {
            tracing::warn!(token = %token, phase = %self.phase, "discarding stale preview");
            return Applied::Stale;
        }
        self.preview = Some(preview);
        self.phase = Phase::PreviewReady;
        Applied::Applied
    }

    /// Dispatch the selected input.
    ///
    /// Only valid in `PreviewReady`. A rejected submit leaves the form as it
    /// was.
    pub fn submit(&mut self) -> Result<Effect> {
        match self.phase {
            Phase::PreviewReady => {}
            Phase::Submitting => return Err(SubmitError::AlreadyInFlight),
            Phase::Idle | Phase::Validating | Phase::Succeeded | Phase::Failed => {
                return Err(SubmitError::NoFileSelected);
            }
        }

        let token = self.next_token();
        let Some(submission) = self.submission.as_mut() else {
            return Err(SubmitError::NoFileSelected);
        };
        submission.token = token;
        let request = submission.request.clone();

        self.result = None;
        self.error = None;
        self.phase = Phase::Submitting;
        tracing::debug!(kind = %request.kind, token = %token, "dispatching");
        Ok(Effect::Dispatch { token, request })
    }

    /// Apply the outcome of a dispatched request.
    ///
    /// Outcomes for a superseded token are discarded. Any previous result is
    /// cleared either way.
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        outcome: std::result::Result<AnalysisResult, SubmitError>,
    ) -> Applied {
        if self.active != Some(token) || self.phase != Phase::Submitting {
            tracing::warn!(token = %token, phase = %self.phase, "discarding stale response");
            return Applied::Stale;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(token = %token, "{}", result.headline());
                self.result = Some(result);
                self.error = None;
                self.phase = Phase::Succeeded;
            }
            Err(err) => {
                tracing::warn!(token = %token, error = %err, "analysis failed");
                self.result = None;
                self.error = Some(err);
                self.phase = Phase::Failed;
            }
        }
        Applied::Applied
    }

    /// Return to `Idle`, dropping everything and invalidating the token.
    pub fn reset(&mut self) {
        tracing::debug!(phase = %self.phase, "reset");
        self.clear();
    }

    fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.submission = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.active = None;
    }

    fn next_token(&mut self) -> SubmissionToken {
        self.last_token += 1;
        let token = SubmissionToken(self.last_token);
        self.active = Some(token);
        token
    }
}

/// Check that the payload fits the analysis kind.
fn validate(request: AnalysisRequest) -> Result<AnalysisRequest> {
    let kind = request.kind;
    let input = kind.input_kind();

    match request.payload {
        Payload::File { ref media_type, .. } => {
            if input.accepts_media_type(media_type) {
                Ok(request)
            } else {
                Err(SubmitError::InvalidFileType {
                    kind,
                    media_type: media_type.clone(),
                })
            }
        }
        Payload::Text(_) if input.is_file() => Err(SubmitError::InvalidFileType {
            kind,
            media_type: "text/plain".to_string(),
        }),
        Payload::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(SubmitError::EmptyText);
            }
            if input == InputKind::Url {
                if !has_http_scheme(trimmed) {
                    return Err(SubmitError::InvalidUrl(trimmed.to_string()));
                }
                return Ok(AnalysisRequest::text(kind, trimmed));
            }
            Ok(AnalysisRequest::text(kind, text))
        }
    }
}
