//! Async driver for [`SubmissionForm`].

use matrix_analysis::normalize;
use matrix_client::{AnalysisRequest, Backend};
use matrix_model::{AnalysisKind, AnalysisResult};

use crate::error::{Result, SubmitError};
use crate::form::{Applied, Effect, SubmissionForm};
use crate::preview::generate_preview;

/// Sends `request` and normalizes the response.
pub async fn execute<B: Backend>(backend: &B, request: &AnalysisRequest) -> Result<AnalysisResult> {
    let body = backend.analyze(request).await?;
    Ok(normalize(&body, request.kind)?)
}

/// Owns a form and a backend and runs the form's effects.
#[derive(Debug)]
pub struct SubmissionRunner<B> {
    form: SubmissionForm,
    backend: B,
}

impl<B: Backend> SubmissionRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            form: SubmissionForm::new(),
            backend,
        }
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    /// Direct access for drivers that interleave transitions with effects.
    pub fn form_mut(&mut self) -> &mut SubmissionForm {
        &mut self.form
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Select a file and render its preview.
    pub async fn select_file(
        &mut self,
        kind: AnalysisKind,
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let effect = self.form.select_file(kind, name, media_type, bytes)?;
        self.run(effect).await;
        Ok(())
    }

    /// Select text or a URL and render its preview.
    pub async fn select_text(
        &mut self,
        kind: AnalysisKind,
        text: impl Into<String>,
    ) -> Result<()> {
        let effect = self.form.select_text(kind, text)?;
        self.run(effect).await;
        Ok(())
    }

    /// Submit and wait for the outcome to be applied.
    ///
    /// Returns the refusal if the form cannot submit. A failed analysis is
    /// not an `Err` here; it is recorded in the form.
    pub async fn submit(&mut self) -> Result<Applied> {
        let effect = self.form.submit()?;
        Ok(self.run(effect).await)
    }

    /// Run one effect and feed its outcome back into the form.
    pub async fn run(&mut self, effect: Effect) -> Applied {
        match effect {
            Effect::GeneratePreview { token, request } => {
                let preview = generate_preview(&request);
                self.form.preview_ready(token, preview)
            }
            Effect::Dispatch { token, request } => {
                let outcome = execute(&self.backend, &request).await;
                self.form.complete(token, outcome)
            }
        }
    }

    /// Reset the form.
    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// The applied outcome, if the form is in a terminal phase.
    pub fn outcome(&self) -> Option<std::result::Result<&AnalysisResult, &SubmitError>> {
        match (self.form.result(), self.form.error()) {
            (Some(result), _) => Some(Ok(result)),
            (None, Some(err)) if self.form.request_state().is_terminal() => Some(Err(err)),
            _ => None,
        }
    }
}
