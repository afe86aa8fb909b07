// src/controller.rs
use std::path::Path;

use crate::client::{EvaluationService, UploadFile};
use crate::errors::{ClientError, Result};
use crate::form::FormState;
use crate::models::{EvaluateResponse, EvaluationRequest, EvaluationResult};
use crate::view::{Node, render_error, render_loading, render_report};

/// Where the submission cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Transient: `begin_submission` always leaves this state before returning.
    Validating,
    Submitting,
    Rendering,
    Error,
}

/// Identifies one submission. Later submissions get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionId(u64);

/// A validated request waiting for the service.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub request: EvaluationRequest,
}

/// What the results region ends up showing for a completed submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Report(EvaluationResult),
    Failed(String),
    /// A newer submission owns the results region.
    Superseded,
}

/// Drives the evaluation form: uploads, submissions and the results region.
///
/// Only the most recently started submission may write the results region;
/// completions of older ones are dropped.
pub struct FormController<S> {
    service: S,
    pub form: FormState,
    phase: Phase,
    results: Option<Node>,
    last_result: Option<EvaluationResult>,
    next_submission: u64,
    latest: Option<SubmissionId>,
}

impl<S: EvaluationService> FormController<S> {
    pub fn new(service: S, form: FormState) -> Self {
        Self {
            service,
            form,
            phase: Phase::Idle,
            results: None,
            last_result: None,
            next_submission: 0,
            latest: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current content of the results region.
    pub fn results(&self) -> Option<&Node> {
        self.results.as_ref()
    }

    /// The result behind the report currently shown, if any.
    pub fn last_result(&self) -> Option<&EvaluationResult> {
        self.last_result.as_ref()
    }

    /// Reads `path` and uploads it. See [`FormController::upload`].
    pub async fn upload_file(&mut self, path: &Path) -> Result<()> {
        let file = UploadFile::read(path).await?;
        self.upload(file).await
    }

    /// Uploads a file and, on success, replaces the code text with the code
    /// the service extracted. On failure the code text is left as it was.
    pub async fn upload(&mut self, file: UploadFile) -> Result<()> {
        let filename = file.filename.clone();
        let response = self.service.upload(file).await.map_err(|e| {
            log::error!("Upload of {} failed: {}", filename, e);
            ClientError::Upload(e.to_string())
        })?;

        match (response.success, response.code) {
            (true, Some(code)) => {
                log::info!("Loaded {} bytes of code from {}", code.len(), filename);
                self.form.code_text = code;
                Ok(())
            }
            (true, None) => Err(ClientError::Upload("response carried no code".to_string())),
            (false, _) => Err(ClientError::Upload(
                response.error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }

    /// Validates the form and starts a submission.
    ///
    /// Blank code fails with [`ClientError::EmptyCode`] and leaves the results
    /// region alone. Otherwise the loading indicator replaces the results.
    pub fn begin_submission(&mut self) -> Result<Submission> {
        self.phase = Phase::Validating;
        let Some(request) = self.form.build_request() else {
            log::info!("Submission rejected: no code provided");
            self.phase = Phase::Idle;
            return Err(ClientError::EmptyCode);
        };

        let id = SubmissionId(self.next_submission);
        self.next_submission += 1;
        self.latest = Some(id);
        self.phase = Phase::Submitting;
        self.results = Some(render_loading());
        log::info!("Submission {} started ({} mode)", id.0, self.form.mode());

        Ok(Submission { id, request })
    }

    /// Applies the service's answer to submission `id`.
    pub fn complete_submission(&mut self, id: SubmissionId, response: Result<EvaluateResponse>) -> Outcome {
        if self.latest != Some(id) {
            log::warn!("Dropping response to submission {}; a newer one is in flight or done", id.0);
            return Outcome::Superseded;
        }

        let outcome = match response {
            Ok(EvaluateResponse { success: true, result: Some(result), .. }) => Outcome::Report(result),
            Ok(EvaluateResponse { success: true, result: None, .. }) => {
                Outcome::Failed("response carried no result".to_string())
            }
            Ok(EvaluateResponse { error, .. }) => {
                Outcome::Failed(error.unwrap_or_else(|| "Unknown error".to_string()))
            }
            Err(ClientError::Evaluation(message)) => {
                log::error!("Submission {} failed: {}", id.0, message);
                Outcome::Failed(message)
            }
            Err(e) => {
                log::error!("Submission {} failed: {}", id.0, e);
                Outcome::Failed(e.to_string())
            }
        };

        match &outcome {
            Outcome::Report(result) => {
                log::info!("Submission {} scored {}/100", id.0, result.overall_score);
                self.phase = Phase::Rendering;
                self.results = Some(render_report(result));
                self.last_result = Some(result.clone());
            }
            Outcome::Failed(message) => {
                self.phase = Phase::Error;
                self.results = Some(render_error(message));
                self.last_result = None;
            }
            Outcome::Superseded => {}
        }
        outcome
    }

    /// Validates, sends and renders one submission.
    pub async fn submit(&mut self) -> Result<Outcome> {
        let Submission { id, request } = self.begin_submission()?;
        let response = self.service.evaluate(&request).await;
        Ok(self.complete_submission(id, response))
    }
}
