use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::form::{FieldViolation, FormRecord};
use super::ports::ApplicationGateway;
use super::status::{StatusRecord, SUBMIT_FAILURE_MESSAGE};

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Backend accepted the application; the form is reset.
    Accepted,
    /// Backend answered with an error message; the form is kept for correction.
    Rejected { message: String },
    /// Transport or decode failure; the form is kept.
    Failed { reason: String },
    /// Constraint violations stopped the submit before any request was sent.
    Blocked { violations: Vec<FieldViolation> },
    /// An earlier submit is still waiting on the backend.
    InFlight,
}

impl SubmissionOutcome {
    /// Banner to display, `None` when the attempt never left the form.
    pub fn status(&self) -> Option<StatusRecord> {
        match self {
            SubmissionOutcome::Accepted => Some(StatusRecord::succeeded()),
            SubmissionOutcome::Rejected { message } => Some(StatusRecord::failed(message.clone())),
            SubmissionOutcome::Failed { .. } => Some(StatusRecord::failed(SUBMIT_FAILURE_MESSAGE)),
            SubmissionOutcome::Blocked { .. } | SubmissionOutcome::InFlight => None,
        }
    }

    pub fn resets_form(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted)
    }
}

/// Sends completed forms to the application backend.
pub struct SubmissionClient<G> {
    gateway: Arc<G>,
}

impl<G> SubmissionClient<G>
where
    G: ApplicationGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Captures `form` for sending; the request goes out on [`PendingSubmission::resolve`].
    pub fn prepare(&self, form: &FormRecord) -> PendingSubmission<G> {
        PendingSubmission {
            form: form.clone(),
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// A form snapshot on its way to the backend.
pub struct PendingSubmission<G> {
    form: FormRecord,
    gateway: Arc<G>,
}

impl<G> PendingSubmission<G>
where
    G: ApplicationGateway,
{
    pub async fn resolve(self) -> SubmissionOutcome {
        match self.gateway.submit(&self.form).await {
            Ok(reply) => match reply.rejection() {
                Some(message) => {
                    warn!(%message, "application rejected by backend");
                    SubmissionOutcome::Rejected {
                        message: message.to_string(),
                    }
                }
                None => {
                    info!("application submitted");
                    SubmissionOutcome::Accepted
                }
            },
            Err(err) => {
                warn!(error = %err, "application submission failed");
                SubmissionOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
