use serde::Serialize;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Application submitted successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit application";

/// Position in the submit lifecycle. Both end states accept a new submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Banner shown above the form after a submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub message: String,
    pub is_error: bool,
    pub phase: SubmissionPhase,
}

impl StatusRecord {
    pub fn succeeded() -> Self {
        Self {
            message: SUBMIT_SUCCESS_MESSAGE.to_string(),
            is_error: false,
            phase: SubmissionPhase::Succeeded,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
            phase: SubmissionPhase::Failed,
        }
    }

    /// Marks a submit in flight; the previous banner stays until the reply lands.
    pub fn pending(&self) -> Self {
        Self {
            phase: SubmissionPhase::Pending,
            ..self.clone()
        }
    }
}
