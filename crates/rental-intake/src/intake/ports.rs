//! Outbound seams used by the intake session.
//!
//! Each trait covers one external backend so the session can be driven by the
//! reqwest adapters in production and by in-memory fakes in tests.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::address::{AddressSuggestion, Coordinates, LocationError};
use super::form::FormRecord;
use super::localization::Language;

/// Translates one piece of source text into the target language.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> impl Future<Output = Result<String, IntegrationError>> + Send;
}

/// Address candidates for free text or a `"lat,lng"` pair.
pub trait PlacesProvider: Send + Sync {
    fn autocomplete(
        &self,
        input: &str,
    ) -> impl Future<Output = Result<Vec<AddressSuggestion>, IntegrationError>> + Send;
}

/// Application backend receiving completed forms.
pub trait ApplicationGateway: Send + Sync {
    fn submit(
        &self,
        form: &FormRecord,
    ) -> impl Future<Output = Result<SubmissionReply, IntegrationError>> + Send;
}

/// Platform location capability.
pub trait LocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Body returned by the application backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReply {
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmissionReply {
    pub fn accepted() -> Self {
        Self { error: None }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Error text reported by the backend; an empty string counts as no error.
    pub fn rejection(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

/// Failure of an outbound HTTP integration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrationError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("response carried no translation")]
    EmptyTranslation,
}
