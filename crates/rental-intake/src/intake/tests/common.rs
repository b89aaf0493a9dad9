use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::config::IntakeConfig;
use crate::intake::{
    AddressSuggestion, ApplicationGateway, FieldValue, FormField, FormRecord, IntakeSession,
    IntegrationError, Language, PlacesProvider, SessionRegistry, SubmissionReply, Translator,
};

pub(super) type TestSession = IntakeSession<FakeTranslator, FakePlaces, FakeGateway>;
pub(super) type TestRegistry = SessionRegistry<FakeTranslator, FakePlaces, FakeGateway>;

#[derive(Default)]
pub(super) struct FakeTranslator {
    failing: HashSet<String>,
    delay: Duration,
    calls: Mutex<Vec<(String, Language)>>,
}

impl FakeTranslator {
    pub(super) fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing: texts.iter().map(|text| text.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Answers every label after `per_label` of (tokio) time.
    pub(super) fn slow(per_label: Duration) -> Self {
        Self {
            delay: per_label,
            ..Self::default()
        }
    }

    pub(super) fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().expect("translator mutex poisoned").clone()
    }

    pub(super) fn rendered(text: &str, target: Language) -> String {
        format!("[{}] {}", target.code(), text)
    }
}

impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, IntegrationError> {
        self.calls
            .lock()
            .expect("translator mutex poisoned")
            .push((text.to_string(), target));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.contains(text) {
            return Err(IntegrationError::Status(500));
        }
        Ok(Self::rendered(text, target))
    }
}

#[derive(Default)]
pub(super) struct FakePlaces {
    responses: Mutex<HashMap<String, Result<Vec<AddressSuggestion>, IntegrationError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub(super) fn respond(&self, input: &str, suggestions: Vec<AddressSuggestion>) {
        self.responses
            .lock()
            .expect("places mutex poisoned")
            .insert(input.to_string(), Ok(suggestions));
    }

    pub(super) fn fail(&self, input: &str) {
        self.responses
            .lock()
            .expect("places mutex poisoned")
            .insert(
                input.to_string(),
                Err(IntegrationError::Transport("connection reset".to_string())),
            );
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("places mutex poisoned").clone()
    }
}

impl PlacesProvider for FakePlaces {
    async fn autocomplete(&self, input: &str) -> Result<Vec<AddressSuggestion>, IntegrationError> {
        self.calls
            .lock()
            .expect("places mutex poisoned")
            .push(input.to_string());
        self.responses
            .lock()
            .expect("places mutex poisoned")
            .get(input)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub(super) struct FakeGateway {
    reply: Mutex<Result<SubmissionReply, IntegrationError>>,
    delay: Duration,
    submissions: Mutex<Vec<FormRecord>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            reply: Mutex::new(Ok(SubmissionReply::accepted())),
            delay: Duration::ZERO,
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub(super) fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub(super) fn reply_with(&self, reply: Result<SubmissionReply, IntegrationError>) {
        *self.reply.lock().expect("gateway mutex poisoned") = reply;
    }

    pub(super) fn submissions(&self) -> Vec<FormRecord> {
        self.submissions
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

impl ApplicationGateway for FakeGateway {
    async fn submit(&self, form: &FormRecord) -> Result<SubmissionReply, IntegrationError> {
        self.submissions
            .lock()
            .expect("gateway mutex poisoned")
            .push(form.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.lock().expect("gateway mutex poisoned").clone()
    }
}

#[derive(Default, Clone)]
pub(super) struct Harness {
    pub(super) translator: Arc<FakeTranslator>,
    pub(super) places: Arc<FakePlaces>,
    pub(super) gateway: Arc<FakeGateway>,
}

impl Harness {
    pub(super) fn with_translator(translator: FakeTranslator) -> Self {
        Self {
            translator: Arc::new(translator),
            ..Self::default()
        }
    }

    pub(super) fn with_gateway(gateway: FakeGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            ..Self::default()
        }
    }

    pub(super) fn session(&self) -> TestSession {
        self.session_with(&IntakeConfig::default())
    }

    pub(super) fn session_with(&self, config: &IntakeConfig) -> TestSession {
        IntakeSession::new(
            Arc::clone(&self.translator),
            Arc::clone(&self.places),
            Arc::clone(&self.gateway),
            config,
        )
    }

    pub(super) fn registry(&self, config: IntakeConfig) -> TestRegistry {
        SessionRegistry::new(
            Arc::clone(&self.translator),
            Arc::clone(&self.places),
            Arc::clone(&self.gateway),
            config,
        )
    }
}

pub(super) fn suggestion(place_id: &str, description: &str) -> AddressSuggestion {
    AddressSuggestion {
        place_id: place_id.to_string(),
        description: description.to_string(),
    }
}

pub(super) fn completed_form() -> FormRecord {
    FormRecord {
        first_name: "Jordan".to_string(),
        last_name: "Rivera".to_string(),
        email: "jordan.rivera@example.com".to_string(),
        phone: "515-555-0142".to_string(),
        current_address: "100 Main St, Springfield".to_string(),
        employment_status: "Full-time".to_string(),
        monthly_income: "4800".to_string(),
        desired_move_in_date: "2026-11-01".to_string(),
        number_of_occupants: "2".to_string(),
        has_pets: true,
        pet_details: "One neutered cat".to_string(),
        credit_score: "712".to_string(),
        additional_notes: "Prefers a ground floor unit".to_string(),
    }
}

/// Types every answer into the session the way an applicant would.
pub(super) fn fill_form(session: &mut TestSession, form: &FormRecord) {
    for field in FormField::ALL {
        let value = match form.text(field) {
            Some(text) => FieldValue::Text(text.to_string()),
            None => FieldValue::Flag(form.has_pets),
        };
        session
            .update_field(field, value)
            .expect("field accepts value");
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
