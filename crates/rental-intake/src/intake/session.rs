use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::address::{
    AddressAssistant, AddressSuggestion, CompletedSearch, LocationError, PendingSearch,
    SearchToken,
};
use super::form::{EmploymentStatus, FieldValue, FormError, FormField, FormRecord};
use super::localization::{
    CompletedTranslation, LabelKey, Language, LanguageOption, LocalizationController,
    PendingTranslation, TextDirection, TranslationMap, UnsupportedLanguage,
};
use super::ports::{ApplicationGateway, LocationProvider, PlacesProvider, Translator};
use super::status::{StatusRecord, SubmissionPhase};
use super::submission::{PendingSubmission, SubmissionClient, SubmissionOutcome};
use crate::config::IntakeConfig;

/// One applicant's view of the intake form.
///
/// Owns the form, status banner, label snapshot, and address suggestions;
/// every operation goes through `&mut self`.
pub struct IntakeSession<T, P, G> {
    form: FormRecord,
    status: StatusRecord,
    localization: LocalizationController<T>,
    address: AddressAssistant<P>,
    submission: SubmissionClient<G>,
}

impl<T, P, G> IntakeSession<T, P, G>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    pub fn new(translator: Arc<T>, places: Arc<P>, gateway: Arc<G>, config: &IntakeConfig) -> Self {
        let localization = if config.cache_translations {
            LocalizationController::with_cache(translator)
        } else {
            LocalizationController::new(translator)
        };

        Self {
            form: FormRecord::default(),
            status: StatusRecord::default(),
            localization,
            address: AddressAssistant::new(places),
            submission: SubmissionClient::new(gateway),
        }
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    pub fn status(&self) -> &StatusRecord {
        &self.status
    }

    pub fn labels(&self) -> &TranslationMap {
        self.localization.snapshot()
    }

    pub fn language(&self) -> Language {
        self.localization.language()
    }

    pub fn suggestions(&self) -> &[AddressSuggestion] {
        self.address.suggestions()
    }

    pub fn location_error(&self) -> Option<&LocationError> {
        self.address.location_error()
    }

    /// Applies one input event. Address edits should go through
    /// [`IntakeSession::search_address`] so suggestions follow the text.
    pub fn update_field(
        &mut self,
        field: FormField,
        value: FieldValue,
    ) -> Result<&FormRecord, FormError> {
        self.form = self.form.with_value(field, value)?;
        Ok(&self.form)
    }

    /// Starts a language switch; `None` means the labels were settled on the spot.
    pub fn begin_language_change(&mut self, language: Language) -> Option<PendingTranslation<T>> {
        self.localization.begin_select(language)
    }

    pub fn begin_label_refresh(&mut self) -> Option<PendingTranslation<T>> {
        self.localization.begin_refresh()
    }

    pub fn complete_language_change(&mut self, completed: CompletedTranslation) -> bool {
        self.localization.complete(completed)
    }

    pub async fn select_language(&mut self, language: Language) -> &TranslationMap {
        self.localization.select(language).await
    }

    pub async fn select_language_code(
        &mut self,
        code: &str,
    ) -> Result<&TranslationMap, UnsupportedLanguage> {
        let language = Language::from_code(code)?;
        Ok(self.localization.select(language).await)
    }

    pub async fn refresh_labels(&mut self) -> &TranslationMap {
        self.localization.refresh().await
    }

    /// Stores the typed address and issues a search for it, if any.
    pub fn begin_address_search(&mut self, text: impl Into<String>) -> Option<PendingSearch<P>> {
        self.form = self.form.with_address(text);
        self.address.begin_search(&self.form.current_address)
    }

    pub fn is_search_current(&self, token: SearchToken) -> bool {
        self.address.is_current(token)
    }

    pub fn complete_address_search(&mut self, completed: CompletedSearch) -> bool {
        self.address.complete_search(completed)
    }

    pub async fn search_address(&mut self, text: impl Into<String>) -> &[AddressSuggestion] {
        if let Some(pending) = self.begin_address_search(text) {
            let completed = pending.resolve().await;
            self.address.complete_search(completed);
        }
        self.address.suggestions()
    }

    pub fn select_suggestion(&mut self, place_id: &str) -> Result<&FormRecord, SessionError> {
        let chosen = self
            .address
            .select(place_id)
            .ok_or_else(|| SessionError::UnknownSuggestion(place_id.to_string()))?;
        self.form = self.form.with_address(chosen.description);
        Ok(&self.form)
    }

    /// Fills the address from the device position. Errors leave the form untouched
    /// and are also kept for the view.
    pub async fn use_current_location<L>(&mut self, location: &L) -> Result<(), LocationError>
    where
        L: LocationProvider,
    {
        if let Some(description) = self.address.locate(location).await? {
            self.form = self.form.with_address(description);
        }
        Ok(())
    }

    /// Checks the form and marks the submit pending.
    ///
    /// `Err` carries the outcome of a submit that never left the form: either
    /// constraint violations or an earlier submit still in flight.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission<G>, SubmissionOutcome> {
        if self.status.phase == SubmissionPhase::Pending {
            return Err(SubmissionOutcome::InFlight);
        }
        if let Err(violations) = self.form.check_constraints() {
            return Err(SubmissionOutcome::Blocked { violations });
        }

        self.status = self.status.pending();
        Ok(self.submission.prepare(&self.form))
    }

    /// Applies the backend's answer to the banner and, on success, resets the form.
    pub fn complete_submit(&mut self, outcome: &SubmissionOutcome) {
        if let Some(status) = outcome.status() {
            self.status = status;
        }
        if outcome.resets_form() {
            self.form = FormRecord::default();
        }
    }

    pub async fn submit(&mut self) -> SubmissionOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let outcome = pending.resolve().await;
        self.complete_submit(&outcome);
        outcome
    }

    pub fn view(&self) -> SessionView {
        let labels = self.labels();
        let location_error = self.location_error();

        SessionView {
            language: labels.language(),
            direction: labels.direction(),
            labels: labels.resolved(),
            languages: Language::ALL.into_iter().map(LanguageOption::from).collect(),
            employment_options: EmploymentStatus::ALL
                .into_iter()
                .map(|status| EmploymentOption {
                    value: status.value(),
                    label: labels.resolve(status.label()).to_string(),
                })
                .collect(),
            show_pet_details: self.form.has_pets,
            form: self.form.clone(),
            status: self.status.clone(),
            suggestions: self.suggestions().to_vec(),
            location_error: location_error
                .map(|_| labels.resolve(LabelKey::LocationError).to_string()),
            location_error_detail: location_error.map(ToString::to_string),
        }
    }
}

/// Everything a renderer needs to draw the form.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub language: Language,
    pub direction: TextDirection,
    pub labels: BTreeMap<LabelKey, String>,
    pub languages: Vec<LanguageOption>,
    pub employment_options: Vec<EmploymentOption>,
    pub show_pet_details: bool,
    pub form: FormRecord,
    pub status: StatusRecord,
    pub suggestions: Vec<AddressSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_error_detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmploymentOption {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("intake session '{0}' not found")]
    NotFound(String),
    #[error("no address suggestion with place id '{0}'")]
    UnknownSuggestion(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Language(#[from] UnsupportedLanguage),
}
