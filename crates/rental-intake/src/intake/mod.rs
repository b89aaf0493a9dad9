//! Rental application intake: the form state holder and the components it
//! drives (localization, address assistance, submission).

pub mod address;
pub mod form;
pub mod localization;
pub mod ports;
pub mod registry;
pub mod router;
pub mod session;
pub mod status;
pub mod submission;

#[cfg(test)]
mod tests;

pub use address::{
    AddressAssistant, AddressSuggestion, CompletedSearch, Coordinates, LocationError,
    PendingSearch, QueryDispatcher, SearchToken,
};
pub use form::{
    ConstraintKind, EmploymentStatus, FieldValue, FieldViolation, FormError, FormField,
    FormRecord,
};
pub use localization::{
    CompletedTranslation, LabelKey, Language, LocalizationController, PendingTranslation,
    TextDirection, TranslationMap, UnsupportedLanguage,
};
pub use ports::{
    ApplicationGateway, IntegrationError, LocationProvider, PlacesProvider, SubmissionReply,
    Translator,
};
pub use registry::{SessionId, SessionRegistry, SharedSession};
pub use router::intake_router;
pub use session::{IntakeSession, SessionError, SessionView};
pub use status::{StatusRecord, SubmissionPhase};
pub use submission::{PendingSubmission, SubmissionClient, SubmissionOutcome};
