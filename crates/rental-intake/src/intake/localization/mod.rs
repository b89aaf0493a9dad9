//! Label catalogue, supported languages, and the controller that keeps the
//! active label snapshot in step with the selected language.

mod controller;
mod labels;
mod language;

pub use controller::{
    translate_labels, CompletedTranslation, LocalizationController, PendingTranslation,
    TranslationMap,
};
pub use labels::LabelKey;
pub use language::{Language, LanguageOption, TextDirection, UnsupportedLanguage};
