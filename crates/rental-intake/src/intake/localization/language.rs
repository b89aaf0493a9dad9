use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// UI languages offered by the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    /// Language the label catalogue is authored in.
    pub const SOURCE: Language = Language::English;

    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Arabic,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh",
            Language::Arabic => "ar",
        }
    }

    /// Name shown in the picker, written in the language itself where the picker does so.
    pub const fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::French => "Français",
            Language::German => "Deutsch",
            Language::Chinese => "Chinese",
            Language::Arabic => "العربية",
        }
    }

    pub const fn direction(self) -> TextDirection {
        match self {
            Language::Arabic => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    pub fn is_source(self) -> bool {
        self == Self::SOURCE
    }

    pub fn from_code(code: &str) -> Result<Self, UnsupportedLanguage> {
        let normalized = code.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|language| language.code() == normalized)
            .ok_or_else(|| UnsupportedLanguage(code.to_string()))
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::SOURCE
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code '{0}'")]
pub struct UnsupportedLanguage(pub String);

/// Picker entry for the session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

impl From<Language> for LanguageOption {
    fn from(language: Language) -> Self {
        Self {
            code: language.code(),
            name: language.display_name(),
        }
    }
}
