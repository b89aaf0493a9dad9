use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};

use super::labels::LabelKey;
use super::language::{Language, TextDirection};
use crate::intake::ports::Translator;

/// Immutable label snapshot for one language.
///
/// Lookups are two-tier: the translated entry when present, otherwise the
/// label's source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationMap {
    language: Language,
    entries: Arc<BTreeMap<LabelKey, String>>,
}

impl TranslationMap {
    /// Snapshot for the source language: every label maps to its own text.
    pub fn source() -> Self {
        let entries = LabelKey::ALL
            .into_iter()
            .map(|key| (key, key.source_text().to_string()))
            .collect();
        Self {
            language: Language::SOURCE,
            entries: Arc::new(entries),
        }
    }

    pub fn translated(language: Language, entries: BTreeMap<LabelKey, String>) -> Self {
        Self {
            language,
            entries: Arc::new(entries),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    pub fn resolve(&self, key: LabelKey) -> &str {
        self.entries
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.source_text())
    }

    /// Primary-tier entry only.
    pub fn translation(&self, key: LabelKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// True when every label has a primary entry.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == LabelKey::ALL.len()
    }

    /// Labels that fell back to source text.
    pub fn missing(&self) -> Vec<LabelKey> {
        LabelKey::ALL
            .into_iter()
            .filter(|key| !self.entries.contains_key(key))
            .collect()
    }

    pub fn resolved(&self) -> BTreeMap<LabelKey, String> {
        LabelKey::ALL
            .into_iter()
            .map(|key| (key, self.resolve(key).to_string()))
            .collect()
    }
}

impl Default for TranslationMap {
    fn default() -> Self {
        Self::source()
    }
}

/// Keeps the active label snapshot in sync with the selected language.
///
/// Switching is split in two so the caller can release the session while the
/// translator is busy: [`LocalizationController::begin_select`] hands out a
/// [`PendingTranslation`], and [`LocalizationController::complete`] applies it
/// unless a later request superseded it.
pub struct LocalizationController<T> {
    translator: Arc<T>,
    active: TranslationMap,
    cache: Option<HashMap<Language, TranslationMap>>,
    generation: u64,
}

impl<T> LocalizationController<T>
where
    T: Translator + 'static,
{
    pub fn new(translator: Arc<T>) -> Self {
        Self {
            translator,
            active: TranslationMap::source(),
            cache: None,
            generation: 0,
        }
    }

    /// Like [`LocalizationController::new`], but remembers fully translated snapshots.
    pub fn with_cache(translator: Arc<T>) -> Self {
        Self {
            cache: Some(HashMap::new()),
            ..Self::new(translator)
        }
    }

    pub fn snapshot(&self) -> &TranslationMap {
        &self.active
    }

    pub fn language(&self) -> Language {
        self.active.language()
    }

    /// Starts a switch to `language`.
    ///
    /// Returns `None` when the snapshot could be settled without the
    /// translator: the language is already active, is the source language, or
    /// is cached. Any earlier pending switch is retired either way.
    pub fn begin_select(&mut self, language: Language) -> Option<PendingTranslation<T>> {
        self.generation += 1;

        if language == self.active.language() {
            return None;
        }
        if language.is_source() {
            self.active = TranslationMap::source();
            return None;
        }
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(&language)) {
            debug!(language = language.code(), "reusing cached label translations");
            self.active = cached.clone();
            return None;
        }

        Some(self.pending(language))
    }

    /// Starts a refetch of the active language, bypassing the cache.
    pub fn begin_refresh(&mut self) -> Option<PendingTranslation<T>> {
        self.generation += 1;
        let language = self.active.language();
        if let Some(cache) = self.cache.as_mut() {
            cache.remove(&language);
        }
        if language.is_source() {
            return None;
        }
        Some(self.pending(language))
    }

    /// Installs a finished translation. Returns `false` when it was superseded.
    pub fn complete(&mut self, completed: CompletedTranslation) -> bool {
        if completed.generation != self.generation {
            debug!(
                language = completed.snapshot.language().code(),
                "discarding superseded label translations"
            );
            return false;
        }

        if completed.snapshot.is_complete() {
            if let Some(cache) = self.cache.as_mut() {
                cache.insert(completed.snapshot.language(), completed.snapshot.clone());
            }
        }
        self.active = completed.snapshot;
        true
    }

    pub async fn select(&mut self, language: Language) -> &TranslationMap {
        if let Some(pending) = self.begin_select(language) {
            let completed = pending.resolve().await;
            self.complete(completed);
        }
        &self.active
    }

    pub async fn refresh(&mut self) -> &TranslationMap {
        if let Some(pending) = self.begin_refresh() {
            let completed = pending.resolve().await;
            self.complete(completed);
        }
        &self.active
    }

    fn pending(&self, language: Language) -> PendingTranslation<T> {
        PendingTranslation {
            generation: self.generation,
            language,
            translator: Arc::clone(&self.translator),
        }
    }
}

/// A label switch waiting on the translator.
pub struct PendingTranslation<T> {
    generation: u64,
    language: Language,
    translator: Arc<T>,
}

impl<T> PendingTranslation<T>
where
    T: Translator,
{
    pub fn language(&self) -> Language {
        self.language
    }

    pub async fn resolve(self) -> CompletedTranslation {
        let snapshot = translate_labels(self.translator.as_ref(), self.language).await;
        CompletedTranslation {
            generation: self.generation,
            snapshot,
        }
    }
}

#[derive(Debug)]
pub struct CompletedTranslation {
    generation: u64,
    snapshot: TranslationMap,
}

/// Translates every label, one request at a time. A failed label keeps its
/// source text without affecting the others.
pub async fn translate_labels<T>(translator: &T, language: Language) -> TranslationMap
where
    T: Translator,
{
    let mut entries = BTreeMap::new();

    for key in LabelKey::ALL {
        match translator.translate(key.source_text(), language).await {
            Ok(text) => {
                entries.insert(key, text);
            }
            Err(err) => {
                warn!(
                    label = key.key(),
                    language = language.code(),
                    error = %err,
                    "translation failed; keeping source text"
                );
            }
        }
    }

    debug!(
        language = language.code(),
        translated = entries.len(),
        "label translations refreshed"
    );
    TranslationMap::translated(language, entries)
}
