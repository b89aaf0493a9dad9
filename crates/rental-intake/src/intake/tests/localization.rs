use super::common::*;
use crate::config::IntakeConfig;
use crate::intake::{LabelKey, Language, TextDirection, TranslationMap};

#[tokio::test]
async fn source_language_uses_original_text_without_requests() {
    let harness = Harness::default();
    let mut session = harness.session();

    let labels = session.select_language(Language::English).await.clone();

    for key in LabelKey::ALL {
        assert_eq!(labels.resolve(key), key.source_text());
    }
    assert!(harness.translator.calls().is_empty());
}

#[tokio::test]
async fn translates_every_label_once_in_catalogue_order() {
    let harness = Harness::default();
    let mut session = harness.session();

    session.select_language(Language::Spanish).await;

    let calls = harness.translator.calls();
    assert_eq!(calls.len(), LabelKey::ALL.len());
    for (key, (text, target)) in LabelKey::ALL.into_iter().zip(calls) {
        assert_eq!(text, key.source_text());
        assert_eq!(target, Language::Spanish);
    }

    let labels = session.labels();
    assert_eq!(labels.language(), Language::Spanish);
    assert!(labels.is_complete());
    assert_eq!(
        labels.resolve(LabelKey::Title),
        FakeTranslator::rendered("Rental Application", Language::Spanish)
    );
}

#[tokio::test]
async fn failed_label_keeps_source_text_and_spares_the_rest() {
    let harness = Harness::with_translator(FakeTranslator::failing_on(&["Phone"]));
    let mut session = harness.session();

    session.select_language(Language::French).await;
    let labels = session.labels();

    assert_eq!(labels.resolve(LabelKey::Phone), "Phone");
    assert_eq!(labels.translation(LabelKey::Phone), None);
    assert_eq!(labels.missing(), vec![LabelKey::Phone]);
    for key in LabelKey::ALL
        .into_iter()
        .filter(|key| *key != LabelKey::Phone)
    {
        assert_eq!(
            labels.resolve(key),
            FakeTranslator::rendered(key.source_text(), Language::French)
        );
    }
}

#[tokio::test]
async fn switching_language_replaces_the_whole_snapshot() {
    let harness = Harness::default();
    let mut session = harness.session();

    session.select_language(Language::German).await;
    session.select_language(Language::English).await;

    assert_eq!(session.labels(), &TranslationMap::source());
    assert_eq!(harness.translator.calls().len(), LabelKey::ALL.len());
}

#[tokio::test]
async fn arabic_view_renders_right_to_left() {
    let harness = Harness::default();
    let mut session = harness.session();

    session.select_language(Language::Arabic).await;
    let view = session.view();

    assert_eq!(view.direction, TextDirection::Rtl);
    assert_eq!(view.language, Language::Arabic);
    assert_eq!(view.labels.len(), LabelKey::ALL.len());
    assert_eq!(
        view.employment_options[0].label,
        FakeTranslator::rendered("Full-time", Language::Arabic)
    );
    assert_eq!(view.employment_options[0].value, "Full-time");
}

#[tokio::test]
async fn unknown_language_code_is_rejected_without_requests() {
    let harness = Harness::default();
    let mut session = harness.session();

    assert!(session.select_language_code("klingon").await.is_err());
    assert_eq!(session.language(), Language::English);
    assert!(harness.translator.calls().is_empty());
}

#[tokio::test]
async fn without_cache_every_selection_refetches() {
    let harness = Harness::default();
    let mut session = harness.session();

    session.select_language(Language::Chinese).await;
    session.select_language(Language::English).await;
    session.select_language(Language::Chinese).await;

    assert_eq!(harness.translator.calls().len(), 2 * LabelKey::ALL.len());
}

#[tokio::test]
async fn cache_reuses_complete_snapshots() {
    let harness = Harness::default();
    let config = IntakeConfig {
        cache_translations: true,
        ..IntakeConfig::default()
    };
    let mut session = harness.session_with(&config);

    session.select_language(Language::Chinese).await;
    let first = session.labels().clone();
    session.select_language(Language::English).await;
    session.select_language(Language::Chinese).await;

    assert_eq!(session.labels(), &first);
    assert_eq!(harness.translator.calls().len(), LabelKey::ALL.len());
}

#[tokio::test]
async fn cache_skips_degraded_snapshots_and_refresh_refetches() {
    let harness = Harness::with_translator(FakeTranslator::failing_on(&["Email"]));
    let config = IntakeConfig {
        cache_translations: true,
        ..IntakeConfig::default()
    };
    let mut session = harness.session_with(&config);

    session.select_language(Language::Spanish).await;
    session.select_language(Language::English).await;
    session.select_language(Language::Spanish).await;
    assert_eq!(harness.translator.calls().len(), 2 * LabelKey::ALL.len());

    session.refresh_labels().await;
    assert_eq!(harness.translator.calls().len(), 3 * LabelKey::ALL.len());
    assert_eq!(session.labels().language(), Language::Spanish);
}

#[tokio::test]
async fn reselecting_the_active_language_keeps_its_labels() {
    let harness = Harness::default();
    let mut session = harness.session();

    session.select_language(Language::Spanish).await;
    let first = session.labels().clone();
    assert_eq!(harness.translator.calls().len(), LabelKey::ALL.len());

    session.select_language(Language::Spanish).await;
    session
        .select_language_code("es")
        .await
        .expect("supported code");

    assert_eq!(harness.translator.calls().len(), LabelKey::ALL.len());
    assert_eq!(session.labels(), &first);
}

#[tokio::test]
async fn late_translation_does_not_override_a_newer_choice() {
    let harness = Harness::default();
    let mut session = harness.session();

    let spanish = session
        .begin_language_change(Language::Spanish)
        .expect("spanish needs translation");
    let arabic = session
        .begin_language_change(Language::Arabic)
        .expect("arabic needs translation");

    let arabic = arabic.resolve().await;
    let spanish = spanish.resolve().await;
    assert!(session.complete_language_change(arabic));
    assert!(!session.complete_language_change(spanish));

    assert_eq!(session.language(), Language::Arabic);
    assert_eq!(session.labels().language(), Language::Arabic);
}
