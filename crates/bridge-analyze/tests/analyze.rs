use std::sync::Arc;

use bridge_analyze::TextAnalyzer;
use bridge_model::{AnalysisOptions, Suggestion, SuggestionSource, boost};
use bridge_standards::ReferenceDataset;

fn analyzer() -> TextAnalyzer {
    let dataset = ReferenceDataset::builtin().expect("load builtin dataset");
    TextAnalyzer::new(Arc::new(dataset)).expect("compile rules")
}

const CLASSROOM: &str =
    "Ibland är det svårt att koncentrera mig när det är högt ljud i klassrummet.";

#[test]
fn classroom_noise_suggests_attention_and_sound() {
    let suggestions = analyzer().analyze_text(CLASSROOM, None, 0.75);
    let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["b140", "e250", "d160"]);
    assert!(suggestions.iter().all(|s| s.confidence >= 0.80));

    let attention = &suggestions[0];
    assert_eq!(attention.name, "Uppmärksamhetsfunktioner");
    assert_eq!(attention.source, SuggestionSource::PatternMatch);
    assert_eq!(attention.matched_text.as_deref(), Some("svårt att koncentrera"));
    insta::assert_snapshot!(
        attention.rationale.as_deref().unwrap_or_default(),
        @"Mönster matchade: 'svårt att (koncentrera|fokusera)'"
    );

    let sound = &suggestions[1];
    assert_eq!(sound.source, SuggestionSource::KeywordMatch);
    assert_eq!(sound.matched_text.as_deref(), Some("ljud"));
    assert_eq!(sound.confidence, 0.88);
}

#[test]
fn min_confidence_filters_targets() {
    let suggestions = analyzer().analyze_text(CLASSROOM, None, 0.90);
    let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["b140"]);
}

#[test]
fn upper_case_swedish_text_is_matched() {
    let suggestions = analyzer().analyze_text("JAG ÄR ÄNGSLIG", None, 0.75);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].code, "b152");
    assert_eq!(suggestions[0].matched_text.as_deref(), Some("ängslig"));
}

#[test]
fn upper_case_text_still_hits_patterns() {
    let suggestions = analyzer().analyze_text("SVÅRT ATT KONCENTRERA MIG", None, 0.75);
    let b140 = suggestions
        .iter()
        .find(|s| s.code == "b140")
        .expect("b140 suggested");
    assert_eq!(b140.source, SuggestionSource::PatternMatch);
    assert_eq!(b140.matched_text.as_deref(), Some("svårt att koncentrera"));
}

#[test]
fn context_boost_applies_once_per_suggestion() {
    let analyzer = analyzer();
    let plain = analyzer.analyze_text(CLASSROOM, None, 0.75);
    let boosted = analyzer.analyze_text(CLASSROOM, Some("utvecklas"), 0.75);

    let find = |list: &[Suggestion], code: &str| {
        list.iter().find(|s| s.code == code).map(|s| s.confidence)
    };
    // b140 and d160 each match more than one prefix of the context
    assert_eq!(find(&boosted, "b140"), Some(boost(0.92)));
    assert_eq!(find(&boosted, "d160"), Some(boost(0.87)));
    assert_eq!(find(&boosted, "e250"), find(&plain, "e250"));

    let codes: Vec<_> = boosted.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["b140", "d160", "e250"]);
}

#[test]
fn unknown_context_changes_nothing() {
    let analyzer = analyzer();
    assert_eq!(
        analyzer.analyze_text(CLASSROOM, Some("skolgård"), 0.75),
        analyzer.analyze_text(CLASSROOM, None, 0.75)
    );
}

#[test]
fn equal_confidences_keep_emission_order() {
    let suggestions = analyzer().analyze_text("Det är svårt att läsa", None, 0.75);
    let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["d140", "d145", "d150"]);
    assert!(suggestions.iter().all(|s| s.confidence == 0.90));
}

#[test]
fn later_keywords_do_not_re_emit_codes() {
    let suggestions = analyzer().analyze_text("Jag blir mobbad och retad", None, 0.75);
    let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["d710", "e165"]);
    assert_eq!(suggestions[1].confidence, 0.88);
    assert_eq!(suggestions[1].matched_text.as_deref(), Some("mobbad"));
}

#[test]
fn options_drive_threshold_and_context() {
    let options = AnalysisOptions::default().with_context(Some("ma_bra".to_string()));
    let suggestions = analyzer().analyze("Jag sover dåligt och är trött", &options);
    let confidences: Vec<_> = suggestions
        .iter()
        .map(|s| (s.code.as_str(), s.confidence))
        .collect();
    assert_eq!(confidences, vec![("b1300", boost(0.88)), ("b134", boost(0.82))]);
}
