use std::sync::Arc;

use bridge_analyze::TextAnalyzer;
use bridge_model::SuggestionSource;
use bridge_standards::ReferenceDataset;

fn analyzer() -> TextAnalyzer {
    let dataset = ReferenceDataset::builtin().expect("load builtin dataset");
    TextAnalyzer::new(Arc::new(dataset)).expect("compile rules")
}

#[test]
fn validation_boosts_and_marks_the_source() {
    let analyzer = analyzer();
    let original = analyzer.analyze_text("Jag är orolig", None, 0.75).remove(0);
    assert_eq!(original.source, SuggestionSource::KeywordMatch);

    let validated = analyzer.validate_suggestion(&original, None);
    assert_eq!(validated.source, SuggestionSource::KeywordMatchValidated);
    assert_eq!(validated.confidence, 0.98);
    assert_eq!(validated.code, original.code);
    assert_eq!(original.confidence, 0.94);
    assert_eq!(original.source, SuggestionSource::KeywordMatch);
}

#[test]
fn override_replaces_code_and_keeps_matched_text() {
    let analyzer = analyzer();
    let original = analyzer.analyze_text("Jag är orolig", None, 0.75).remove(0);
    let replaced = analyzer.validate_suggestion(&original, Some("d240"));
    assert_eq!(replaced.code, "d240");
    assert_eq!(replaced.name, "Att hantera stress och andra psykologiska krav");
    assert_eq!(replaced.confidence, 1.0);
    assert_eq!(replaced.source, SuggestionSource::ProfessionalOverride);
    assert_eq!(replaced.matched_text, original.matched_text);
    assert_eq!(replaced.rationale.as_deref(), Some("Professionell validering"));

    let unknown = analyzer.validate_suggestion(&original, Some("d999"));
    assert_eq!(unknown.name, "d999");
}

#[test]
fn blank_override_validates_instead() {
    let analyzer = analyzer();
    let original = analyzer.analyze_text("Jag är orolig", None, 0.75).remove(0);
    let validated = analyzer.validate_suggestion(&original, Some("  "));
    assert_eq!(validated.source, SuggestionSource::KeywordMatchValidated);
}
