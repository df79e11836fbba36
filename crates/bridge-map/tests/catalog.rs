use std::sync::Arc;

use bridge_map::MappingEngine;
use bridge_model::{InterventionContext, KsiAction, KsiTarget, Taxonomy};
use bridge_standards::ReferenceDataset;

fn engine() -> MappingEngine {
    MappingEngine::new(Arc::new(
        ReferenceDataset::builtin().expect("load builtin dataset"),
    ))
}

#[test]
fn school_interventions_for_activity_code() {
    let suggestions = engine().suggest_interventions(&["d160"], InterventionContext::School);
    let codes: Vec<_> = suggestions.iter().map(|s| s.suggested_code.as_str()).collect();
    assert_eq!(
        codes,
        vec![
            "SC2-AA", "SC2-PM", "SC2-RA", "SC2-PN", "SCA-AA", "SCA-PM", "SCA-RA", "SCA-PN"
        ]
    );
    let first = &suggestions[0];
    assert_eq!(first.icf_name, "Att fokusera uppmärksamhet");
    assert_eq!(first.ksi_action_name, "Bedömning");
    assert_eq!(
        first.rationale,
        "Bedömning behövs för att kartlägga omfattning"
    );
    assert!((first.confidence - 0.97).abs() < 1e-12);
}

#[test]
fn environment_and_unknown_codes() {
    let suggestions =
        engine().suggest_interventions(&["e250", "x999"], InterventionContext::School);
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions.iter().all(|s| s.ksi_target == KsiTarget::QD2));
    assert_eq!(suggestions[0].ksi_action, KsiAction::SM);
    assert_eq!(suggestions[1].ksi_action, KsiAction::RB);
}

#[test]
fn general_context_uses_fixed_actions() {
    let suggestions = engine().suggest_interventions(&["d160"], InterventionContext::General);
    assert_eq!(suggestions.len(), 6);
    let actions: Vec<_> = suggestions[..3].iter().map(|s| s.ksi_action).collect();
    assert_eq!(actions, vec![KsiAction::AA, KsiAction::PM, KsiAction::RA]);
}

#[test]
fn core_sets_resolve_names() {
    let engine = engine();
    assert_eq!(engine.core_set_conditions().len(), 5);

    let attention = engine.core_set("attention_difficulties");
    assert_eq!(attention.codes.len(), 6);
    assert_eq!(
        attention.codes[2],
        (
            "b1401".to_string(),
            "Funktioner för att skifta uppmärksamhet".to_string()
        )
    );

    let reading = engine.core_set("reading_difficulties");
    assert!(reading.codes.contains(&("b1670".to_string(), "b1670".to_string())));

    assert!(engine.core_set("unknown").codes.is_empty());
}

#[test]
fn search_covers_icf_and_ksi() {
    let engine = engine();
    let hits = engine.search_codes("UPPMÄRKSAMHET", &[]);
    let icf = hits.iter().filter(|h| h.system == Taxonomy::Icf).count();
    let ksi: Vec<_> = hits
        .iter()
        .filter(|h| h.system == Taxonomy::Ksi)
        .map(|h| h.code.as_str())
        .collect();
    assert_eq!(icf, 6);
    assert_eq!(ksi, vec!["SCA"]);

    let only_ksi = engine.search_codes("sc", &[Taxonomy::Ksi]);
    assert!(only_ksi.iter().all(|h| h.system == Taxonomy::Ksi));
    assert!(engine.search_codes("  ", &[]).is_empty());
}
