//! Integration tests for the survey pipeline and config loading.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use bridge_analyze::TextAnalyzer;
use bridge_cli::config::{Config, DEFAULT_CONFIG_FILE, ReferenceChoice, load_dataset};
use bridge_cli::pipeline::{SurveyInput, UNKNOWN_QUESTION, analyze_survey};
use bridge_map::MappingEngine;
use bridge_model::SurveyAnswer;
use bridge_standards::ReferenceDataset;
use chrono::{TimeZone, Utc};

fn services() -> (TextAnalyzer, MappingEngine) {
    let dataset = Arc::new(ReferenceDataset::builtin().expect("load builtin dataset"));
    let analyzer = TextAnalyzer::new(Arc::clone(&dataset)).expect("compile rules");
    (analyzer, MappingEngine::new(dataset))
}

fn unique_temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "semantic-bridge-cli-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn survey_codes_feed_top_five_interventions() {
    let (analyzer, engine) = services();
    let survey = SurveyInput {
        survey_id: Some("gavle-2025-7b".to_string()),
        freetext_responses: vec![
            SurveyAnswer {
                question_id: Some("q1".to_string()),
                response: Some(
                    "Ibland är det svårt att koncentrera mig när det är högt ljud i klassrummet."
                        .to_string(),
                ),
            },
            SurveyAnswer::new("Jag känner mig ensam"),
            SurveyAnswer::new("   "),
        ],
        ..SurveyInput::default()
    };
    let at = Utc.with_ymd_and_hms(2025, 11, 3, 8, 30, 0).unwrap();

    let analysis = analyze_survey(&analyzer, &engine, &survey, at);
    assert_eq!(analysis.analyzed_at, at);
    assert_eq!(analysis.freetext_analysis.len(), 2);
    assert_eq!(analysis.freetext_analysis[1].question_id, UNKNOWN_QUESTION);
    assert_eq!(analysis.aggregated_icf_codes, vec!["b140", "e250", "d160", "d710"]);

    let codes: Vec<_> = analysis
        .ksi_suggestions
        .iter()
        .map(|s| s.suggested_code.as_str())
        .collect();
    insta::assert_snapshot!(codes.join(" "), @"QD2-SM QD2-RB SC2-AA SC2-PM SC2-RA");
}

#[test]
fn survey_json_uses_defaults_for_missing_fields() {
    let survey: SurveyInput =
        serde_json::from_str(r#"{"freetext_responses": [{"response": "Jag är orolig"}]}"#)
            .unwrap();
    assert!(survey.survey_id.is_none());
    assert!(survey.domain_scores.is_empty());
    assert_eq!(survey.freetext_responses[0].text(), Some("Jag är orolig"));
}

#[test]
fn config_is_discovered_in_working_directory() {
    let dir = unique_temp_dir("discover");
    fs::write(
        dir.join(DEFAULT_CONFIG_FILE),
        "reference_dir = \"reference\"\n[analysis]\nmin_frequency = 3\n",
    )
    .unwrap();

    let config = Config::discover(None, &dir).unwrap();
    assert_eq!(config.reference_dir, Some(dir.join("reference")));
    assert_eq!(config.analysis.min_frequency, 3);

    let empty = unique_temp_dir("no-config");
    assert_eq!(Config::discover(None, &empty).unwrap(), Config::default());
    assert!(Config::discover(Some(empty.join("missing.toml").as_path()), &empty).is_err());
}

#[test]
fn missing_reference_directory_is_an_error() {
    let dir = unique_temp_dir("no-reference");
    let error = load_dataset(&ReferenceChoice::Directory(dir.join("nowhere"))).unwrap_err();
    assert!(format!("{error:#}").starts_with("load reference dataset from"));
    assert!(load_dataset(&ReferenceChoice::Builtin).is_ok());
}
