//! Survey analysis: free-text answers to ICF codes to KSI intervention proposals.

use std::collections::BTreeMap;

use bridge_analyze::TextAnalyzer;
use bridge_map::MappingEngine;
use bridge_model::options::DEFAULT_MIN_CONFIDENCE;
use bridge_model::{InterventionContext, InterventionSuggestion, Suggestion, SurveyAnswer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// Intervention proposals kept per survey.
pub const MAX_SURVEY_INTERVENTIONS: usize = 5;
/// Question id used when an answer has none.
pub const UNKNOWN_QUESTION: &str = "unknown";

/// One completed wellbeing survey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyInput {
    pub survey_id: Option<String>,
    pub student_id: Option<String>,
    /// Quantitative score per wellbeing domain, passed through unchanged.
    pub domain_scores: BTreeMap<String, f64>,
    pub freetext_responses: Vec<SurveyAnswer>,
}

/// Suggestions for one answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    pub question_id: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyAnalysis {
    pub survey_id: Option<String>,
    pub student_id: Option<String>,
    pub domain_scores: BTreeMap<String, f64>,
    /// Answers with text, in input order.
    pub freetext_analysis: Vec<QuestionAnalysis>,
    /// Unique ICF codes in first-seen order.
    pub aggregated_icf_codes: Vec<String>,
    pub ksi_suggestions: Vec<InterventionSuggestion>,
    pub analyzed_at: DateTime<Utc>,
}

/// Analyzes every free-text answer at the single-text threshold, then proposes
/// school interventions for the codes found.
pub fn analyze_survey(
    analyzer: &TextAnalyzer,
    engine: &MappingEngine,
    survey: &SurveyInput,
    analyzed_at: DateTime<Utc>,
) -> SurveyAnalysis {
    let span = info_span!(
        "survey",
        survey_id = survey.survey_id.as_deref().unwrap_or(UNKNOWN_QUESTION)
    );
    let _guard = span.enter();

    let mut freetext_analysis = Vec::new();
    let mut aggregated_icf_codes: Vec<String> = Vec::new();
    for answer in &survey.freetext_responses {
        let Some(text) = answer.text() else {
            continue;
        };
        let question_id = answer
            .question_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_QUESTION.to_string());
        let suggestions = analyzer.analyze_text(text, None, DEFAULT_MIN_CONFIDENCE);
        debug!(
            question_id = %question_id,
            text = redact_value(text),
            suggestions = suggestions.len(),
            "answer analyzed"
        );
        for suggestion in &suggestions {
            if !aggregated_icf_codes.contains(&suggestion.code) {
                aggregated_icf_codes.push(suggestion.code.clone());
            }
        }
        freetext_analysis.push(QuestionAnalysis {
            question_id,
            suggestions,
        });
    }

    let mut ksi_suggestions =
        engine.suggest_interventions(&aggregated_icf_codes, InterventionContext::School);
    ksi_suggestions.truncate(MAX_SURVEY_INTERVENTIONS);
    info!(
        answers = freetext_analysis.len(),
        codes = aggregated_icf_codes.len(),
        interventions = ksi_suggestions.len(),
        "survey analyzed"
    );

    SurveyAnalysis {
        survey_id: survey.survey_id.clone(),
        student_id: survey.student_id.clone(),
        domain_scores: survey.domain_scores.clone(),
        freetext_analysis,
        aggregated_icf_codes,
        ksi_suggestions,
        analyzed_at,
    }
}
