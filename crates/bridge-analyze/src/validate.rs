//! Professional validation of suggestions.

use bridge_model::confidence::boost;
use bridge_model::{Suggestion, SuggestionSource};
use tracing::debug;

use crate::analyzer::TextAnalyzer;

/// Rationale attached to professional overrides.
pub const OVERRIDE_RATIONALE: &str = "Professionell validering";

impl TextAnalyzer {
    /// Confirms or replaces a suggestion, returning a new value.
    ///
    /// With `override_code`, the result carries that code at confidence 1.0
    /// with source `professional_override` and keeps the original matched
    /// text. Without it, the confidence is boosted (capped at 0.98) and the
    /// source gains its `_validated` form. Repeated validation compounds the
    /// boost up to the cap.
    pub fn validate_suggestion(
        &self,
        suggestion: &Suggestion,
        override_code: Option<&str>,
    ) -> Suggestion {
        match override_code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => {
                debug!(from = %suggestion.code, to = code, "suggestion overridden");
                Suggestion {
                    code: code.to_string(),
                    name: self.dataset().icf_name(code).unwrap_or(code).to_string(),
                    confidence: 1.0,
                    source: SuggestionSource::ProfessionalOverride,
                    matched_text: suggestion.matched_text.clone(),
                    rationale: Some(OVERRIDE_RATIONALE.to_string()),
                }
            }
            None => Suggestion {
                confidence: boost(suggestion.confidence),
                source: suggestion.source.validated(),
                ..suggestion.clone()
            },
        }
    }
}
