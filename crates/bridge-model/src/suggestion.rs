//! Free-text suggestions and intervention proposals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ksi::{KsiAction, KsiTarget};

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    PatternMatch,
    KeywordMatch,
    PatternMatchValidated,
    KeywordMatchValidated,
    /// A professional replaced the suggested code.
    ProfessionalOverride,
    /// A professional override that was later confirmed.
    ProfessionalValidated,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionSource::PatternMatch => "pattern_match",
            SuggestionSource::KeywordMatch => "keyword_match",
            SuggestionSource::PatternMatchValidated => "pattern_match_validated",
            SuggestionSource::KeywordMatchValidated => "keyword_match_validated",
            SuggestionSource::ProfessionalOverride => "professional_override",
            SuggestionSource::ProfessionalValidated => "professional_validated",
        }
    }

    /// The `_validated` form of this source. Already validated sources are unchanged.
    pub fn validated(self) -> Self {
        match self {
            SuggestionSource::PatternMatch => SuggestionSource::PatternMatchValidated,
            SuggestionSource::KeywordMatch => SuggestionSource::KeywordMatchValidated,
            SuggestionSource::ProfessionalOverride => SuggestionSource::ProfessionalValidated,
            validated => validated,
        }
    }

    pub fn is_validated(&self) -> bool {
        matches!(
            self,
            SuggestionSource::PatternMatchValidated
                | SuggestionSource::KeywordMatchValidated
                | SuggestionSource::ProfessionalValidated
        )
    }
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A taxonomy code suggested for a piece of free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: String,
    pub name: String,
    pub confidence: f64,
    pub source: SuggestionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// A proposed KSI intervention for an ICF code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionSuggestion {
    pub icf_code: String,
    pub icf_name: String,
    pub ksi_target: KsiTarget,
    pub ksi_target_name: String,
    pub ksi_action: KsiAction,
    pub ksi_action_name: String,
    /// `{target}-{action}`; the status axis is chosen when the intervention is planned.
    pub suggested_code: String,
    pub confidence: f64,
    pub rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_suffix_applies_once() {
        let once = SuggestionSource::KeywordMatch.validated();
        assert_eq!(once.as_str(), "keyword_match_validated");
        assert_eq!(once.validated(), once);
        assert!(once.is_validated());
        assert!(!SuggestionSource::ProfessionalOverride.is_validated());
    }
}
