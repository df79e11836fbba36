//! Compiled free-text rules.

use bridge_standards::ReferenceDataset;
use bridge_standards::csv::rules::{RuleTarget, TextRule};
use regex::Regex;
use tracing::debug;

use crate::error::{AnalyzeError, Result};

/// A pattern rule with its compiled expression.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub source: String,
    pub regex: Regex,
    pub targets: Vec<RuleTarget>,
}

/// A lower-case substring rule.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub keyword: String,
    pub targets: Vec<RuleTarget>,
}

/// Pattern and keyword rules in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    patterns: Vec<PatternRule>,
    keywords: Vec<KeywordRule>,
}

impl RuleSet {
    /// Compiles the given rule tables. Keywords are lower-cased so they match
    /// the lower-cased input text.
    pub fn new(patterns: &[TextRule], keywords: &[TextRule]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.trigger).map_err(|source| {
                    AnalyzeError::InvalidPattern {
                        pattern: rule.trigger.clone(),
                        source,
                    }
                })?;
                Ok(PatternRule {
                    source: rule.trigger.clone(),
                    regex,
                    targets: rule.targets.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let keywords = keywords
            .iter()
            .map(|rule| KeywordRule {
                keyword: rule.trigger.to_lowercase(),
                targets: rule.targets.clone(),
            })
            .collect();
        Ok(Self { patterns, keywords })
    }

    pub fn from_dataset(dataset: &ReferenceDataset) -> Result<Self> {
        let rules = Self::new(dataset.patterns(), dataset.keywords())?;
        debug!(
            patterns = rules.patterns.len(),
            keywords = rules.keywords.len(),
            "compiled analyzer rules"
        );
        Ok(rules)
    }

    pub fn patterns(&self) -> &[PatternRule] {
        &self.patterns
    }

    pub fn keywords(&self) -> &[KeywordRule] {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(trigger: &str, code: &str) -> TextRule {
        TextRule {
            trigger: trigger.to_string(),
            targets: vec![RuleTarget {
                icf_code: code.to_string(),
                confidence: 0.9,
            }],
        }
    }

    #[test]
    fn keywords_are_lower_cased() {
        let rules = RuleSet::new(&[], &[rule("Ängslig", "b152")]).unwrap();
        assert_eq!(rules.keywords()[0].keyword, "ängslig");
    }

    #[test]
    fn patterns_compile_as_written() {
        let rules = RuleSet::new(&[rule("svårt att (läsa|skriva)", "d140")], &[]).unwrap();
        let regex = &rules.patterns()[0].regex;
        assert!(regex.is_match("det är svårt att läsa"));
        assert!(!regex.is_match("SVÅRT ATT LÄSA"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = RuleSet::new(&[rule("svårt att (läsa", "d140")], &[]).unwrap_err();
        assert!(matches!(
            &err,
            AnalyzeError::InvalidPattern { pattern, .. } if pattern == "svårt att (läsa"
        ));
        assert!(err.to_string().starts_with("invalid rule pattern `svårt att (läsa`"));
    }
}
