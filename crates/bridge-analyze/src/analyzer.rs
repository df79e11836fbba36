//! Single-text analysis.

use std::collections::HashSet;
use std::sync::Arc;

use bridge_model::confidence::boost;
use bridge_model::{AnalysisOptions, Suggestion, SuggestionSource};
use bridge_standards::ReferenceDataset;
use bridge_standards::csv::rules::RuleTarget;
use tracing::{debug, trace};

use crate::error::Result;
use crate::rules::RuleSet;

/// Suggests ICF codes for free text using the dataset's pattern and keyword rules.
///
/// The analyzer holds no per-call state; share one instance across threads.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    dataset: Arc<ReferenceDataset>,
    rules: RuleSet,
}

/// Collects suggestions for one call, keeping the first emission of each code.
struct Emitter<'a> {
    dataset: &'a ReferenceDataset,
    min_confidence: f64,
    seen: HashSet<String>,
    suggestions: Vec<Suggestion>,
}

impl Emitter<'_> {
    fn emit(
        &mut self,
        targets: &[RuleTarget],
        source: SuggestionSource,
        matched_text: &str,
        rationale: &str,
    ) {
        for target in targets {
            if target.confidence < self.min_confidence || self.seen.contains(&target.icf_code) {
                continue;
            }
            trace!(code = %target.icf_code, source = %source, "rule hit");
            self.seen.insert(target.icf_code.clone());
            self.suggestions.push(Suggestion {
                code: target.icf_code.clone(),
                name: self
                    .dataset
                    .icf_name(&target.icf_code)
                    .unwrap_or(&target.icf_code)
                    .to_string(),
                confidence: target.confidence,
                source,
                matched_text: Some(matched_text.to_string()),
                rationale: Some(rationale.to_string()),
            });
        }
    }
}

impl TextAnalyzer {
    /// Compiles the dataset's rules. Fails only on a malformed pattern.
    pub fn new(dataset: Arc<ReferenceDataset>) -> Result<Self> {
        let rules = RuleSet::from_dataset(&dataset)?;
        Ok(Self { dataset, rules })
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Suggests codes for one text, best first.
    ///
    /// Patterns run before keywords and a code is emitted at most once per
    /// call, so a pattern hit shadows a keyword hit for the same code. With a
    /// known `context`, suggestions whose code starts with one of the context's
    /// prefixes are boosted once.
    pub fn analyze_text(
        &self,
        text: &str,
        context: Option<&str>,
        min_confidence: f64,
    ) -> Vec<Suggestion> {
        let lowered = text.to_lowercase();
        let mut emitter = Emitter {
            dataset: &self.dataset,
            min_confidence,
            seen: HashSet::new(),
            suggestions: Vec::new(),
        };

        for rule in self.rules.patterns() {
            if let Some(found) = rule.regex.find(&lowered) {
                emitter.emit(
                    &rule.targets,
                    SuggestionSource::PatternMatch,
                    found.as_str(),
                    &format!("Mönster matchade: '{}'", rule.source),
                );
            }
        }
        for rule in self.rules.keywords() {
            if lowered.contains(rule.keyword.as_str()) {
                emitter.emit(
                    &rule.targets,
                    SuggestionSource::KeywordMatch,
                    &rule.keyword,
                    &format!("Nyckelord: '{}'", rule.keyword),
                );
            }
        }

        let mut suggestions = emitter.suggestions;
        if let Some(context) = context {
            self.apply_context_boost(&mut suggestions, context.trim());
        }
        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        debug!(
            text_len = text.chars().count(),
            suggestions = suggestions.len(),
            "analyzed text"
        );
        suggestions
    }

    /// [`Self::analyze_text`] with thresholds and context taken from `options`.
    pub fn analyze(&self, text: &str, options: &AnalysisOptions) -> Vec<Suggestion> {
        self.analyze_text(text, options.context.as_deref(), options.min_confidence)
    }

    fn apply_context_boost(&self, suggestions: &mut [Suggestion], context: &str) {
        let prefixes = self.dataset.context_prefixes(context);
        if prefixes.is_empty() {
            trace!(context, "no relevance prefixes for context");
            return;
        }
        for suggestion in suggestions {
            if prefixes.iter().any(|p| suggestion.code.starts_with(p.as_str())) {
                suggestion.confidence = boost(suggestion.confidence);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TextAnalyzer {
        TextAnalyzer::new(Arc::new(ReferenceDataset::builtin().unwrap())).unwrap()
    }

    #[test]
    fn pattern_shadows_keyword_for_the_same_code() {
        let suggestions = analyzer().analyze_text("Jag känner mig stressad", None, 0.75);
        let b152 = suggestions.iter().find(|s| s.code == "b152").unwrap();
        assert_eq!(b152.source, SuggestionSource::PatternMatch);
        assert_eq!(b152.confidence, 0.94);
        assert_eq!(b152.matched_text.as_deref(), Some("känner mig stressad"));
        assert_eq!(suggestions.iter().filter(|s| s.code == "b152").count(), 1);
    }

    #[test]
    fn blank_text_has_no_suggestions() {
        assert!(analyzer().analyze_text("   ", Some("utvecklas"), 0.0).is_empty());
    }
}
