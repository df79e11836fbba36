//! Batch analysis, theme clustering and domain summaries.

use std::collections::HashMap;

use bridge_model::analysis::MAX_CLUSTER_EXAMPLES;
use bridge_model::confidence::mean;
use bridge_model::options::{DEFAULT_BATCH_MIN_CONFIDENCE, adaptive_min_frequency};
use bridge_model::{BatchAnalysis, CodeCount, DomainSummary, SurveyAnswer, ThemeCluster};
use tracing::debug;

use crate::analyzer::TextAnalyzer;
use crate::recommend::generate_recommendations;

/// Number of codes listed in a domain summary.
pub const SUMMARY_TOP_CODES: usize = 5;
/// Example texts kept per theme in a domain summary.
pub const SUMMARY_THEME_EXAMPLES: usize = 2;

/// Texts and confidences collected for one code across a batch.
struct CodeHits {
    code: String,
    /// Indices of the texts that produced the code, ascending.
    texts: Vec<usize>,
    confidences: Vec<f64>,
}

impl TextAnalyzer {
    /// Analyzes every text once and clusters the results by code.
    ///
    /// A code's frequency is the number of texts it was suggested for. Codes
    /// reaching `min_frequency` become clusters, sorted by descending
    /// frequency with ties in discovery order.
    pub fn analyze_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        min_frequency: usize,
        min_confidence: f64,
    ) -> BatchAnalysis {
        let mut hits: Vec<CodeHits> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (index, text) in texts.iter().enumerate() {
            for suggestion in self.analyze_text(text.as_ref(), None, min_confidence) {
                let slot = *slots.entry(suggestion.code.clone()).or_insert_with(|| {
                    hits.push(CodeHits {
                        code: suggestion.code.clone(),
                        texts: Vec::new(),
                        confidences: Vec::new(),
                    });
                    hits.len() - 1
                });
                let entry = &mut hits[slot];
                if entry.texts.last() != Some(&index) {
                    entry.texts.push(index);
                }
                entry.confidences.push(suggestion.confidence);
            }
        }

        let total_texts = texts.len();
        let mut clusters: Vec<ThemeCluster> = hits
            .iter()
            .filter(|h| h.texts.len() >= min_frequency)
            .map(|h| ThemeCluster {
                name: self
                    .dataset()
                    .icf_name(&h.code)
                    .unwrap_or(&h.code)
                    .to_string(),
                frequency: h.texts.len(),
                percentage: 100.0 * h.texts.len() as f64 / total_texts as f64,
                codes: vec![h.code.clone()],
                example_responses: h
                    .texts
                    .iter()
                    .take(MAX_CLUSTER_EXAMPLES)
                    .map(|&i| texts[i].as_ref().to_string())
                    .collect(),
                confidence: mean(h.confidences.iter().copied()).unwrap_or(0.0),
            })
            .collect();
        clusters.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        debug!(
            total_texts,
            codes = hits.len(),
            clusters = clusters.len(),
            min_frequency,
            "batch analyzed"
        );
        BatchAnalysis {
            total_texts,
            clusters,
            code_counts: hits
                .into_iter()
                .map(|h| CodeCount {
                    code: h.code,
                    count: h.texts.len(),
                })
                .collect(),
        }
    }

    /// Summarizes the free-text answers of one wellbeing domain.
    ///
    /// Blank answers are skipped; when none remain the explicit empty summary
    /// is returned. The theme threshold adapts to the number of answers.
    pub fn domain_summary(&self, answers: &[SurveyAnswer], domain: &str) -> DomainSummary {
        let texts: Vec<&str> = answers.iter().filter_map(SurveyAnswer::text).collect();
        if texts.is_empty() {
            debug!(domain, answers = answers.len(), "no free-text answers");
            return DomainSummary::empty(domain);
        }

        let batch = self.analyze_batch(
            &texts,
            adaptive_min_frequency(texts.len()),
            DEFAULT_BATCH_MIN_CONFIDENCE,
        );
        let recommendations = generate_recommendations(&batch.clusters);
        let top_codes = batch.top_codes(SUMMARY_TOP_CODES);
        let themes = batch
            .clusters
            .into_iter()
            .map(|mut theme| {
                theme.example_responses.truncate(SUMMARY_THEME_EXAMPLES);
                theme
            })
            .collect();

        DomainSummary {
            domain: domain.to_string(),
            total_responses: texts.len(),
            response_rate: 100.0 * texts.len() as f64 / answers.len() as f64,
            themes,
            code_counts: batch.code_counts,
            top_codes,
            recommendations,
        }
    }
}
