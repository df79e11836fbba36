//! Tunable thresholds for text analysis.

use serde::{Deserialize, Serialize};

/// Default minimum confidence for single-text analysis.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.75;
/// Default minimum confidence for batch analysis and domain summaries.
pub const DEFAULT_BATCH_MIN_CONFIDENCE: f64 = 0.80;
/// Default number of texts needed before a code forms a theme.
pub const DEFAULT_MIN_FREQUENCY: usize = 2;

/// Options controlling text analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Minimum suggestion confidence for single texts.
    pub min_confidence: f64,
    /// Minimum suggestion confidence inside batches.
    pub batch_min_confidence: f64,
    /// Minimum number of texts for a theme cluster.
    pub min_frequency: usize,
    /// Wellbeing domain used for context boosting (e.g. `utvecklas`).
    pub context: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            batch_min_confidence: DEFAULT_BATCH_MIN_CONFIDENCE,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            context: None,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }
}

/// Minimum theme frequency for a domain summary: 5% of the answers, at least 2.
pub fn adaptive_min_frequency(text_count: usize) -> usize {
    (text_count / 20).max(2)
}
