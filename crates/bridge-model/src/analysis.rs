//! Batch analysis and domain summary types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum number of example texts kept per theme cluster.
pub const MAX_CLUSTER_EXAMPLES: usize = 3;

/// All texts in a batch associated with one taxonomy code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCluster {
    pub name: String,
    /// Number of texts with at least one suggestion for the code.
    pub frequency: usize,
    /// `frequency / total_texts * 100`.
    pub percentage: f64,
    pub codes: Vec<String>,
    /// Up to three original texts, in input order.
    pub example_responses: Vec<String>,
    /// Mean of every suggestion confidence emitted for the code.
    pub confidence: f64,
}

/// How many texts mentioned a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCount {
    pub code: String,
    pub count: usize,
}

/// Output of a batch analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub total_texts: usize,
    /// Sorted by descending frequency, ties in discovery order.
    pub clusters: Vec<ThemeCluster>,
    /// Per-code text counts in discovery order, below-threshold codes included.
    pub code_counts: Vec<CodeCount>,
}

impl BatchAnalysis {
    /// Per-code counts as a map.
    pub fn counts_by_code(&self) -> BTreeMap<String, usize> {
        self.code_counts
            .iter()
            .map(|c| (c.code.clone(), c.count))
            .collect()
    }

    /// Count for one code, zero if it never appeared.
    pub fn count_of(&self, code: &str) -> usize {
        self.code_counts
            .iter()
            .find(|c| c.code == code)
            .map_or(0, |c| c.count)
    }

    /// The `limit` most frequent codes; ties keep discovery order.
    pub fn top_codes(&self, limit: usize) -> Vec<CodeCount> {
        let mut ordered = self.code_counts.clone();
        ordered.sort_by(|a, b| b.count.cmp(&a.count));
        ordered.truncate(limit);
        ordered
    }
}

/// One survey answer; only answers with non-blank text are analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl SurveyAnswer {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            question_id: None,
            response: Some(response.into()),
        }
    }

    /// Returns the answer text when it is not blank.
    pub fn text(&self) -> Option<&str> {
        self.response.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// Population-level summary of the free-text answers for one wellbeing domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub domain: String,
    /// Answers with non-blank text.
    pub total_responses: usize,
    /// `total_responses / answers_received * 100`.
    pub response_rate: f64,
    pub themes: Vec<ThemeCluster>,
    pub code_counts: Vec<CodeCount>,
    pub top_codes: Vec<CodeCount>,
    pub recommendations: Vec<String>,
}

impl DomainSummary {
    /// The explicit "no responses" summary.
    pub fn empty(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            total_responses: 0,
            response_rate: 0.0,
            themes: Vec::new(),
            code_counts: Vec::new(),
            top_codes: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_responses == 0
    }
}
