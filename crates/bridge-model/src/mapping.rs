//! Mapping engine output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{MappingPath, Taxonomy};

/// Result of translating one code from a source taxonomy into a target taxonomy.
///
/// A not-found outcome is an empty result with `confidence == 0.0` and at
/// least one warning; it is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    pub source_code: String,
    pub source_system: Taxonomy,
    pub target_system: Taxonomy,
    /// Target codes in table insertion order.
    pub target_codes: Vec<String>,
    /// Descriptions parallel to `target_codes`.
    pub target_descriptions: Vec<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_path: Option<MappingPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl MappingResult {
    /// Creates a populated result.
    pub fn found(
        source_code: impl Into<String>,
        source_system: Taxonomy,
        target_system: Taxonomy,
        targets: Vec<(String, String)>,
        confidence: f64,
        mapping_path: MappingPath,
    ) -> Self {
        let (target_codes, target_descriptions) = targets.into_iter().unzip();
        Self {
            source_code: source_code.into(),
            source_system,
            target_system,
            target_codes,
            target_descriptions,
            confidence,
            mapping_path: Some(mapping_path),
            metadata: None,
            warnings: Vec::new(),
        }
    }

    /// Creates an empty, zero-confidence result carrying a warning.
    pub fn not_found(
        source_code: impl Into<String>,
        source_system: Taxonomy,
        target_system: Taxonomy,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            source_system,
            target_system,
            target_codes: Vec::new(),
            target_descriptions: Vec::new(),
            confidence: 0.0,
            mapping_path: None,
            metadata: None,
            warnings: vec![warning.into()],
        }
    }

    /// Adds one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Returns true when at least one target code was produced.
    pub fn is_found(&self) -> bool {
        !self.target_codes.is_empty()
    }

    /// Returns the first target code, which is the tie-break for composite codes.
    pub fn first_target(&self) -> Option<&str> {
        self.target_codes.first().map(String::as_str)
    }

    /// Returns a metadata value as a string, if present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }
}

/// One row of the confidence statistics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceStat {
    pub category: String,
    pub confidence: f64,
    pub note: String,
    pub warning: bool,
}

/// A hit from the code search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSearchHit {
    pub system: Taxonomy,
    pub code: String,
    pub description: String,
}

/// A curated ICF core set with resolved names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSet {
    pub condition: String,
    /// `(code, name)` pairs; the name falls back to the code when unknown.
    pub codes: Vec<(String, String)>,
}
