//! Core sets, code search and confidence statistics.

use bridge_model::{
    CodeSearchHit, ConfidenceStat, CoreSet, MappingCategory, MappingResult, Taxonomy,
};

use crate::engine::MappingEngine;

/// Mean of the strictly positive confidences; 0.0 when there are none.
pub fn overall_confidence(results: &[MappingResult]) -> f64 {
    bridge_model::confidence::mean(
        results
            .iter()
            .map(|r| r.confidence)
            .filter(|&c| c > 0.0),
    )
    .unwrap_or(0.0)
}

/// Documented confidence of every mapping category.
pub fn mapping_confidence_stats() -> Vec<ConfidenceStat> {
    MappingCategory::ALL
        .iter()
        .map(|category| ConfidenceStat {
            category: category.label().to_string(),
            confidence: category.confidence(),
            note: category.note().to_string(),
            warning: category.is_gap(),
        })
        .collect()
}

impl MappingEngine {
    /// The curated ICF core set for a condition; empty for unknown conditions.
    pub fn core_set(&self, condition: &str) -> CoreSet {
        let codes = self
            .dataset()
            .core_set(condition.trim())
            .map(|row| self.with_icf_names(&row.icf_codes))
            .unwrap_or_default();
        CoreSet {
            condition: condition.trim().to_string(),
            codes,
        }
    }

    pub fn core_set_conditions(&self) -> Vec<&str> {
        self.dataset()
            .core_sets()
            .iter()
            .map(|row| row.condition.as_str())
            .collect()
    }

    /// Case-insensitive substring search over ICF codes/names and KSI targets/names.
    ///
    /// An empty `systems` slice searches both. Other taxonomies are ignored.
    pub fn search_codes(&self, query: &str, systems: &[Taxonomy]) -> Vec<CodeSearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let wants = |system: Taxonomy| systems.is_empty() || systems.contains(&system);
        let matches = |text: &str| text.to_lowercase().contains(&needle);

        let mut hits = Vec::new();
        if wants(Taxonomy::Icf) {
            hits.extend(
                self.dataset()
                    .icf_entries()
                    .iter()
                    .filter(|e| {
                        matches(&e.code)
                            || matches(&e.name)
                            || e.name_en.as_deref().is_some_and(matches)
                    })
                    .map(|e| CodeSearchHit {
                        system: Taxonomy::Icf,
                        code: e.code.clone(),
                        description: e.name.clone(),
                    }),
            );
        }
        if wants(Taxonomy::Ksi) {
            hits.extend(
                self.dataset()
                    .ksi_targets()
                    .iter()
                    .filter(|t| matches(t.target.as_str()) || matches(t.display_name()))
                    .map(|t| CodeSearchHit {
                        system: Taxonomy::Ksi,
                        code: t.target.as_str().to_string(),
                        description: t.display_name().to_string(),
                    }),
            );
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use bridge_model::MappingPath;

    use super::*;

    #[test]
    fn overall_confidence_ignores_not_found() {
        let results = vec![
            MappingResult::found("d160", Taxonomy::Icf, Taxonomy::Ksi, vec![], 0.97, MappingPath::Direct),
            MappingResult::not_found("d160", Taxonomy::Icf, Taxonomy::Kva, "none"),
            MappingResult::found("d160", Taxonomy::Icf, Taxonomy::Bbic, vec![], 0.95, MappingPath::Direct),
        ];
        assert!((overall_confidence(&results) - 0.96).abs() < 1e-12);
        assert_eq!(overall_confidence(&[]), 0.0);
    }

    #[test]
    fn stats_flag_only_the_current_ss12000_gap() {
        let stats = mapping_confidence_stats();
        assert_eq!(stats.len(), 7);
        let flagged: Vec<_> = stats.iter().filter(|s| s.warning).map(|s| s.confidence).collect();
        assert_eq!(flagged, vec![0.76]);
    }
}
