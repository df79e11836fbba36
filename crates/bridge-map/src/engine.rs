//! Mapping engine implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use bridge_model::confidence::{INFERRED_DISCOUNT, mean};
use bridge_model::taxonomy::chapter_of;
use bridge_model::{
    IcfComponent, KsiTarget, MappingCategory, MappingPath, MappingResult, Taxonomy,
};
use bridge_standards::ReferenceDataset;
use serde_json::json;
use tracing::{debug, trace};

use crate::error::MapError;

/// Confidence of the BBIC inference for body-function and activity codes.
pub const BBIC_INFERRED_CONFIDENCE: f64 = 0.75;
/// Confidence of the BBIC inference for environmental-factor codes.
pub const BBIC_INFERRED_ENVIRONMENT_CONFIDENCE: f64 = 0.70;

/// A table hit, possibly found through the parent chapter.
struct Hit<T> {
    value: T,
    path: MappingPath,
    matched_code: String,
}

impl<T> Hit<T> {
    /// Applies the fixed fallback discount to inferred hits.
    fn confidence(&self, table_confidence: f64) -> f64 {
        match self.path {
            MappingPath::Direct => table_confidence,
            MappingPath::Inferred => table_confidence * INFERRED_DISCOUNT,
        }
    }

    fn annotate(&self, source_code: &str, result: MappingResult) -> MappingResult {
        match self.path {
            MappingPath::Direct => result,
            MappingPath::Inferred => result
                .with_metadata("fallback_parent", self.matched_code.as_str())
                .with_warning(format!(
                    "No direct mapping for {source_code}, used parent {}",
                    self.matched_code
                )),
        }
    }
}

/// Engine translating codes between taxonomies using a shared reference dataset.
///
/// Every operation is a pure read over the dataset, so one engine (or many
/// clones sharing the same `Arc`) can serve any number of callers.
#[derive(Debug, Clone)]
pub struct MappingEngine {
    dataset: Arc<ReferenceDataset>,
}

impl MappingEngine {
    pub fn new(dataset: Arc<ReferenceDataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    /// Maps `source_code` from one taxonomy to another.
    ///
    /// Returns [`MapError::UnsupportedPair`] for pairs without a table and
    /// [`MapError::InvalidEnum`] for a malformed KSI target. Unknown codes
    /// yield an empty result with a warning.
    pub fn map(
        &self,
        source_code: &str,
        from: Taxonomy,
        to: Taxonomy,
    ) -> Result<MappingResult, MapError> {
        match (from, to) {
            (Taxonomy::Icf, Taxonomy::Ksi) => Ok(self.icf_to_ksi(source_code)),
            (Taxonomy::Icf, Taxonomy::Bbic) => Ok(self.icf_to_bbic(source_code)),
            (Taxonomy::Icf, Taxonomy::Ibic) => Ok(self.icf_to_ibic(source_code)),
            (Taxonomy::Icf, Taxonomy::Kva) => Ok(self.icf_to_kva(source_code)),
            (Taxonomy::Ksi, Taxonomy::Icf) => self.ksi_str_to_icf(source_code),
            (Taxonomy::Bbic, Taxonomy::Icf) => Ok(self.bbic_to_icf(source_code)),
            (Taxonomy::Shanarri, Taxonomy::Icf) => Ok(self.shanarri_to_icf(source_code)),
            _ => Err(MapError::UnsupportedPair { from, to }),
        }
    }

    /// Maps one ICF code to every fan-out taxonomy.
    ///
    /// Each target is looked up independently; an empty result for one
    /// taxonomy never affects the others.
    pub fn map_to_all(&self, icf_code: &str) -> BTreeMap<Taxonomy, MappingResult> {
        Taxonomy::FAN_OUT
            .into_iter()
            .filter_map(|target| {
                let result = self.map(icf_code, Taxonomy::Icf, target).ok()?;
                Some((target, result))
            })
            .collect()
    }

    /// ICF to KSI targets (axis 1). Targets keep `ksi_targets` table order.
    pub fn icf_to_ksi(&self, icf_code: &str) -> MappingResult {
        let code = icf_code.trim();
        let hit = self.lookup_with_fallback(code, |c| {
            let targets = self.dataset.ksi_targets_for_icf(c);
            (!targets.is_empty()).then_some(targets)
        });
        let Some(hit) = hit else {
            debug!(icf_code = code, "no KSI target");
            return MappingResult::not_found(
                code,
                Taxonomy::Icf,
                Taxonomy::Ksi,
                format!("No KSI mapping found for ICF code: {code}"),
            );
        };

        let targets = hit
            .value
            .iter()
            .map(|t| {
                (
                    t.as_str().to_string(),
                    self.dataset.ksi_target_name(*t).to_string(),
                )
            })
            .collect();
        let result = MappingResult::found(
            code,
            Taxonomy::Icf,
            Taxonomy::Ksi,
            targets,
            hit.confidence(MappingCategory::IcfKsi.confidence()),
            hit.path,
        )
        .with_metadata("mapping_type", "ICF Target to KSI Target (Axel 1)")
        .with_metadata("note", "KSI Axel 1 uses ICF codes directly");
        hit.annotate(code, result)
    }

    /// KSI target to the ICF codes it covers.
    pub fn ksi_to_icf(&self, target: KsiTarget) -> MappingResult {
        let codes = self
            .dataset
            .ksi_target(target)
            .map(|row| row.icf_codes.as_slice())
            .unwrap_or_default();
        if codes.is_empty() {
            return MappingResult::not_found(
                target.as_str(),
                Taxonomy::Ksi,
                Taxonomy::Icf,
                format!("No ICF codes found for KSI target: {target}"),
            );
        }
        MappingResult::found(
            target.as_str(),
            Taxonomy::Ksi,
            Taxonomy::Icf,
            self.with_icf_names(codes),
            MappingCategory::IcfKsi.confidence(),
            MappingPath::Direct,
        )
        .with_metadata("mapping_type", "KSI Target (Axel 1) to ICF")
        .with_metadata("note", "Direct mapping, KSI uses ICF structure")
    }

    /// Parses a KSI target name and maps it to ICF.
    pub fn ksi_str_to_icf(&self, target: &str) -> Result<MappingResult, MapError> {
        let target: KsiTarget = target.parse()?;
        Ok(self.ksi_to_icf(target))
    }

    /// ICF to BBIC dimension (target code) and subdimension (description).
    ///
    /// Falls back to the parent chapter, then to an inference from the ICF
    /// component letter.
    pub fn icf_to_bbic(&self, icf_code: &str) -> MappingResult {
        let code = icf_code.trim();
        if let Some(hit) = self.lookup_with_fallback(code, |c| self.dataset.bbic_for(c)) {
            let mapping = hit.value;
            let result = MappingResult::found(
                code,
                Taxonomy::Icf,
                Taxonomy::Bbic,
                vec![(mapping.dimension.clone(), mapping.subdimension.clone())],
                hit.confidence(mapping.confidence),
                hit.path,
            )
            .with_metadata("dimension", mapping.dimension.as_str())
            .with_metadata("subdimension", mapping.subdimension.as_str());
            return hit.annotate(code, result);
        }

        let inferred = match IcfComponent::of_code(code) {
            Some(IcfComponent::BodyFunctions) => Some((
                "Barnets hälsa",
                "Hälsa (inferred)",
                BBIC_INFERRED_CONFIDENCE,
            )),
            Some(IcfComponent::ActivitiesParticipation) => Some((
                "Barnets utveckling",
                "Aktiviteter (inferred)",
                BBIC_INFERRED_CONFIDENCE,
            )),
            Some(IcfComponent::EnvironmentalFactors) => Some((
                "Familj och miljö",
                "Miljöfaktorer (inferred)",
                BBIC_INFERRED_ENVIRONMENT_CONFIDENCE,
            )),
            Some(IcfComponent::BodyStructures) | None => None,
        };
        match inferred {
            Some((dimension, subdimension, confidence)) => {
                debug!(icf_code = code, dimension, "BBIC dimension inferred from component");
                MappingResult::found(
                    code,
                    Taxonomy::Icf,
                    Taxonomy::Bbic,
                    vec![(dimension.to_string(), subdimension.to_string())],
                    confidence,
                    MappingPath::Inferred,
                )
                .with_metadata("dimension", dimension)
                .with_metadata("subdimension", subdimension)
            }
            None => MappingResult::not_found(
                code,
                Taxonomy::Icf,
                Taxonomy::Bbic,
                format!("No BBIC mapping found for ICF code: {code}"),
            ),
        }
    }

    /// Reverse BBIC lookup: every ICF code whose BBIC dimension matches
    /// `dimension` case-insensitively. Confidence is the mean over the matches.
    pub fn bbic_to_icf(&self, dimension: &str) -> MappingResult {
        let wanted = dimension.trim().to_lowercase();
        let matches: Vec<_> = self
            .dataset
            .bbic_mappings()
            .iter()
            .filter(|m| m.dimension.to_lowercase() == wanted)
            .collect();
        let Some(confidence) = mean(matches.iter().map(|m| m.confidence)) else {
            return MappingResult::not_found(
                dimension.trim(),
                Taxonomy::Bbic,
                Taxonomy::Icf,
                format!("BBIC dimension not found: {}", dimension.trim()),
            );
        };
        MappingResult::found(
            dimension.trim(),
            Taxonomy::Bbic,
            Taxonomy::Icf,
            matches
                .iter()
                .map(|m| (m.icf_code.clone(), m.subdimension.clone()))
                .collect(),
            confidence,
            MappingPath::Direct,
        )
    }

    /// ICF to IBIC. IBIC uses ICF natively, so any code with a known
    /// component maps to itself at full confidence.
    pub fn icf_to_ibic(&self, icf_code: &str) -> MappingResult {
        let code = icf_code.trim();
        let (area, subarea, confidence) = match self.dataset.ibic_for(code) {
            Some(mapping) => (
                mapping.area.clone(),
                mapping.subarea.clone(),
                mapping.confidence,
            ),
            None if IcfComponent::of_code(code).is_some() => (
                "Funktionsnedsättning".to_string(),
                format!("ICF {code}"),
                MappingCategory::IcfIbic.confidence(),
            ),
            None => {
                return MappingResult::not_found(
                    code,
                    Taxonomy::Icf,
                    Taxonomy::Ibic,
                    format!("No IBIC mapping found for ICF code: {code}"),
                );
            }
        };
        MappingResult::found(
            code,
            Taxonomy::Icf,
            Taxonomy::Ibic,
            vec![(code.to_string(), subarea.clone())],
            confidence,
            MappingPath::Direct,
        )
        .with_metadata("area", area)
        .with_metadata("subarea", subarea)
        .with_metadata("note", "IBIC uses ICF codes natively")
    }

    /// ICF to KVÅ procedure codes. One-to-many; confidence is the mean of the rows.
    pub fn icf_to_kva(&self, icf_code: &str) -> MappingResult {
        let code = icf_code.trim();
        let hit = self.lookup_with_fallback(code, |c| {
            let rows = self.dataset.kva_for(c);
            (!rows.is_empty()).then_some(rows)
        });
        let Some(hit) = hit else {
            return MappingResult::not_found(
                code,
                Taxonomy::Icf,
                Taxonomy::Kva,
                format!("No KVÅ procedure code found for ICF code: {code}"),
            );
        };

        let rows = &hit.value;
        let table_confidence = mean(rows.iter().map(|m| m.confidence)).unwrap_or_default();
        let details: Vec<_> = rows
            .iter()
            .map(|m| {
                json!({
                    "code": m.kva_code,
                    "description": m.description,
                    "confidence": m.confidence,
                })
            })
            .collect();
        let result = MappingResult::found(
            code,
            Taxonomy::Icf,
            Taxonomy::Kva,
            rows.iter()
                .map(|m| (m.kva_code.clone(), m.description.clone()))
                .collect(),
            hit.confidence(table_confidence),
            hit.path,
        )
        .with_metadata("kva_codes", details);
        hit.annotate(code, result)
    }

    /// SHANARRI wellbeing domain to ICF codes.
    pub fn shanarri_to_icf(&self, domain: &str) -> MappingResult {
        let key = domain.trim().to_lowercase();
        let Some(entry) = self.dataset.shanarri_domain(&key) else {
            return MappingResult::not_found(
                domain.trim(),
                Taxonomy::Shanarri,
                Taxonomy::Icf,
                format!("Unknown SHANARRI domain: {}", domain.trim()),
            );
        };
        MappingResult::found(
            key.as_str(),
            Taxonomy::Shanarri,
            Taxonomy::Icf,
            self.with_icf_names(&entry.icf_codes),
            entry.confidence,
            MappingPath::Direct,
        )
        .with_metadata("shanarri_domain", entry.domain.as_str())
        .with_metadata("label", entry.label.as_str())
        .with_metadata("note", "Conceptual mapping from GIRFEC framework")
    }

    /// Looks up `code`, then its parent chapter when the direct lookup is empty.
    fn lookup_with_fallback<T>(
        &self,
        code: &str,
        lookup: impl Fn(&str) -> Option<T>,
    ) -> Option<Hit<T>> {
        if let Some(value) = lookup(code) {
            trace!(code, "direct table hit");
            return Some(Hit {
                value,
                path: MappingPath::Direct,
                matched_code: code.to_string(),
            });
        }
        let parent = chapter_of(code)?;
        let value = lookup(&parent)?;
        debug!(code, parent = %parent, "mapped through parent chapter");
        Some(Hit {
            value,
            path: MappingPath::Inferred,
            matched_code: parent,
        })
    }

    /// Pairs ICF codes with their Swedish names, falling back to the code.
    pub(crate) fn with_icf_names(&self, codes: &[String]) -> Vec<(String, String)> {
        codes
            .iter()
            .map(|code| {
                let name = self.dataset.icf_name(code).unwrap_or(code);
                (code.clone(), name.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MappingEngine {
        MappingEngine::new(Arc::new(ReferenceDataset::builtin().unwrap()))
    }

    #[test]
    fn fallback_runs_only_after_an_empty_direct_lookup() {
        let engine = engine();
        let direct = engine.icf_to_ksi("d160");
        assert_eq!(direct.mapping_path, Some(MappingPath::Direct));
        assert!(direct.warnings.is_empty());

        let inferred = engine.icf_to_ksi("d199");
        assert_eq!(inferred.mapping_path, Some(MappingPath::Inferred));
        assert_eq!(inferred.target_codes, vec!["SA1"]);
        assert_eq!(inferred.metadata_str("fallback_parent"), Some("d1"));
        assert!((inferred.confidence - 0.97 * 0.90).abs() < 1e-12);
    }

    #[test]
    fn two_character_codes_have_no_parent() {
        let result = engine().icf_to_ksi("b9");
        assert!(!result.is_found());
        assert_eq!(result.confidence, 0.0);
    }
}
