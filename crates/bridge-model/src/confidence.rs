//! Documented confidence constants and the shared boost rule.

use serde::Serialize;

use crate::error::ModelError;

/// Multiplier applied when a suggestion is boosted (context relevance or validation).
pub const BOOST_FACTOR: f64 = 1.05;

/// Ceiling for boosted confidences.
pub const BOOST_CAP: f64 = 0.98;

/// Discount applied to a parent-chapter fallback hit, regardless of depth.
pub const INFERRED_DISCOUNT: f64 = 0.90;

/// Accepts a confidence only if it lies in [0, 1]. NaN is rejected.
pub fn checked(value: f64) -> Result<f64, ModelError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ModelError::ConfidenceOutOfRange { value })
    }
}

/// Boosts a confidence by 5%, capped at 0.98.
pub fn boost(confidence: f64) -> f64 {
    (confidence * BOOST_FACTOR).min(BOOST_CAP)
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Mapping categories with their validated confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MappingCategory {
    IcfKsi,
    IcfIbic,
    IcfBbic,
    ShanarriIcf,
    IcfKva,
    Ss12000Icf,
    Ss12000ExtendedIcf,
}

impl MappingCategory {
    pub const ALL: [MappingCategory; 7] = [
        MappingCategory::IcfKsi,
        MappingCategory::IcfIbic,
        MappingCategory::IcfBbic,
        MappingCategory::ShanarriIcf,
        MappingCategory::IcfKva,
        MappingCategory::Ss12000Icf,
        MappingCategory::Ss12000ExtendedIcf,
    ];

    pub fn confidence(&self) -> f64 {
        match self {
            MappingCategory::IcfKsi => 0.97,
            MappingCategory::IcfIbic => 1.00,
            MappingCategory::IcfBbic => 0.95,
            MappingCategory::ShanarriIcf => 0.90,
            MappingCategory::IcfKva => 0.87,
            MappingCategory::Ss12000Icf => 0.76,
            MappingCategory::Ss12000ExtendedIcf => 0.95,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MappingCategory::IcfKsi => "ICF ↔ KSI",
            MappingCategory::IcfIbic => "ICF ↔ IBIC",
            MappingCategory::IcfBbic => "ICF ↔ BBIC",
            MappingCategory::ShanarriIcf => "SHANARRI ↔ ICF",
            MappingCategory::IcfKva => "ICF ↔ KVÅ",
            MappingCategory::Ss12000Icf => "SS 12000 ↔ ICF (current)",
            MappingCategory::Ss12000ExtendedIcf => "SS 12000 ↔ ICF (with extension)",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            MappingCategory::IcfKsi => "KSI Target (Axel 1) = ICF codes, exact mapping",
            MappingCategory::IcfIbic => "IBIC uses ICF natively, direct mapping",
            MappingCategory::IcfBbic => "Socialstyrelsen method, ICF-based",
            MappingCategory::ShanarriIcf => "Conceptual mapping, internationally validated",
            MappingCategory::IcfKva => "ICHI structure, WHO family",
            MappingCategory::Ss12000Icf => "Critical gap, needs entity extension",
            MappingCategory::Ss12000ExtendedIcf => {
                "After adding SupportIntervention, FunctionDescription and EnvironmentalFactor entities"
            }
        }
    }

    /// Categories below the 0.80 acceptance line.
    pub fn is_gap(&self) -> bool {
        self.confidence() < 0.80
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boost_is_capped() {
        assert!((boost(0.80) - 0.84).abs() < 1e-9);
        assert_eq!(boost(0.95), BOOST_CAP);
        assert_eq!(boost(1.0), BOOST_CAP);
    }

    #[test]
    fn checked_rejects_values_outside_unit_interval() {
        assert_eq!(checked(0.0), Ok(0.0));
        assert_eq!(checked(1.0), Ok(1.0));
        assert_eq!(
            checked(1.2),
            Err(ModelError::ConfidenceOutOfRange { value: 1.2 })
        );
        assert!(checked(f64::NAN).is_err());
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean([0.5, 1.0]), Some(0.75));
    }

    #[test]
    fn only_current_ss12000_is_a_gap() {
        let gaps: Vec<_> = MappingCategory::ALL
            .into_iter()
            .filter(MappingCategory::is_gap)
            .collect();
        assert_eq!(gaps, vec![MappingCategory::Ss12000Icf]);
    }
}
