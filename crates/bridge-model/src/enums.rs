//! Closed enumerations shared by the mapping engine and the text analyzer.
//!
//! Every enumeration parses case-insensitively from the spelling used in the
//! reference tables and on the command line, and reports unknown input as
//! [`ModelError::InvalidEnum`] so callers can tell a caller bug apart from a
//! data gap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// ICF main component, identified by the leading letter of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IcfComponent {
    /// `b`: Kroppsfunktioner.
    #[serde(rename = "b")]
    BodyFunctions,
    /// `s`: Kroppsstrukturer.
    #[serde(rename = "s")]
    BodyStructures,
    /// `d`: Aktiviteter och delaktighet.
    #[serde(rename = "d")]
    ActivitiesParticipation,
    /// `e`: Miljöfaktorer.
    #[serde(rename = "e")]
    EnvironmentalFactors,
}

impl IcfComponent {
    pub const ALL: [IcfComponent; 4] = [
        IcfComponent::BodyFunctions,
        IcfComponent::BodyStructures,
        IcfComponent::ActivitiesParticipation,
        IcfComponent::EnvironmentalFactors,
    ];

    /// Returns the single-letter prefix used in ICF codes.
    pub fn as_code(&self) -> &'static str {
        match self {
            IcfComponent::BodyFunctions => "b",
            IcfComponent::BodyStructures => "s",
            IcfComponent::ActivitiesParticipation => "d",
            IcfComponent::EnvironmentalFactors => "e",
        }
    }

    /// Returns the English component name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IcfComponent::BodyFunctions => "Body functions",
            IcfComponent::BodyStructures => "Body structures",
            IcfComponent::ActivitiesParticipation => "Activities and participation",
            IcfComponent::EnvironmentalFactors => "Environmental factors",
        }
    }

    /// Derives the component from the leading character of an ICF code.
    pub fn of_code(code: &str) -> Option<Self> {
        match code.trim().chars().next()?.to_ascii_lowercase() {
            'b' => Some(IcfComponent::BodyFunctions),
            's' => Some(IcfComponent::BodyStructures),
            'd' => Some(IcfComponent::ActivitiesParticipation),
            'e' => Some(IcfComponent::EnvironmentalFactors),
            _ => None,
        }
    }
}

impl fmt::Display for IcfComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for IcfComponent {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.chars().count() == 1 {
            return IcfComponent::of_code(trimmed)
                .ok_or_else(|| ModelError::invalid("ICF component", s));
        }
        IcfComponent::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::invalid("ICF component", s))
    }
}

/// A coded classification system the engine can translate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Taxonomy {
    #[serde(rename = "ICF")]
    Icf,
    #[serde(rename = "KSI")]
    Ksi,
    #[serde(rename = "BBIC")]
    Bbic,
    #[serde(rename = "IBIC")]
    Ibic,
    #[serde(rename = "KVÅ")]
    Kva,
    #[serde(rename = "SHANARRI")]
    Shanarri,
}

impl Taxonomy {
    pub const ALL: [Taxonomy; 6] = [
        Taxonomy::Icf,
        Taxonomy::Ksi,
        Taxonomy::Bbic,
        Taxonomy::Ibic,
        Taxonomy::Kva,
        Taxonomy::Shanarri,
    ];

    /// Target systems reached by the ICF fan-out.
    pub const FAN_OUT: [Taxonomy; 4] = [Taxonomy::Ksi, Taxonomy::Bbic, Taxonomy::Ibic, Taxonomy::Kva];

    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Icf => "ICF",
            Taxonomy::Ksi => "KSI",
            Taxonomy::Bbic => "BBIC",
            Taxonomy::Ibic => "IBIC",
            Taxonomy::Kva => "KVÅ",
            Taxonomy::Shanarri => "SHANARRI",
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "ICF" => Ok(Taxonomy::Icf),
            "KSI" => Ok(Taxonomy::Ksi),
            "BBIC" => Ok(Taxonomy::Bbic),
            "IBIC" => Ok(Taxonomy::Ibic),
            "KVÅ" | "KVA" => Ok(Taxonomy::Kva),
            "SHANARRI" | "BEHOVSKOMPASSEN" => Ok(Taxonomy::Shanarri),
            _ => Err(ModelError::invalid("taxonomy", s)),
        }
    }
}

/// How a mapping result was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingPath {
    /// Table hit on the requested code.
    Direct,
    /// Parent-chapter fallback or a taxonomy-specific inference rule.
    Inferred,
}

impl MappingPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingPath::Direct => "direct",
            MappingPath::Inferred => "inferred",
        }
    }
}

impl fmt::Display for MappingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Setting in which interventions are suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionContext {
    #[default]
    School,
    General,
}

impl InterventionContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionContext::School => "school",
            InterventionContext::General => "general",
        }
    }
}

impl fmt::Display for InterventionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InterventionContext {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "school" | "skola" => Ok(InterventionContext::School),
            "general" | "allmän" => Ok(InterventionContext::General),
            _ => Err(ModelError::invalid("intervention context", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_from_code_prefix() {
        assert_eq!(IcfComponent::of_code("b140"), Some(IcfComponent::BodyFunctions));
        assert_eq!(
            IcfComponent::of_code("D160"),
            Some(IcfComponent::ActivitiesParticipation)
        );
        assert_eq!(IcfComponent::of_code("x1"), None);
        assert_eq!(IcfComponent::of_code(""), None);
    }

    #[test]
    fn component_from_str_accepts_letter_and_name() {
        assert_eq!(
            "e".parse::<IcfComponent>().unwrap(),
            IcfComponent::EnvironmentalFactors
        );
        assert_eq!(
            "body structures".parse::<IcfComponent>().unwrap(),
            IcfComponent::BodyStructures
        );
        assert!("q".parse::<IcfComponent>().is_err());
    }

    #[test]
    fn taxonomy_from_str() {
        assert_eq!("kva".parse::<Taxonomy>().unwrap(), Taxonomy::Kva);
        assert_eq!("KVÅ".parse::<Taxonomy>().unwrap(), Taxonomy::Kva);
        assert_eq!(" bbic ".parse::<Taxonomy>().unwrap(), Taxonomy::Bbic);
        assert!(matches!(
            "SS12000".parse::<Taxonomy>(),
            Err(ModelError::InvalidEnum { kind: "taxonomy", .. })
        ));
    }

    #[test]
    fn taxonomy_serializes_with_display_names() {
        let json = serde_json::to_string(&Taxonomy::Kva).unwrap();
        assert_eq!(json, "\"KVÅ\"");
    }
}
