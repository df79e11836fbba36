#![deny(unsafe_code)]

pub mod analysis;
pub mod confidence;
pub mod enums;
pub mod error;
pub mod ksi;
pub mod mapping;
pub mod options;
pub mod suggestion;
pub mod taxonomy;

pub use analysis::{BatchAnalysis, CodeCount, DomainSummary, SurveyAnswer, ThemeCluster};
pub use confidence::{MappingCategory, boost};
pub use enums::{IcfComponent, InterventionContext, MappingPath, Taxonomy};
pub use error::{ModelError, Result};
pub use ksi::{KsiAction, KsiCode, KsiStatus, KsiTarget};
pub use mapping::{CodeSearchHit, ConfidenceStat, CoreSet, MappingResult};
pub use options::AnalysisOptions;
pub use suggestion::{InterventionSuggestion, Suggestion, SuggestionSource};
pub use taxonomy::TaxonomyEntry;
