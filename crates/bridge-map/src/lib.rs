#![deny(unsafe_code)]

//! Cross-taxonomy mapping engine.
//!
//! ICF is the hub: every supported pair has ICF on one side. Results carry
//! the documented confidence of the table they came from, or a derived value
//! for parent fallbacks and inference rules.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod generate;
pub mod interventions;

pub use catalog::{mapping_confidence_stats, overall_confidence};
pub use engine::MappingEngine;
pub use error::MapError;
pub use generate::GeneratedCode;
