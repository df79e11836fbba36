#![deny(unsafe_code)]

//! Free-text analysis: keyword and pattern rules turn narrative answers into
//! ICF suggestions, batches of answers into theme clusters, and clusters into
//! recommendations.

pub mod analyzer;
pub mod batch;
pub mod error;
pub mod recommend;
pub mod rules;
pub mod validate;

pub use crate::analyzer::TextAnalyzer;
pub use crate::error::AnalyzeError;
pub use crate::recommend::generate_recommendations;
pub use crate::rules::RuleSet;
