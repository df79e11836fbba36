//! Error types for mapping operations.
//!
//! Not-found is not an error: it is an empty [`bridge_model::MappingResult`]
//! with a warning. These variants cover caller mistakes only.

use bridge_model::{ModelError, Taxonomy};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// A value outside a closed enumeration (KSI axis, taxonomy name).
    #[error(transparent)]
    InvalidEnum(#[from] ModelError),

    #[error("unsupported mapping pair: {from} -> {to}")]
    UnsupportedPair { from: Taxonomy, to: Taxonomy },
}
