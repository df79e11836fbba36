//! Reference tables embedded at compile time with `include_str!()`.
//!
//! [`crate::ReferenceDataset::builtin`] parses these, so the default dataset
//! needs no filesystem access at runtime.

/// `reference/manifest.toml`
pub const MANIFEST: &str = include_str!("../../../reference/manifest.toml");

pub const ICF_CODES: &str = include_str!("../../../reference/icf/codes.csv");
pub const ICF_CORE_SETS: &str = include_str!("../../../reference/icf/core_sets.csv");
pub const KSI_TARGETS: &str = include_str!("../../../reference/ksi/targets.csv");
pub const BBIC_MAPPINGS: &str = include_str!("../../../reference/bbic/icf_to_bbic.csv");
pub const IBIC_MAPPINGS: &str = include_str!("../../../reference/ibic/icf_to_ibic.csv");
pub const KVA_MAPPINGS: &str = include_str!("../../../reference/kva/icf_to_kva.csv");
pub const SHANARRI_MAPPINGS: &str = include_str!("../../../reference/shanarri/domains.csv");
pub const ANALYZER_PATTERNS: &str = include_str!("../../../reference/analyzer/patterns.csv");
pub const ANALYZER_KEYWORDS: &str = include_str!("../../../reference/analyzer/keywords.csv");
pub const ANALYZER_CONTEXTS: &str = include_str!("../../../reference/analyzer/contexts.csv");

/// Looks up an embedded table by its manifest path.
pub fn table(path: &str) -> Option<&'static str> {
    let contents = match path {
        "icf/codes.csv" => ICF_CODES,
        "icf/core_sets.csv" => ICF_CORE_SETS,
        "ksi/targets.csv" => KSI_TARGETS,
        "bbic/icf_to_bbic.csv" => BBIC_MAPPINGS,
        "ibic/icf_to_ibic.csv" => IBIC_MAPPINGS,
        "kva/icf_to_kva.csv" => KVA_MAPPINGS,
        "shanarri/domains.csv" => SHANARRI_MAPPINGS,
        "analyzer/patterns.csv" => ANALYZER_PATTERNS,
        "analyzer/keywords.csv" => ANALYZER_KEYWORDS,
        "analyzer/contexts.csv" => ANALYZER_CONTEXTS,
        _ => return None,
    };
    Some(contents)
}
