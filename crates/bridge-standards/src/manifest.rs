#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Schema tag every reference manifest must carry.
pub const MANIFEST_SCHEMA: &str = "semantic-bridge.reference-manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

pub const ROLE_ICF_CODES: &str = "icf_codes";
pub const ROLE_ICF_CORE_SETS: &str = "icf_core_sets";
pub const ROLE_KSI_TARGETS: &str = "ksi_targets";
pub const ROLE_BBIC_MAPPINGS: &str = "bbic_mappings";
pub const ROLE_IBIC_MAPPINGS: &str = "ibic_mappings";
pub const ROLE_KVA_MAPPINGS: &str = "kva_mappings";
pub const ROLE_SHANARRI_MAPPINGS: &str = "shanarri_mappings";
pub const ROLE_ANALYZER_PATTERNS: &str = "analyzer_patterns";
pub const ROLE_ANALYZER_KEYWORDS: &str = "analyzer_keywords";
pub const ROLE_ANALYZER_CONTEXTS: &str = "analyzer_contexts";

pub const REQUIRED_ROLES: &[&str] = &[
    ROLE_ICF_CODES,
    ROLE_ICF_CORE_SETS,
    ROLE_KSI_TARGETS,
    ROLE_BBIC_MAPPINGS,
    ROLE_IBIC_MAPPINGS,
    ROLE_KVA_MAPPINGS,
    ROLE_SHANARRI_MAPPINGS,
    ROLE_ANALYZER_PATTERNS,
    ROLE_ANALYZER_KEYWORDS,
    ROLE_ANALYZER_CONTEXTS,
];

pub const ALLOWED_KINDS: &[&str] = &["csv"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// Versions of the published classifications the tables were taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pins {
    pub icf: String,
    pub ksi: String,
    pub kva: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub kind: String,
    pub role: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Manifest {
    pub fn file_for_role(&self, role: &str) -> Option<&ManifestFile> {
        self.files.iter().find(|f| f.role == role)
    }
}
