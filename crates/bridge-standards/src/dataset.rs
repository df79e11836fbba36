#![deny(unsafe_code)]

//! The immutable reference dataset shared by the mapping engine and the text analyzer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};

use bridge_model::{KsiTarget, TaxonomyEntry};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::csv::icf::{CoreSetRow, parse_core_sets, parse_icf_codes};
use crate::csv::ksi::{KsiTargetRow, parse_ksi_targets};
use crate::csv::mappings::{
    BbicMapping, IbicMapping, KvaMapping, ShanarriDomain, parse_bbic_mappings,
    parse_ibic_mappings, parse_kva_mappings, parse_shanarri_domains,
};
use crate::csv::rules::{ContextRule, TextRule, parse_contexts, parse_text_rules};
use crate::embedded;
use crate::error::StandardsError;
use crate::hash::Fingerprint;
use crate::manifest::{
    ALLOWED_KINDS, MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestFile,
    REQUIRED_ROLES, ROLE_ANALYZER_CONTEXTS, ROLE_ANALYZER_KEYWORDS, ROLE_ANALYZER_PATTERNS,
    ROLE_BBIC_MAPPINGS, ROLE_IBIC_MAPPINGS, ROLE_ICF_CODES, ROLE_ICF_CORE_SETS,
    ROLE_KSI_TARGETS, ROLE_KVA_MAPPINGS, ROLE_SHANARRI_MAPPINGS,
};
use crate::paths::reference_root;

/// Where a dataset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    /// Tables embedded in the binary at compile time.
    Builtin,
    Directory(PathBuf),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Builtin => write!(f, "builtin"),
            DatasetSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
}

/// A non-fatal finding made while loading the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetIssue {
    pub severity: IssueSeverity,
    pub message: String,
}

/// Read-only reference data: the ICF code table, the cross-taxonomy mapping
/// tables and the free-text rules.
///
/// Built once at startup and shared (usually through an `Arc`) by every
/// engine and analyzer. Nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    manifest: Manifest,
    source: DatasetSource,
    fingerprint: String,
    icf_codes: Vec<TaxonomyEntry>,
    icf_index: BTreeMap<String, usize>,
    core_sets: Vec<CoreSetRow>,
    ksi_targets: Vec<KsiTargetRow>,
    icf_to_ksi: BTreeMap<String, Vec<KsiTarget>>,
    bbic: Vec<BbicMapping>,
    ibic: Vec<IbicMapping>,
    kva: Vec<KvaMapping>,
    shanarri: Vec<ShanarriDomain>,
    patterns: Vec<TextRule>,
    keywords: Vec<TextRule>,
    contexts: Vec<ContextRule>,
    issues: Vec<DatasetIssue>,
}

/// One table read from disk or from the embedded copy.
struct RawTable {
    label: PathBuf,
    contents: String,
}

impl ReferenceDataset {
    /// Parses the dataset embedded at compile time.
    pub fn builtin() -> Result<Self, StandardsError> {
        let manifest = parse_manifest(embedded::MANIFEST, Path::new("manifest.toml"))?;
        validate_manifest(&manifest)?;
        Self::assemble(manifest, DatasetSource::Builtin, |file| {
            let contents =
                embedded::table(&file.path).ok_or_else(|| StandardsError::MissingFile {
                    path: PathBuf::from(&file.path),
                })?;
            Ok(RawTable {
                label: PathBuf::from(&file.path),
                contents: contents.to_string(),
            })
        })
    }

    /// Loads and validates the dataset under `reference_dir`.
    pub fn load(reference_dir: &Path) -> Result<Self, StandardsError> {
        let manifest_path = reference_dir.join("manifest.toml");
        let contents = std::fs::read_to_string(&manifest_path)
            .map_err(|e| StandardsError::io(&manifest_path, e))?;
        let manifest = parse_manifest(&contents, &manifest_path)?;
        validate_manifest(&manifest)?;

        Self::assemble(
            manifest,
            DatasetSource::Directory(reference_dir.to_path_buf()),
            |file| {
                let full_path = reference_dir.join(&file.path);
                let contents = std::fs::read_to_string(&full_path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        StandardsError::MissingFile {
                            path: full_path.clone(),
                        }
                    } else {
                        StandardsError::io(full_path.clone(), e)
                    }
                })?;
                Ok(RawTable {
                    label: full_path,
                    contents,
                })
            },
        )
    }

    /// Loads from `SEMANTIC_BRIDGE_REFERENCE_DIR` or the workspace `reference/` directory.
    pub fn load_default() -> Result<Self, StandardsError> {
        Self::load(&reference_root())
    }

    fn assemble(
        manifest: Manifest,
        source: DatasetSource,
        read: impl Fn(&ManifestFile) -> Result<RawTable, StandardsError>,
    ) -> Result<Self, StandardsError> {
        let mut fingerprint = Fingerprint::new();
        let mut tables: BTreeMap<&str, RawTable> = BTreeMap::new();
        for file in &manifest.files {
            let table = read(file)?;
            fingerprint.add_table(&file.path, &table.contents);
            tables.insert(file.role.as_str(), table);
        }
        let table = |role: &str| role_table(&tables, role);

        let raw = table(ROLE_ICF_CODES)?;
        let icf_codes = parse_icf_codes(&raw.label, &raw.contents)?;
        let icf_index = index_icf_codes(&icf_codes)?;
        validate_hierarchy(&icf_codes, &icf_index)?;

        let raw = table(ROLE_ICF_CORE_SETS)?;
        let core_sets = parse_core_sets(&raw.label, &raw.contents)?;
        let raw = table(ROLE_KSI_TARGETS)?;
        let ksi_targets = parse_ksi_targets(&raw.label, &raw.contents)?;
        let raw = table(ROLE_BBIC_MAPPINGS)?;
        let bbic = parse_bbic_mappings(&raw.label, &raw.contents)?;
        let raw = table(ROLE_IBIC_MAPPINGS)?;
        let ibic = parse_ibic_mappings(&raw.label, &raw.contents)?;
        let raw = table(ROLE_KVA_MAPPINGS)?;
        let kva = parse_kva_mappings(&raw.label, &raw.contents)?;
        let raw = table(ROLE_SHANARRI_MAPPINGS)?;
        let shanarri = parse_shanarri_domains(&raw.label, &raw.contents)?;
        let raw = table(ROLE_ANALYZER_PATTERNS)?;
        let patterns = parse_text_rules(&raw.label, &raw.contents, "pattern")?;
        let raw = table(ROLE_ANALYZER_KEYWORDS)?;
        let keywords = parse_text_rules(&raw.label, &raw.contents, "keyword")?;
        let raw = table(ROLE_ANALYZER_CONTEXTS)?;
        let contexts = parse_contexts(&raw.label, &raw.contents)?;

        let icf_to_ksi = build_icf_to_ksi(&ksi_targets);

        let mut dataset = Self {
            manifest,
            source,
            fingerprint: fingerprint.finish(),
            icf_codes,
            icf_index,
            core_sets,
            ksi_targets,
            icf_to_ksi,
            bbic,
            ibic,
            kva,
            shanarri,
            patterns,
            keywords,
            contexts,
            issues: Vec::new(),
        };
        dataset.issues = dataset.collect_issues();
        for issue in &dataset.issues {
            match issue.severity {
                IssueSeverity::Warning => {
                    warn!(issue = %issue.message, "reference dataset issue");
                }
                IssueSeverity::Info => debug!(issue = %issue.message, "reference dataset note"),
            }
        }
        info!(
            source = %dataset.source,
            icf_codes = dataset.icf_codes.len(),
            ksi_targets = dataset.ksi_targets.len(),
            fingerprint = %dataset.fingerprint,
            "reference dataset loaded"
        );
        Ok(dataset)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Hex SHA-256 over every table in manifest order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn issues(&self) -> &[DatasetIssue] {
        &self.issues
    }

    // ICF

    pub fn icf_entries(&self) -> &[TaxonomyEntry] {
        &self.icf_codes
    }

    pub fn icf_entry(&self, code: &str) -> Option<&TaxonomyEntry> {
        self.icf_index.get(code).map(|&i| &self.icf_codes[i])
    }

    /// Swedish display name of an ICF code, if the code is in the table.
    pub fn icf_name(&self, code: &str) -> Option<&str> {
        self.icf_entry(code).map(|e| e.name.as_str())
    }

    pub fn core_sets(&self) -> &[CoreSetRow] {
        &self.core_sets
    }

    pub fn core_set(&self, condition: &str) -> Option<&CoreSetRow> {
        self.core_sets.iter().find(|c| c.condition == condition)
    }

    // KSI

    pub fn ksi_targets(&self) -> &[KsiTargetRow] {
        &self.ksi_targets
    }

    pub fn ksi_target(&self, target: KsiTarget) -> Option<&KsiTargetRow> {
        self.ksi_targets.iter().find(|t| t.target == target)
    }

    /// Display name of a KSI target, falling back to its code.
    pub fn ksi_target_name(&self, target: KsiTarget) -> &str {
        self.ksi_target(target)
            .map_or(target.as_str(), KsiTargetRow::display_name)
    }

    /// KSI targets covering an ICF code, in `ksi_targets` row order.
    pub fn ksi_targets_for_icf(&self, icf_code: &str) -> &[KsiTarget] {
        self.icf_to_ksi
            .get(icf_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Legacy and procedure taxonomies

    pub fn bbic_mappings(&self) -> &[BbicMapping] {
        &self.bbic
    }

    /// First BBIC row for an ICF code.
    pub fn bbic_for(&self, icf_code: &str) -> Option<&BbicMapping> {
        self.bbic.iter().find(|m| m.icf_code == icf_code)
    }

    pub fn ibic_mappings(&self) -> &[IbicMapping] {
        &self.ibic
    }

    pub fn ibic_for(&self, icf_code: &str) -> Option<&IbicMapping> {
        self.ibic.iter().find(|m| m.icf_code == icf_code)
    }

    pub fn kva_mappings(&self) -> &[KvaMapping] {
        &self.kva
    }

    /// Every KVÅ row for an ICF code, in table order.
    pub fn kva_for(&self, icf_code: &str) -> Vec<&KvaMapping> {
        self.kva.iter().filter(|m| m.icf_code == icf_code).collect()
    }

    pub fn shanarri_domains(&self) -> &[ShanarriDomain] {
        &self.shanarri
    }

    pub fn shanarri_domain(&self, domain: &str) -> Option<&ShanarriDomain> {
        self.shanarri.iter().find(|d| d.domain == domain)
    }

    // Analyzer rules

    pub fn patterns(&self) -> &[TextRule] {
        &self.patterns
    }

    pub fn keywords(&self) -> &[TextRule] {
        &self.keywords
    }

    pub fn contexts(&self) -> &[ContextRule] {
        &self.contexts
    }

    /// Code prefixes relevant to a context; empty for unknown contexts.
    pub fn context_prefixes(&self, context: &str) -> &[String] {
        self.contexts
            .iter()
            .find(|c| c.context == context)
            .map(|c| c.prefixes.as_slice())
            .unwrap_or(&[])
    }

    fn collect_issues(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();

        let table_sizes = [
            (ROLE_ICF_CODES, self.icf_codes.len()),
            (ROLE_ICF_CORE_SETS, self.core_sets.len()),
            (ROLE_KSI_TARGETS, self.ksi_targets.len()),
            (ROLE_BBIC_MAPPINGS, self.bbic.len()),
            (ROLE_IBIC_MAPPINGS, self.ibic.len()),
            (ROLE_KVA_MAPPINGS, self.kva.len()),
            (ROLE_SHANARRI_MAPPINGS, self.shanarri.len()),
            (ROLE_ANALYZER_PATTERNS, self.patterns.len()),
            (ROLE_ANALYZER_KEYWORDS, self.keywords.len()),
            (ROLE_ANALYZER_CONTEXTS, self.contexts.len()),
        ];
        for (role, size) in table_sizes {
            if size == 0 {
                issues.push(DatasetIssue {
                    severity: IssueSeverity::Warning,
                    message: format!("{role} table has no rows"),
                });
            }
        }

        let bbic_codes: Vec<&str> = self.bbic.iter().map(|m| m.icf_code.as_str()).collect();
        let ibic_codes: Vec<&str> = self.ibic.iter().map(|m| m.icf_code.as_str()).collect();
        for (role, codes) in [
            (ROLE_BBIC_MAPPINGS, &bbic_codes),
            (ROLE_IBIC_MAPPINGS, &ibic_codes),
        ] {
            let mut seen = BTreeSet::new();
            for &code in codes {
                if !seen.insert(code) {
                    issues.push(DatasetIssue {
                        severity: IssueSeverity::Warning,
                        message: format!("{role} maps {code} more than once, first row wins"),
                    });
                }
            }
        }

        let references: [(&str, Vec<&str>); 8] = [
            (
                ROLE_ICF_CORE_SETS,
                self.core_sets
                    .iter()
                    .flat_map(|c| c.icf_codes.iter().map(String::as_str))
                    .collect(),
            ),
            (
                ROLE_KSI_TARGETS,
                self.ksi_targets
                    .iter()
                    .flat_map(|t| t.icf_codes.iter().map(String::as_str))
                    .collect(),
            ),
            (ROLE_BBIC_MAPPINGS, bbic_codes.clone()),
            (ROLE_IBIC_MAPPINGS, ibic_codes.clone()),
            (
                ROLE_KVA_MAPPINGS,
                self.kva.iter().map(|m| m.icf_code.as_str()).collect(),
            ),
            (
                ROLE_SHANARRI_MAPPINGS,
                self.shanarri
                    .iter()
                    .flat_map(|d| d.icf_codes.iter().map(String::as_str))
                    .collect(),
            ),
            (ROLE_ANALYZER_PATTERNS, rule_codes(&self.patterns)),
            (ROLE_ANALYZER_KEYWORDS, rule_codes(&self.keywords)),
        ];
        for (role, codes) in references {
            let missing: BTreeSet<&str> = codes
                .into_iter()
                .filter(|code| !self.icf_index.contains_key(*code))
                .collect();
            if !missing.is_empty() {
                issues.push(DatasetIssue {
                    severity: IssueSeverity::Info,
                    message: format!(
                        "{role} references {} ICF codes absent from the code table: {}",
                        missing.len(),
                        missing.into_iter().collect::<Vec<_>>().join(", ")
                    ),
                });
            }
        }

        issues
    }
}

fn role_table<'a>(
    tables: &'a BTreeMap<&str, RawTable>,
    role: &str,
) -> Result<&'a RawTable, StandardsError> {
    tables.get(role).ok_or_else(|| StandardsError::MissingRole {
        role: role.to_string(),
    })
}

fn rule_codes(rules: &[TextRule]) -> Vec<&str> {
    rules
        .iter()
        .flat_map(|r| r.targets.iter().map(|t| t.icf_code.as_str()))
        .collect()
}

fn parse_manifest(contents: &str, path: &Path) -> Result<Manifest, StandardsError> {
    toml::from_str(contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<(), StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(StandardsError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        if !ALLOWED_KINDS.contains(&file.kind.as_str()) {
            return Err(StandardsError::InvalidManifest {
                message: format!("unsupported kind '{}' for {}", file.kind, file.path),
            });
        }
        validate_path(&file.path)?;
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(StandardsError::MissingRole {
                role: role.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), StandardsError> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p.to_path_buf(),
            message: "absolute paths are not allowed".to_string(),
        });
    }
    for component in p.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(StandardsError::InvalidPath {
                    path: p.to_path_buf(),
                    message: "'..' is not allowed".to_string(),
                });
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StandardsError::InvalidPath {
                    path: p.to_path_buf(),
                    message: "absolute paths are not allowed".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn index_icf_codes(entries: &[TaxonomyEntry]) -> Result<BTreeMap<String, usize>, StandardsError> {
    let mut index = BTreeMap::new();
    for (i, entry) in entries.iter().enumerate() {
        if index.insert(entry.code.clone(), i).is_some() {
            return Err(StandardsError::InvalidHierarchy {
                code: entry.code.clone(),
                message: "duplicate code".to_string(),
            });
        }
    }
    Ok(index)
}

/// Every parent must exist with a level exactly one less; top-level entries are level 1.
fn validate_hierarchy(
    entries: &[TaxonomyEntry],
    index: &BTreeMap<String, usize>,
) -> Result<(), StandardsError> {
    for entry in entries {
        match &entry.parent_code {
            Some(parent_code) => {
                let parent = index
                    .get(parent_code)
                    .map(|&i| &entries[i])
                    .ok_or_else(|| StandardsError::InvalidHierarchy {
                        code: entry.code.clone(),
                        message: format!("parent {parent_code} does not exist"),
                    })?;
                if u16::from(parent.level) + 1 != u16::from(entry.level) {
                    return Err(StandardsError::InvalidHierarchy {
                        code: entry.code.clone(),
                        message: format!(
                            "level {} but parent {} has level {}",
                            entry.level, parent.code, parent.level
                        ),
                    });
                }
            }
            None if entry.level != 1 => {
                return Err(StandardsError::InvalidHierarchy {
                    code: entry.code.clone(),
                    message: format!("top-level entry has level {}, expected 1", entry.level),
                });
            }
            None => {}
        }
    }
    Ok(())
}

/// Reverse ICF to KSI index. Targets keep `ksi_targets` row order, which makes
/// the first target of a code a deterministic tie-break.
fn build_icf_to_ksi(targets: &[KsiTargetRow]) -> BTreeMap<String, Vec<KsiTarget>> {
    let mut index: BTreeMap<String, Vec<KsiTarget>> = BTreeMap::new();
    for row in targets {
        for code in &row.icf_codes {
            let entry = index.entry(code.clone()).or_default();
            if !entry.contains(&row.target) {
                entry.push(row.target);
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_validation_rejects_escapes() {
        assert!(validate_path("icf/codes.csv").is_ok());
        assert!(matches!(
            validate_path("../codes.csv"),
            Err(StandardsError::InvalidPath { .. })
        ));
        assert!(matches!(
            validate_path("/etc/codes.csv"),
            Err(StandardsError::InvalidPath { .. })
        ));
    }

    #[test]
    fn reverse_index_keeps_row_order() {
        let rows = parse_ksi_targets(
            Path::new("ksi/targets.csv"),
            "target,name,icf_codes\nSC2,,d160;d166\nSCA,,d160\n",
        )
        .unwrap();
        let index = build_icf_to_ksi(&rows);
        assert_eq!(index["d160"], vec![KsiTarget::SC2, KsiTarget::SCA]);
        assert_eq!(index["d166"], vec![KsiTarget::SC2]);
    }
}
