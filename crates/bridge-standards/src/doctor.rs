#![deny(unsafe_code)]

use serde::Serialize;

use crate::dataset::{DatasetIssue, DatasetSource, IssueSeverity, ReferenceDataset};
use crate::manifest::{ManifestFile, Pins};

pub const DOCTOR_SCHEMA: &str = "semantic-bridge.reference-doctor";

/// Health report of a loaded reference dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub manifest_schema: String,
    pub source: DatasetSource,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
    pub counts: DoctorCounts,
    pub fingerprint: String,
    pub issues: Vec<DatasetIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorCounts {
    pub files: usize,
    pub icf_codes: usize,
    pub ksi_targets: usize,
    pub bbic_rows: usize,
    pub ibic_rows: usize,
    pub kva_rows: usize,
    pub shanarri_domains: usize,
    pub core_sets: usize,
    pub patterns: usize,
    pub keywords: usize,
    pub contexts: usize,
}

impl DoctorReport {
    pub fn from_dataset(dataset: &ReferenceDataset) -> Self {
        let manifest = dataset.manifest();
        Self {
            schema: DOCTOR_SCHEMA.to_string(),
            schema_version: 1,
            manifest_schema: manifest.manifest.schema.clone(),
            source: dataset.source().clone(),
            pins: manifest.pins.clone(),
            files: manifest.files.clone(),
            counts: DoctorCounts {
                files: manifest.files.len(),
                icf_codes: dataset.icf_entries().len(),
                ksi_targets: dataset.ksi_targets().len(),
                bbic_rows: dataset.bbic_mappings().len(),
                ibic_rows: dataset.ibic_mappings().len(),
                kva_rows: dataset.kva_mappings().len(),
                shanarri_domains: dataset.shanarri_domains().len(),
                core_sets: dataset.core_sets().len(),
                patterns: dataset.patterns().len(),
                keywords: dataset.keywords().len(),
                contexts: dataset.contexts().len(),
            },
            fingerprint: dataset.fingerprint().to_string(),
            issues: dataset.issues().to_vec(),
        }
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn is_healthy(&self) -> bool {
        self.warning_count() == 0
    }
}
