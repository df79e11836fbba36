#![deny(unsafe_code)]

pub mod csv;
pub mod dataset;
pub mod doctor;
pub mod embedded;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;

pub use crate::dataset::{DatasetIssue, DatasetSource, IssueSeverity, ReferenceDataset};
pub use crate::doctor::DoctorReport;
pub use crate::error::StandardsError;
pub use crate::paths::{REFERENCE_ENV_VAR, reference_root};
