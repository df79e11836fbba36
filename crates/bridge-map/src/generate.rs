//! Composite KSI code generation from an ICF code.

use bridge_model::{KsiAction, KsiCode, KsiStatus, KsiTarget};
use serde::Serialize;
use tracing::debug;

use crate::engine::MappingEngine;
use crate::error::MapError;

/// A generated three-axis KSI code with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCode {
    pub icf_code: String,
    pub full_code: String,
    pub code: KsiCode,
    /// ICF codes covered by the chosen target.
    pub target_icf_codes: Vec<String>,
    pub description: String,
    /// Confidence of the underlying ICF to KSI mapping, unchanged.
    pub confidence: f64,
}

impl MappingEngine {
    /// Builds `{target}-{action}-{status}` from the first KSI target of `icf_code`.
    ///
    /// Returns `(None, 0.0)` when the code has no KSI target. The confidence is
    /// that of the ICF to KSI mapping, including any parent fallback discount.
    pub fn generate_ksi_code(
        &self,
        icf_code: &str,
        action: KsiAction,
        status: KsiStatus,
    ) -> (Option<KsiCode>, f64) {
        let mapping = self.icf_to_ksi(icf_code);
        let Some(target) = mapping
            .first_target()
            .and_then(|t| t.parse::<KsiTarget>().ok())
        else {
            debug!(icf_code, "no KSI target to compose a code from");
            return (None, 0.0);
        };
        (
            Some(KsiCode::new(target, action, status)),
            mapping.confidence,
        )
    }

    /// String entry point for [`Self::generate_ksi_code`].
    ///
    /// An unknown action or status is an [`MapError::InvalidEnum`], never a
    /// half-built code.
    pub fn generate_ksi_code_str(
        &self,
        icf_code: &str,
        action: &str,
        status: &str,
    ) -> Result<(Option<KsiCode>, f64), MapError> {
        let action: KsiAction = action.parse()?;
        let status: KsiStatus = status.parse()?;
        Ok(self.generate_ksi_code(icf_code, action, status))
    }

    /// Like [`Self::generate_ksi_code`], with the description and covered ICF codes resolved.
    pub fn generate(
        &self,
        icf_code: &str,
        action: KsiAction,
        status: KsiStatus,
    ) -> Option<GeneratedCode> {
        let (code, confidence) = self.generate_ksi_code(icf_code, action, status);
        let code = code?;
        let dataset = self.dataset();
        Some(GeneratedCode {
            icf_code: icf_code.trim().to_string(),
            full_code: code.full_code(),
            code,
            target_icf_codes: dataset
                .ksi_target(code.target)
                .map(|row| row.icf_codes.clone())
                .unwrap_or_default(),
            description: code.describe(dataset.ksi_target_name(code.target)),
            confidence,
        })
    }
}
