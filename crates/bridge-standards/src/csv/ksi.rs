#![deny(unsafe_code)]

use std::path::Path;

use bridge_model::KsiTarget;
use serde::Serialize;

use super::Table;
use crate::error::StandardsError;

/// One KSI target (axis 1) with the ICF codes it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KsiTargetRow {
    pub target: KsiTarget,
    /// Swedish name; several targets are published without one.
    pub name: Option<String>,
    /// ICF codes in table order.
    pub icf_codes: Vec<String>,
}

impl KsiTargetRow {
    /// Display name, falling back to the target code.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.target.as_str())
    }
}

/// Parses `target,name,icf_codes`, keeping row order.
pub fn parse_ksi_targets(path: &Path, contents: &str) -> Result<Vec<KsiTargetRow>, StandardsError> {
    let table = Table::parse(path, contents, &["target", "icf_codes"])?;

    let mut rows = Vec::new();
    for row in table.rows() {
        let raw = row.require("target")?;
        let target: KsiTarget = raw.parse().map_err(|e| row.invalid(format!("{e}")))?;
        if rows.iter().any(|r: &KsiTargetRow| r.target == target) {
            return Err(row.invalid(format!("duplicate KSI target {target}")));
        }
        rows.push(KsiTargetRow {
            target,
            name: row.get("name").map(str::to_string),
            icf_codes: row.list("icf_codes"),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_target_displays_code() {
        let rows = parse_ksi_targets(
            Path::new("ksi/targets.csv"),
            "target,name,icf_codes\nSC2,,d160;d166\nSCA,Att fokusera uppmärksamhet,d160\n",
        )
        .unwrap();
        assert_eq!(rows[0].display_name(), "SC2");
        assert_eq!(rows[1].display_name(), "Att fokusera uppmärksamhet");
        assert_eq!(rows[0].icf_codes, vec!["d160", "d166"]);
    }

    #[test]
    fn unknown_target_is_a_load_error() {
        let err = parse_ksi_targets(
            Path::new("ksi/targets.csv"),
            "target,name,icf_codes\nZZ9,,d160\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("ZZ9"));
    }
}
