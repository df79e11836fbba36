#![deny(unsafe_code)]

use std::path::Path;

use serde::Serialize;

use super::Table;
use crate::error::StandardsError;

/// ICF code to BBIC dimension/subdimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BbicMapping {
    pub icf_code: String,
    pub dimension: String,
    pub subdimension: String,
    pub confidence: f64,
}

/// ICF code to IBIC area/subarea.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IbicMapping {
    pub icf_code: String,
    pub area: String,
    pub subarea: String,
    pub confidence: f64,
}

/// ICF code to one KVÅ procedure code. An ICF code may have several rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KvaMapping {
    pub icf_code: String,
    pub kva_code: String,
    pub description: String,
    pub confidence: f64,
}

/// A SHANARRI wellbeing domain and the ICF codes it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShanarriDomain {
    pub domain: String,
    pub label: String,
    pub icf_codes: Vec<String>,
    pub confidence: f64,
}

pub fn parse_bbic_mappings(path: &Path, contents: &str) -> Result<Vec<BbicMapping>, StandardsError> {
    let table = Table::parse(
        path,
        contents,
        &["icf_code", "dimension", "subdimension", "confidence"],
    )?;
    table
        .rows()
        .map(|row| {
            Ok(BbicMapping {
                icf_code: row.require("icf_code")?.to_string(),
                dimension: row.require("dimension")?.to_string(),
                subdimension: row.require("subdimension")?.to_string(),
                confidence: row.confidence("confidence")?,
            })
        })
        .collect()
}

pub fn parse_ibic_mappings(path: &Path, contents: &str) -> Result<Vec<IbicMapping>, StandardsError> {
    let table = Table::parse(path, contents, &["icf_code", "area", "subarea", "confidence"])?;
    table
        .rows()
        .map(|row| {
            Ok(IbicMapping {
                icf_code: row.require("icf_code")?.to_string(),
                area: row.require("area")?.to_string(),
                subarea: row.require("subarea")?.to_string(),
                confidence: row.confidence("confidence")?,
            })
        })
        .collect()
}

pub fn parse_kva_mappings(path: &Path, contents: &str) -> Result<Vec<KvaMapping>, StandardsError> {
    let table = Table::parse(
        path,
        contents,
        &["icf_code", "kva_code", "description", "confidence"],
    )?;
    table
        .rows()
        .map(|row| {
            Ok(KvaMapping {
                icf_code: row.require("icf_code")?.to_string(),
                kva_code: row.require("kva_code")?.to_string(),
                description: row.require("description")?.to_string(),
                confidence: row.confidence("confidence")?,
            })
        })
        .collect()
}

pub fn parse_shanarri_domains(
    path: &Path,
    contents: &str,
) -> Result<Vec<ShanarriDomain>, StandardsError> {
    let table = Table::parse(path, contents, &["domain", "label", "icf_codes", "confidence"])?;
    table
        .rows()
        .map(|row| {
            Ok(ShanarriDomain {
                domain: row.require("domain")?.to_string(),
                label: row.require("label")?.to_string(),
                icf_codes: row.list("icf_codes"),
                confidence: row.confidence("confidence")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kva_keeps_row_order() {
        let rows = parse_kva_mappings(
            Path::new("kva/icf_to_kva.csv"),
            "icf_code,kva_code,description,confidence
d140,DV015,Rådgivning om studieteknik,0.85
d140,DV017,Läs- och skrivträning,0.90
",
        )
        .unwrap();
        let codes: Vec<_> = rows.iter().map(|r| r.kva_code.as_str()).collect();
        assert_eq!(codes, vec!["DV015", "DV017"]);
    }

    #[test]
    fn confidence_above_one_is_rejected() {
        let err = parse_bbic_mappings(
            Path::new("bbic/icf_to_bbic.csv"),
            "icf_code,dimension,subdimension,confidence\nb140,Barnets utveckling,Kognitiv,1.2\n",
        )
        .unwrap_err();
        match err {
            StandardsError::InvalidValue { line, message, .. } => {
                assert_eq!(line, 2);
                assert_eq!(message, "confidence: confidence 1.2 is outside [0, 1]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
