#![deny(unsafe_code)]

use std::path::Path;

use bridge_model::{IcfComponent, TaxonomyEntry};
use serde::Serialize;

use super::Table;
use crate::error::StandardsError;

/// A curated ICF core set before name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoreSetRow {
    pub condition: String,
    pub icf_codes: Vec<String>,
}

/// Parses `code,component,name_sv,name_en,parent_code,level,description`.
///
/// Row-level checks only; the hierarchy is validated once the whole table is loaded.
pub fn parse_icf_codes(path: &Path, contents: &str) -> Result<Vec<TaxonomyEntry>, StandardsError> {
    let table = Table::parse(path, contents, &["code", "component", "name_sv", "level"])?;

    let mut entries = Vec::new();
    for row in table.rows() {
        let code = row.require("code")?;
        let component_raw = row.require("component")?;
        let component = match component_raw.parse::<IcfComponent>() {
            Ok(component) if component_raw.chars().count() == 1 => component,
            _ => return Err(row.invalid(format!("unknown ICF component {component_raw}"))),
        };
        if IcfComponent::of_code(code) != Some(component) {
            return Err(row.invalid(format!(
                "code {code} does not belong to component {component}"
            )));
        }
        let level_raw = row.require("level")?;
        let level: u8 = level_raw
            .parse()
            .map_err(|_| row.invalid(format!("level is not a number: {level_raw}")))?;

        entries.push(TaxonomyEntry {
            code: code.to_string(),
            component,
            name: row.require("name_sv")?.to_string(),
            name_en: row.get("name_en").map(str::to_string),
            description: row.get("description").map(str::to_string),
            parent_code: row.get("parent_code").map(str::to_string),
            level,
        });
    }
    Ok(entries)
}

/// Parses `condition,icf_codes`.
pub fn parse_core_sets(path: &Path, contents: &str) -> Result<Vec<CoreSetRow>, StandardsError> {
    let table = Table::parse(path, contents, &["condition", "icf_codes"])?;
    table
        .rows()
        .map(|row| {
            Ok(CoreSetRow {
                condition: row.require("condition")?.to_string(),
                icf_codes: row.list("icf_codes"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODES: &str = "code,component,name_sv,name_en,parent_code,level,description
b1,b,Mentala funktioner,Mental functions,,1,
b140,b,Uppmärksamhetsfunktioner,Attention functions,b1,2,Fokus
";

    #[test]
    fn parses_codes_with_optional_columns() {
        let entries = parse_icf_codes(Path::new("icf/codes.csv"), CODES).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].parent_code, None);
        assert_eq!(entries[0].description, None);
        assert_eq!(entries[1].parent_code.as_deref(), Some("b1"));
        assert_eq!(entries[1].level, 2);
        assert_eq!(entries[1].name_en.as_deref(), Some("Attention functions"));
    }

    #[test]
    fn rejects_unknown_component() {
        let contents = "code,component,name_sv,name_en,parent_code,level,description
x1,x,Okänd,,,1,
";
        let err = parse_icf_codes(Path::new("icf/codes.csv"), contents).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn rejects_component_mismatch() {
        let contents = "code,component,name_sv,name_en,parent_code,level,description
d1,b,Lärande,,,1,
";
        assert!(parse_icf_codes(Path::new("icf/codes.csv"), contents).is_err());
    }

    #[test]
    fn core_set_lists_split_on_semicolon() {
        let rows = parse_core_sets(
            Path::new("icf/core_sets.csv"),
            "condition,icf_codes\nattention,b140; d160\n",
        )
        .unwrap();
        assert_eq!(rows[0].icf_codes, vec!["b140", "d160"]);
    }
}
