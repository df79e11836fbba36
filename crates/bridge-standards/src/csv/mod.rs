#![deny(unsafe_code)]

//! CSV table parsers. Every parser takes the table contents plus the path it
//! was read from (or the manifest path for embedded tables) for error reports.

pub mod icf;
pub mod ksi;
pub mod mappings;
pub mod rules;

use std::path::Path;

use bridge_model::confidence;
use csv::StringRecord;

use crate::error::StandardsError;

/// Separator for list-valued cells.
pub const LIST_SEPARATOR: char = ';';

/// Header row plus data rows of one table.
pub(crate) struct Table<'p> {
    path: &'p Path,
    headers: StringRecord,
    records: Vec<StringRecord>,
}

/// A data row with header-based access.
pub(crate) struct Row<'t> {
    path: &'t Path,
    headers: &'t StringRecord,
    record: &'t StringRecord,
}

impl<'p> Table<'p> {
    /// Reads every row and checks that the `required` columns exist.
    pub(crate) fn parse(
        path: &'p Path,
        contents: &str,
        required: &[&str],
    ) -> Result<Self, StandardsError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(contents.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| StandardsError::csv(path, &e))?
            .clone();

        for column in required {
            if !headers.iter().any(|h| h.trim() == *column) {
                return Err(StandardsError::Csv {
                    path: path.to_path_buf(),
                    line: Some(1),
                    message: format!("missing column {column}"),
                });
            }
        }

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record.map_err(|e| StandardsError::csv(path, &e))?);
        }
        Ok(Self {
            path,
            headers,
            records,
        })
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(|record| Row {
            path: self.path,
            headers: &self.headers,
            record,
        })
    }
}

impl Row<'_> {
    /// 1-based line number in the source file.
    pub(crate) fn line(&self) -> u64 {
        self.record.position().map_or(0, csv::Position::line)
    }

    /// Trimmed, non-empty cell value.
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub(crate) fn require(&self, name: &str) -> Result<&str, StandardsError> {
        self.get(name)
            .ok_or_else(|| self.invalid(format!("missing value for {name}")))
    }

    /// Parses a confidence cell and checks it lies in [0, 1].
    pub(crate) fn confidence(&self, name: &str) -> Result<f64, StandardsError> {
        let raw = self.require(name)?;
        let value: f64 = raw
            .parse()
            .map_err(|_| self.invalid(format!("{name} is not a number: {raw}")))?;
        confidence::checked(value).map_err(|err| self.invalid(format!("{name}: {err}")))
    }

    /// Splits a `;`-separated list cell; an empty cell yields an empty list.
    pub(crate) fn list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|cell| {
                cell.split(LIST_SEPARATOR)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn invalid(&self, message: impl Into<String>) -> StandardsError {
        StandardsError::InvalidValue {
            path: self.path.to_path_buf(),
            line: self.line(),
            message: message.into(),
        }
    }
}
