//! ICF code table entries.

use serde::{Deserialize, Serialize};

use crate::enums::IcfComponent;

/// One entry of the ICF code table.
///
/// Entries form a forest through `parent_code`: a set parent must resolve to
/// an existing entry whose `level` is exactly one less (chapters are level 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// ICF code, e.g. `d160`.
    pub code: String,
    pub component: IcfComponent,
    /// Swedish display name.
    pub name: String,
    /// English display name.
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub parent_code: Option<String>,
    /// Hierarchy depth, chapter = 1.
    pub level: u8,
}

impl TaxonomyEntry {
    /// Returns true for chapter entries (no parent).
    pub fn is_chapter(&self) -> bool {
        self.parent_code.is_none()
    }

    /// Returns the display name in the requested language, falling back to Swedish.
    pub fn display_name(&self, english: bool) -> &str {
        if english {
            self.name_en.as_deref().unwrap_or(&self.name)
        } else {
            &self.name
        }
    }
}

/// Returns the chapter prefix of an ICF code (`b140` -> `b1`).
///
/// Codes of two characters or fewer have no separate chapter and yield `None`.
pub fn chapter_of(code: &str) -> Option<String> {
    let code = code.trim();
    if code.chars().count() <= 2 {
        return None;
    }
    Some(code.chars().take(2).collect())
}
