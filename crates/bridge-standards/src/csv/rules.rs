#![deny(unsafe_code)]

//! Free-text rule tables for the text analyzer.

use std::path::Path;

use serde::Serialize;

use super::Table;
use crate::error::StandardsError;

/// A code a rule fires for, with its base confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTarget {
    pub icf_code: String,
    pub confidence: f64,
}

/// A pattern or keyword with the codes it suggests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRule {
    /// Regular expression (pattern table) or lower-case substring (keyword table).
    pub trigger: String,
    /// Targets in table order.
    pub targets: Vec<RuleTarget>,
}

/// Code prefixes relevant to one wellbeing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextRule {
    pub context: String,
    pub prefixes: Vec<String>,
}

/// Parses a `{trigger_column},icf_code,confidence` table.
///
/// Rows sharing a trigger are grouped into one rule; rules keep the order in
/// which their trigger first appears.
pub fn parse_text_rules(
    path: &Path,
    contents: &str,
    trigger_column: &str,
) -> Result<Vec<TextRule>, StandardsError> {
    let table = Table::parse(path, contents, &[trigger_column, "icf_code", "confidence"])?;

    let mut rules: Vec<TextRule> = Vec::new();
    for row in table.rows() {
        let trigger = row.require(trigger_column)?;
        let target = RuleTarget {
            icf_code: row.require("icf_code")?.to_string(),
            confidence: row.confidence("confidence")?,
        };
        match rules.iter_mut().find(|r| r.trigger == trigger) {
            Some(rule) => rule.targets.push(target),
            None => rules.push(TextRule {
                trigger: trigger.to_string(),
                targets: vec![target],
            }),
        }
    }
    Ok(rules)
}

/// Parses `context,prefixes`.
pub fn parse_contexts(path: &Path, contents: &str) -> Result<Vec<ContextRule>, StandardsError> {
    let table = Table::parse(path, contents, &["context", "prefixes"])?;
    table
        .rows()
        .map(|row| {
            Ok(ContextRule {
                context: row.require("context")?.to_string(),
                prefixes: row.list("prefixes"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_sharing_a_trigger_form_one_rule() {
        let rules = parse_text_rules(
            Path::new("analyzer/keywords.csv"),
            "keyword,icf_code,confidence
stress,b152,0.91
oro,b152,0.94
stress,d240,0.88
",
            "keyword",
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].trigger, "stress");
        let codes: Vec<_> = rules[0].targets.iter().map(|t| t.icf_code.as_str()).collect();
        assert_eq!(codes, vec!["b152", "d240"]);
        assert_eq!(rules[1].trigger, "oro");
    }

    #[test]
    fn contexts_split_prefixes() {
        let contexts = parse_contexts(
            Path::new("analyzer/contexts.csv"),
            "context,prefixes\ntrygghet,d710;e165\n",
        )
        .unwrap();
        assert_eq!(contexts[0].prefixes, vec!["d710", "e165"]);
    }
}
