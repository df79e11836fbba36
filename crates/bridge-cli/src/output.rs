//! Human-readable table output.

use std::collections::BTreeMap;

use bridge_cli::pipeline::SurveyAnalysis;
use bridge_map::GeneratedCode;
use bridge_model::{
    BatchAnalysis, CodeSearchHit, ConfidenceStat, CoreSet, DomainSummary, InterventionSuggestion,
    MappingResult, Suggestion, Taxonomy, ThemeCluster,
};
use bridge_standards::{DoctorReport, IssueSeverity};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

/// Green from 0.90, yellow from 0.80, red below.
fn confidence_cell(confidence: f64) -> Cell {
    let color = if confidence >= 0.90 {
        Color::Green
    } else if confidence >= 0.80 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{confidence:.2}"))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    table
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn print_mapping(result: &MappingResult) {
    println!(
        "{} {} -> {}",
        result.source_system, result.source_code, result.target_system
    );
    let mut table = new_table(&["Code", "Description"]);
    for (code, description) in result.target_codes.iter().zip(&result.target_descriptions) {
        table.add_row(vec![Cell::new(code), Cell::new(description)]);
    }
    if result.is_found() {
        println!("{table}");
    }
    let path = result
        .mapping_path
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    println!("Confidence: {:.2} ({path})", result.confidence);
    print_warnings(&result.warnings);
}

pub fn print_mapping_overview(results: &BTreeMap<Taxonomy, MappingResult>) {
    let mut table = new_table(&["Taxonomy", "Codes", "Descriptions", "Confidence", "Path"]);
    for (taxonomy, result) in results {
        let path = result.mapping_path.map(|p| p.to_string());
        table.add_row(vec![
            Cell::new(taxonomy).add_attribute(Attribute::Bold),
            Cell::new(result.target_codes.join(", ")),
            Cell::new(result.target_descriptions.join("; ")),
            confidence_cell(result.confidence),
            path.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
    for result in results.values() {
        print_warnings(&result.warnings);
    }
}

pub fn print_generated(generated: &GeneratedCode) {
    println!("{}", generated.full_code);
    println!("{}", generated.description);
    println!("ICF {} covers: {}", generated.icf_code, generated.target_icf_codes.join(", "));
    println!("Confidence: {:.2}", generated.confidence);
}

pub fn print_interventions(suggestions: &[InterventionSuggestion]) {
    let mut table = new_table(&["ICF", "KSI", "Action", "Confidence", "Rationale"]);
    for s in suggestions {
        table.add_row(vec![
            Cell::new(format!("{} {}", s.icf_code, s.icf_name)),
            Cell::new(&s.suggested_code).add_attribute(Attribute::Bold),
            Cell::new(&s.ksi_action_name),
            confidence_cell(s.confidence),
            Cell::new(&s.rationale),
        ]);
    }
    println!("{table}");
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No suggestions.");
        return;
    }
    let mut table = new_table(&["Code", "Name", "Confidence", "Source", "Matched"]);
    for s in suggestions {
        table.add_row(vec![
            Cell::new(&s.code).add_attribute(Attribute::Bold),
            Cell::new(&s.name),
            confidence_cell(s.confidence),
            Cell::new(s.source),
            s.matched_text.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

fn themes_table(themes: &[ThemeCluster]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["Theme", "Codes", "Texts", "Share", "Confidence", "Examples"]
            .iter()
            .map(|h| header_cell(h))
            .collect::<Vec<_>>(),
    );
    apply_report_table_style(&mut table);
    for theme in themes {
        table.add_row(vec![
            Cell::new(&theme.name),
            Cell::new(theme.codes.join(", ")),
            Cell::new(theme.frequency).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", theme.percentage)).set_alignment(CellAlignment::Right),
            confidence_cell(theme.confidence),
            Cell::new(theme.example_responses.join("\n")),
        ]);
    }
    table
}

fn print_recommendations(recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    println!("Recommendations:");
    for recommendation in recommendations {
        println!("- {recommendation}");
    }
}

pub fn print_batch(batch: &BatchAnalysis, recommendations: &[String]) {
    println!("Texts: {}", batch.total_texts);
    if batch.clusters.is_empty() {
        println!("No themes reached the minimum frequency.");
    } else {
        println!("{}", themes_table(&batch.clusters));
    }
    print_recommendations(recommendations);
}

pub fn print_domain_summary(summary: &DomainSummary) {
    println!("Domain: {}", summary.domain);
    if summary.is_empty() {
        println!("No free-text responses.");
        return;
    }
    println!(
        "Responses: {} ({:.1}% response rate)",
        summary.total_responses, summary.response_rate
    );
    if !summary.themes.is_empty() {
        println!("{}", themes_table(&summary.themes));
    }
    let top: Vec<_> = summary
        .top_codes
        .iter()
        .map(|c| format!("{} ({})", c.code, c.count))
        .collect();
    println!("Top codes: {}", top.join(", "));
    print_recommendations(&summary.recommendations);
}

pub fn print_survey(analysis: &SurveyAnalysis) {
    if let Some(survey_id) = &analysis.survey_id {
        println!("Survey: {survey_id}");
    }
    println!("Analyzed at: {}", analysis.analyzed_at.to_rfc3339());
    for question in &analysis.freetext_analysis {
        println!("Question {}:", question.question_id);
        print_suggestions(&question.suggestions);
    }
    println!("ICF codes: {}", analysis.aggregated_icf_codes.join(", "));
    if !analysis.ksi_suggestions.is_empty() {
        print_interventions(&analysis.ksi_suggestions);
    }
}

pub fn print_core_set(core_set: &CoreSet) {
    if core_set.codes.is_empty() {
        println!("No core set for condition: {}", core_set.condition);
        return;
    }
    let mut table = new_table(&["ICF", "Name"]);
    for (code, name) in &core_set.codes {
        table.add_row(vec![Cell::new(code).add_attribute(Attribute::Bold), Cell::new(name)]);
    }
    println!("{table}");
}

pub fn print_search_hits(hits: &[CodeSearchHit]) {
    if hits.is_empty() {
        println!("No matches.");
        return;
    }
    let mut table = new_table(&["System", "Code", "Description"]);
    for hit in hits {
        table.add_row(vec![
            Cell::new(hit.system),
            Cell::new(&hit.code).add_attribute(Attribute::Bold),
            Cell::new(&hit.description),
        ]);
    }
    println!("{table}");
}

pub fn print_stats(stats: &[ConfidenceStat]) {
    let mut table = new_table(&["Mapping", "Confidence", "Note"]);
    for stat in stats {
        let category = if stat.warning {
            Cell::new(&stat.category).fg(Color::Red)
        } else {
            Cell::new(&stat.category)
        };
        table.add_row(vec![category, confidence_cell(stat.confidence), Cell::new(&stat.note)]);
    }
    println!("{table}");
}

pub fn print_doctor(report: &DoctorReport) {
    println!("Source: {}", report.source);
    println!("Fingerprint: {}", report.fingerprint);
    println!(
        "Pins: ICF {}, KSI {}, KVÅ {}",
        report.pins.icf, report.pins.ksi, report.pins.kva
    );
    let counts = &report.counts;
    let mut table = new_table(&["Table", "Rows"]);
    for (label, count) in [
        ("ICF codes", counts.icf_codes),
        ("ICF core sets", counts.core_sets),
        ("KSI targets", counts.ksi_targets),
        ("BBIC mappings", counts.bbic_rows),
        ("IBIC mappings", counts.ibic_rows),
        ("KVÅ mappings", counts.kva_rows),
        ("SHANARRI domains", counts.shanarri_domains),
        ("Analyzer patterns", counts.patterns),
        ("Analyzer keywords", counts.keywords),
        ("Analyzer contexts", counts.contexts),
    ] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    if report.issues.is_empty() {
        return;
    }
    let mut issues = new_table(&["Severity", "Issue"]);
    for issue in &report.issues {
        let severity = match issue.severity {
            IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
            IssueSeverity::Info => dim_cell("info"),
        };
        issues.add_row(vec![severity, Cell::new(&issue.message)]);
    }
    println!("{issues}");
}
