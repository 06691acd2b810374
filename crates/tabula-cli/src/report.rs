//! Rendering of validation reports.

use anyhow::{Context, Result, anyhow};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use tabula_model::{AttributeKey, Level, ValidationReport, ValidationResult};

/// One flattened report line for CSV output.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    level: Level,
    kind: &'static str,
    file: Option<&'a str>,
    line: Option<&'a str>,
    column: Option<&'a str>,
    value: Option<&'a str>,
    expected: Option<&'a str>,
    actual: Option<&'a str>,
    message: &'a str,
}

impl<'a> ReportRow<'a> {
    fn new(result: &'a ValidationResult) -> Self {
        Self {
            level: result.level,
            kind: result.kind.label(),
            file: result.attribute(AttributeKey::FileName),
            line: result.attribute(AttributeKey::LineNumber),
            column: result.attribute(AttributeKey::ColumnNumber),
            value: result.attribute(AttributeKey::Value),
            expected: result.attribute(AttributeKey::ExpectedCount),
            actual: result.attribute(AttributeKey::ActualCount),
            message: &result.message,
        }
    }
}

pub fn report_to_json(report: &ValidationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

/// CSV with a header row; results in grouped order.
pub fn report_to_csv(report: &ValidationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in report.results() {
        writer
            .serialize(ReportRow::new(result))
            .context("write report row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush report: {}", err.error()))?;
    String::from_utf8(bytes).context("report is not UTF-8")
}

pub fn report_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Kind"),
        header_cell("Line"),
        header_cell("Column"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for result in report.results() {
        table.add_row(vec![
            level_cell(result.level),
            Cell::new(result.kind.label()),
            optional_cell(result.attribute(AttributeKey::LineNumber)),
            optional_cell(result.attribute(AttributeKey::ColumnNumber)),
            optional_cell(result.attribute(AttributeKey::Value)),
            Cell::new(&result.message),
        ]);
    }
    table
}

/// One-line count summary, e.g. `2 errors, 0 warnings, 1 info`.
pub fn report_counts(report: &ValidationReport) -> String {
    format!(
        "{} {}, {} {}, {} {}",
        report.errors.len(),
        plural(report.errors.len(), "error", "errors"),
        report.warnings.len(),
        plural(report.warnings.len(), "warning", "warnings"),
        report.infos.len(),
        plural(report.infos.len(), "info", "infos"),
    )
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn level_cell(level: Level) -> Cell {
    match level {
        Level::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Level::Warning => Cell::new("WARN").fg(Color::Yellow),
        Level::Info => Cell::new("INFO").fg(Color::Blue),
    }
}
