//! Diagnostic pass over covariance files.
//!
//! Unlike the reader, row-length problems and bad entries do not stop the
//! scan. Only a bad header (case count or variable names) ends the pass.

use std::collections::HashSet;
use std::ops::ControlFlow;

use tabula_ingest::{
    ContinuousCell, DataSource, Issue, LineScanner, RawRecord, Result, Tokenizer,
    parse_continuous,
};
use tabula_model::ReaderOptions;

use crate::collector::MessageCollector;

pub(crate) fn validate_covariance(
    source: &dyn DataSource,
    options: &ReaderOptions,
    collector: &mut MessageCollector,
) -> Result<()> {
    let tokenizer = Tokenizer::from_options(options);
    let mut records = LineScanner::open(source, &tokenizer)?;

    let Some(first) = records.next().transpose()? else {
        let _ = collector.push(&Issue::EmptyFile);
        return Ok(());
    };
    let token = first.fields.first().map(String::as_str).unwrap_or_default();
    let case_count_valid = token.parse::<usize>().is_ok_and(|cases| cases > 0);
    if !case_count_valid {
        let issue = Issue::InvalidCaseCount {
            line: first.line_number,
            value: token.to_string(),
        };
        if collector.push(&issue).is_break() {
            return Ok(());
        }
    }

    let names = match records.next().transpose()? {
        Some(record) if record.fields.iter().any(|name| !name.is_empty()) => record,
        _ => {
            let _ = collector.push(&Issue::MissingVariableNames);
            return Ok(());
        }
    };
    if check_names(&names, collector).is_break() {
        return Ok(());
    }

    let n = names.fields.len();
    let mut row = 0;
    while row < n {
        let Some(record) = records.next().transpose()? else {
            let _ = collector.push(&Issue::MissingRows {
                expected: n,
                actual: row,
            });
            return Ok(());
        };
        row += 1;
        if check_matrix_row(&record, row, options, collector).is_break() {
            return Ok(());
        }
    }
    Ok(())
}

fn check_names(names: &RawRecord, collector: &mut MessageCollector) -> ControlFlow<()> {
    let mut seen = HashSet::new();
    for (idx, name) in names.fields.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            collector.push(&Issue::DuplicateColumnName {
                line: names.line_number,
                column: idx + 1,
                name: name.clone(),
            })?;
        }
    }
    ControlFlow::Continue(())
}

/// Row `row` (1-based) of the lower triangle must hold exactly `row` values.
fn check_matrix_row(
    record: &RawRecord,
    row: usize,
    options: &ReaderOptions,
    collector: &mut MessageCollector,
) -> ControlFlow<()> {
    let actual = record.fields.len();
    if actual != row {
        let issue = if actual > row {
            Issue::ExcessData {
                line: record.line_number,
                expected: row,
                actual,
            }
        } else {
            Issue::InsufficientData {
                line: record.line_number,
                expected: row,
                actual,
            }
        };
        collector.push(&issue)?;
    }

    for (idx, token) in record.fields.iter().enumerate() {
        let issue = match parse_continuous(token, options) {
            ContinuousCell::Value(_) => continue,
            ContinuousCell::Missing => Issue::MissingValue {
                line: record.line_number,
                column: idx + 1,
                value: token.clone(),
            },
            ContinuousCell::Invalid => Issue::InvalidNumber {
                line: record.line_number,
                column: idx + 1,
                value: token.clone(),
            },
        };
        collector.push(&issue)?;
    }
    ControlFlow::Continue(())
}
