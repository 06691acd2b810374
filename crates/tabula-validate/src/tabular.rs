//! Diagnostic pass over continuous, discrete, and mixed files.

use std::ops::ControlFlow;

use tabula_ingest::{
    DataRow, DataRowScanner, DataSource, Issue, Result, Tokenizer, classify_columns,
    discover_columns, parse_number,
};
use tabula_model::{ColumnType, DataColumn, DataKind, ValidationOptions};

use crate::collector::MessageCollector;

/// Checks header, row shape, and cell values of a tabular file.
///
/// `Err` only for input failures; data problems go to `collector`.
pub(crate) fn validate_tabular(
    source: &dyn DataSource,
    options: &ValidationOptions,
    collector: &mut MessageCollector,
) -> Result<()> {
    let reader = &options.reader;
    let column_type = match options.kind {
        DataKind::Discrete => ColumnType::Discrete,
        _ => ColumnType::Continuous,
    };
    let mut plan = discover_columns(source, reader, column_type)?;

    for duplicate in &plan.duplicate_names {
        let issue = Issue::DuplicateColumnName {
            line: plan.first_line,
            column: duplicate.index + 1,
            name: duplicate.name.clone(),
        };
        if collector.push(&issue).is_break() {
            return Ok(());
        }
    }
    for name in &plan.unmatched_exclusions {
        let issue = Issue::UnknownExcludedColumn { name: name.clone() };
        if collector.push(&issue).is_break() {
            return Ok(());
        }
    }

    if options.kind == DataKind::Mixed {
        classify_columns(source, reader, &mut plan)?;
    }

    let tokenizer = Tokenizer::from_options(reader);
    for row in DataRowScanner::open(source, &tokenizer, &plan)? {
        let row = row?;
        if check_row(&row, &plan.columns, options, collector).is_break() {
            break;
        }
    }
    Ok(())
}

fn check_row(
    row: &DataRow,
    columns: &[DataColumn],
    options: &ValidationOptions,
    collector: &mut MessageCollector,
) -> ControlFlow<()> {
    let DataRow::Complete {
        line_number,
        values,
    } = row
    else {
        return match row.shape_issue() {
            Some(issue) => collector.push(&issue),
            None => ControlFlow::Continue(()),
        };
    };

    for (column, token) in columns.iter().zip(values) {
        let issue = if options.reader.is_missing(token) {
            Issue::MissingValue {
                line: *line_number,
                column: column.number(),
                value: token.clone(),
            }
        } else if column.column_type == ColumnType::Continuous && parse_number(token).is_none() {
            Issue::InvalidNumber {
                line: *line_number,
                column: column.number(),
                value: token.clone(),
            }
        } else {
            continue;
        };
        collector.push(&issue)?;
    }
    ControlFlow::Continue(())
}
