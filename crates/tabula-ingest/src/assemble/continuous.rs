use tracing::{info, info_span};

use tabula_model::{ColumnType, ContinuousData, Dataset, MISSING_CONTINUOUS, ReaderOptions};

use super::{ReadOutcome, Rejections, log_plan_warnings};
use crate::discovery::discover_columns;
use crate::error::Result;
use crate::issue::Issue;
use crate::scan::{ContinuousCell, DataRow, DataRowScanner, parse_continuous};
use crate::source::DataSource;
use crate::tokenizer::Tokenizer;

/// Reads every retained column as a floating value.
///
/// Missing markers become [`MISSING_CONTINUOUS`]. A row with any token that
/// is neither a finite number nor a missing marker is excluded, with one
/// `INVALID_NUMBER` issue per bad cell.
pub fn read_continuous(source: &dyn DataSource, options: &ReaderOptions) -> Result<ReadOutcome> {
    let span = info_span!("read_continuous", file = source.name());
    let _guard = span.enter();

    let plan = discover_columns(source, options, ColumnType::Continuous)?;
    log_plan_warnings(source, &plan);
    let tokenizer = Tokenizer::from_options(options);
    let mut rejections = Rejections::new(source.name());
    let mut data = Vec::new();

    for row in DataRowScanner::open(source, &tokenizer, &plan)? {
        let row = row?;
        let DataRow::Complete {
            line_number,
            values,
        } = &row
        else {
            rejections.reject_row(row.shape_issue());
            continue;
        };

        let mut parsed = Vec::with_capacity(values.len());
        let mut invalid = Vec::new();
        for (column, token) in plan.columns.iter().zip(values) {
            match parse_continuous(token, options) {
                ContinuousCell::Value(value) => parsed.push(value),
                ContinuousCell::Missing => parsed.push(MISSING_CONTINUOUS),
                ContinuousCell::Invalid => invalid.push(Issue::InvalidNumber {
                    line: *line_number,
                    column: column.number(),
                    value: token.clone(),
                }),
            }
        }
        if invalid.is_empty() {
            data.push(parsed);
        } else {
            rejections.reject_row(invalid);
        }
    }

    info!(
        rows = data.len(),
        columns = plan.len(),
        rejected = rejections.rows,
        "continuous dataset assembled"
    );
    Ok(rejections.finish(Dataset::Continuous(ContinuousData {
        columns: plan.columns,
        data,
    })))
}
