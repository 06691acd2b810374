use tracing::{debug, info, info_span};

use tabula_model::{CovarianceData, Dataset, MISSING_CONTINUOUS, ReaderOptions};

use super::ReadOutcome;
use crate::error::{IngestError, Result};
use crate::scan::{ContinuousCell, parse_continuous};
use crate::source::DataSource;
use crate::tokenizer::{LineScanner, Tokenizer};

/// Reads a covariance file into [`Dataset::Covariance`].
///
/// Covariance files are not partially recoverable, so the outcome never
/// carries issues; any structural problem is an error.
pub fn read_covariance(source: &dyn DataSource, options: &ReaderOptions) -> Result<ReadOutcome> {
    let matrix = read_covariance_matrix(source, options)?;
    Ok(ReadOutcome {
        dataset: Dataset::Covariance(matrix),
        issues: Vec::new(),
        rejected_rows: 0,
    })
}

/// Parses the case count, the variable names, and the lower triangle.
///
/// Missing markers inside the triangle become [`MISSING_CONTINUOUS`].
///
/// Layout (blank and comment lines skipped):
///
/// ```text
/// 100
/// x y z
/// 1.0
/// 0.5 2.0
/// 0.1 0.2 3.0
/// ```
pub fn read_covariance_matrix(
    source: &dyn DataSource,
    options: &ReaderOptions,
) -> Result<CovarianceData> {
    let span = info_span!("read_covariance", file = source.name());
    let _guard = span.enter();
    let path = source.name();

    let tokenizer = Tokenizer::from_options(options);
    let mut records = LineScanner::open(source, &tokenizer)?;

    let Some(first) = records.next().transpose()? else {
        return Err(IngestError::EmptyFile {
            path: path.to_string(),
        });
    };
    let token = first.fields.first().map(String::as_str).unwrap_or_default();
    let cases = token
        .parse::<usize>()
        .ok()
        .filter(|&cases| cases > 0)
        .ok_or_else(|| IngestError::InvalidCaseCount {
            path: path.to_string(),
            line: first.line_number,
            value: token.to_string(),
        })?;

    let variables = match records.next().transpose()? {
        Some(record) if record.fields.iter().any(|name| !name.is_empty()) => record.fields,
        _ => {
            return Err(IngestError::MissingVariableNames {
                path: path.to_string(),
            });
        }
    };

    let n = variables.len();
    let mut lower: Vec<Vec<f64>> = Vec::with_capacity(n);
    for row in 0..n {
        let Some(record) = records.next().transpose()? else {
            return Err(IngestError::MissingCovarianceRows {
                path: path.to_string(),
                expected: n,
                actual: row,
            });
        };
        if record.fields.len() != row + 1 {
            return Err(IngestError::CovarianceRowLength {
                path: path.to_string(),
                line: record.line_number,
                row: row + 1,
                expected: row + 1,
                actual: record.fields.len(),
            });
        }
        let values = record
            .fields
            .iter()
            .enumerate()
            .map(|(idx, token)| match parse_continuous(token, options) {
                ContinuousCell::Value(value) => Ok(value),
                ContinuousCell::Missing => Ok(MISSING_CONTINUOUS),
                ContinuousCell::Invalid => Err(IngestError::InvalidCovarianceValue {
                    path: path.to_string(),
                    line: record.line_number,
                    column: idx + 1,
                    value: token.clone(),
                }),
            })
            .collect::<Result<Vec<f64>>>()?;
        lower.push(values);
    }

    let mut trailing = 0usize;
    for record in records {
        record?;
        trailing += 1;
    }
    if trailing > 0 {
        debug!(trailing, "ignoring lines after the covariance matrix");
    }

    let matrix = CovarianceData::from_lower_triangle(variables, cases, &lower)?;
    info!(cases, variables = n, "covariance matrix assembled");
    Ok(matrix)
}
