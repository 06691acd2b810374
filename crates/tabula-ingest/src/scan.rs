//! Data-row grammar shared by every tabular pass.

use tabula_model::ReaderOptions;

use crate::discovery::ColumnPlan;
use crate::error::Result;
use crate::issue::Issue;
use crate::source::DataSource;
use crate::tokenizer::{LineScanner, Tokenizer};

/// One data line checked against a column plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRow {
    /// Field count matched; `values` holds the retained columns in plan order.
    Complete {
        line_number: usize,
        values: Vec<String>,
    },
    /// Field count differs from the source column count.
    Malformed {
        line_number: usize,
        expected: usize,
        actual: usize,
    },
}

impl DataRow {
    /// Excess or insufficient data for a malformed row.
    pub fn shape_issue(&self) -> Option<Issue> {
        match *self {
            Self::Complete { .. } => None,
            Self::Malformed {
                line_number,
                expected,
                actual,
            } if actual > expected => Some(Issue::ExcessData {
                line: line_number,
                expected,
                actual,
            }),
            Self::Malformed {
                line_number,
                expected,
                actual,
            } => Some(Issue::InsufficientData {
                line: line_number,
                expected,
                actual,
            }),
        }
    }
}

/// Iterates the data rows of a source under a fixed plan.
///
/// The header line (if the plan has one) is skipped. Rows are never padded
/// or truncated: any field-count mismatch yields [`DataRow::Malformed`].
pub struct DataRowScanner<'a> {
    records: LineScanner<'a>,
    plan: &'a ColumnPlan,
    header_pending: bool,
}

impl<'a> DataRowScanner<'a> {
    pub fn open(
        source: &'a dyn DataSource,
        tokenizer: &'a Tokenizer,
        plan: &'a ColumnPlan,
    ) -> Result<Self> {
        Ok(Self {
            records: LineScanner::open(source, tokenizer)?,
            plan,
            header_pending: plan.has_header,
        })
    }
}

impl Iterator for DataRowScanner<'_> {
    type Item = Result<DataRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err)),
            };
            if self.header_pending {
                self.header_pending = false;
                continue;
            }
            let expected = self.plan.source_column_count;
            let actual = record.fields.len();
            if actual != expected {
                return Some(Ok(DataRow::Malformed {
                    line_number: record.line_number,
                    expected,
                    actual,
                }));
            }
            let mut fields = record.fields;
            let values = self
                .plan
                .columns
                .iter()
                .map(|column| std::mem::take(&mut fields[column.index]))
                .collect();
            return Some(Ok(DataRow::Complete {
                line_number: record.line_number,
                values,
            }));
        }
    }
}

/// Interpretation of a token in a continuous column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousCell {
    Value(f64),
    Missing,
    Invalid,
}

/// Parses a finite floating value.
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_continuous(token: &str, options: &ReaderOptions) -> ContinuousCell {
    if options.is_missing(token) {
        return ContinuousCell::Missing;
    }
    parse_number(token).map_or(ContinuousCell::Invalid, ContinuousCell::Value)
}
