//! Dataset assemblers.
//!
//! Each assembler runs column discovery, then re-scans the source once more
//! with the finalized plan. Rows that fail the shape or number checks are
//! left out of the dataset and reported in [`ReadOutcome::issues`].

mod continuous;
mod covariance;
mod discrete;
mod mixed;

pub use continuous::read_continuous;
pub use covariance::{read_covariance, read_covariance_matrix};
pub use discrete::read_discrete;
pub use mixed::read_mixed;

use tracing::warn;

use tabula_model::{DataKind, Dataset, ReaderOptions, ValidationResult};

use crate::discovery::ColumnPlan;
use crate::error::Result;
use crate::issue::Issue;
use crate::source::DataSource;

/// A dataset plus the rows left out of it.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub dataset: Dataset,
    /// One ERROR result per excluded row or invalid cell.
    pub issues: Vec<ValidationResult>,
    /// Number of data rows excluded.
    pub rejected_rows: usize,
}

impl ReadOutcome {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reads `source` into the dataset shape named by `kind`.
pub fn read_dataset(
    source: &dyn DataSource,
    kind: DataKind,
    options: &ReaderOptions,
) -> Result<ReadOutcome> {
    match kind {
        DataKind::Continuous => read_continuous(source, options),
        DataKind::Discrete => read_discrete(source, options),
        DataKind::Mixed => read_mixed(source, options),
        DataKind::Covariance => read_covariance(source, options),
    }
}

/// Collects excluded rows for one read.
struct Rejections<'a> {
    file: &'a str,
    issues: Vec<ValidationResult>,
    rows: usize,
}

impl<'a> Rejections<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            issues: Vec::new(),
            rows: 0,
        }
    }

    fn reject_row(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.rows += 1;
        for issue in issues {
            warn!(file = self.file, line = issue.line(), "{}", issue.message());
            self.issues.push(issue.to_result(self.file));
        }
    }

    fn finish(self, dataset: Dataset) -> ReadOutcome {
        ReadOutcome {
            dataset,
            issues: self.issues,
            rejected_rows: self.rows,
        }
    }
}

fn log_plan_warnings(source: &dyn DataSource, plan: &ColumnPlan) {
    if plan.is_empty() {
        warn!(file = source.name(), "every column is excluded");
    }
}
