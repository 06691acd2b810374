//! Column discovery: names, exclusions, and type classification.
//!
//! Pass 1 reads the first content line to fix the column count and names and
//! resolves exclusions. Pass 2 (mixed data only) re-scans the data rows and
//! counts distinct values per retained column.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use tabula_model::{ColumnExclusion, ColumnType, DataColumn, DataKind, ReaderOptions, ordinal_name};

use crate::error::{IngestError, Result};
use crate::scan::{DataRow, DataRowScanner};
use crate::source::DataSource;
use crate::tokenizer::{LineScanner, Tokenizer};

/// A retained column whose name repeats an earlier retained column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateName {
    /// Zero-based source position of the repeat.
    pub index: usize,
    pub name: String,
}

/// Finalized columns for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnPlan {
    /// Fields per line before exclusion. Every data row must match it.
    pub source_column_count: usize,
    /// Line number of the first content line (header or first data row).
    pub first_line: usize,
    pub has_header: bool,
    /// Retained columns in source order.
    pub columns: Vec<DataColumn>,
    pub duplicate_names: Vec<DuplicateName>,
    /// Name exclusions that matched no column.
    pub unmatched_exclusions: Vec<String>,
}

impl ColumnPlan {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn header_line(&self) -> Option<usize> {
        self.has_header.then_some(self.first_line)
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn count_of(&self, column_type: ColumnType) -> usize {
        self.columns
            .iter()
            .filter(|c| c.column_type == column_type)
            .count()
    }
}

/// Pass 1: reads names from the first content line and applies exclusions.
///
/// Every retained column gets `column_type` until [`classify_columns`] runs.
pub fn discover_columns(
    source: &dyn DataSource,
    options: &ReaderOptions,
    column_type: ColumnType,
) -> Result<ColumnPlan> {
    let tokenizer = Tokenizer::from_options(options);
    let mut records = LineScanner::open(source, &tokenizer)?;
    let first = match records.next() {
        Some(record) => record?,
        None => {
            return Err(IngestError::EmptyFile {
                path: source.name().to_string(),
            });
        }
    };

    let source_column_count = first.fields.len();
    let names: Vec<String> = if options.has_header {
        first
            .fields
            .into_iter()
            .enumerate()
            .map(|(idx, name)| if name.is_empty() { ordinal_name(idx) } else { name })
            .collect()
    } else {
        (0..source_column_count).map(ordinal_name).collect()
    };

    let (excluded, unmatched_exclusions) = resolve_exclusions(&options.excluded_columns, &names);
    let columns: Vec<DataColumn> = names
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !excluded.contains(idx))
        .map(|(idx, name)| DataColumn::new(idx, name, column_type))
        .collect();

    let mut seen = HashSet::new();
    let duplicate_names: Vec<DuplicateName> = columns
        .iter()
        .filter(|column| !seen.insert(column.name.as_str()))
        .map(|column| DuplicateName {
            index: column.index,
            name: column.name.clone(),
        })
        .collect();

    for duplicate in &duplicate_names {
        warn!(
            file = source.name(),
            column = duplicate.index + 1,
            name = %duplicate.name,
            "duplicate column name"
        );
    }
    for name in &unmatched_exclusions {
        warn!(file = source.name(), name = %name, "excluded column not found");
    }
    debug!(
        file = source.name(),
        source_columns = source_column_count,
        retained = columns.len(),
        excluded = excluded.len(),
        "columns discovered"
    );

    Ok(ColumnPlan {
        source_column_count,
        first_line: first.line_number,
        has_header: options.has_header,
        columns,
        duplicate_names,
        unmatched_exclusions,
    })
}

/// Resolves an exclusion to sorted, in-range source positions.
fn resolve_exclusions(
    exclusion: &ColumnExclusion,
    names: &[String],
) -> (BTreeSet<usize>, Vec<String>) {
    match exclusion {
        ColumnExclusion::None => (BTreeSet::new(), Vec::new()),
        ColumnExclusion::Indices(indices) => (
            indices
                .iter()
                .copied()
                .filter(|&idx| idx < names.len())
                .collect(),
            Vec::new(),
        ),
        ColumnExclusion::Names(excluded) => {
            let positions = names
                .iter()
                .enumerate()
                .filter(|(_, name)| excluded.contains(name.as_str()))
                .map(|(idx, _)| idx)
                .collect();
            let unmatched = excluded
                .iter()
                .filter(|name| !names.iter().any(|candidate| candidate == *name))
                .cloned()
                .collect();
            (positions, unmatched)
        }
    }
}

/// Discrete iff the distinct non-missing count is within the threshold.
pub fn classify(distinct_values: usize, threshold: usize) -> ColumnType {
    if distinct_values <= threshold {
        ColumnType::Discrete
    } else {
        ColumnType::Continuous
    }
}

/// Pass 2: classifies each retained column from its distinct values.
///
/// Rows whose field count differs from the plan are not sampled; missing
/// markers are not counted.
pub fn classify_columns(
    source: &dyn DataSource,
    options: &ReaderOptions,
    plan: &mut ColumnPlan,
) -> Result<()> {
    let tokenizer = Tokenizer::from_options(options);
    let threshold = options.category_threshold;
    let mut distinct: Vec<HashSet<String>> = vec![HashSet::new(); plan.columns.len()];
    let mut sampled_rows = 0usize;

    for row in DataRowScanner::open(source, &tokenizer, plan)? {
        let DataRow::Complete { values, .. } = row? else {
            continue;
        };
        sampled_rows += 1;
        for (seen, value) in distinct.iter_mut().zip(values) {
            if seen.len() > threshold || options.is_missing(&value) {
                continue;
            }
            seen.insert(value);
        }
    }

    for (column, seen) in plan.columns.iter_mut().zip(&distinct) {
        column.column_type = classify(seen.len(), threshold);
    }
    debug!(
        file = source.name(),
        sampled_rows,
        discrete = plan.count_of(ColumnType::Discrete),
        continuous = plan.count_of(ColumnType::Continuous),
        "columns classified"
    );
    Ok(())
}

/// Builds the plan a read or validation of `kind` works from.
///
/// Mixed data gets both passes; continuous and discrete data fix every column
/// to their own type. Covariance files have no tabular plan and are treated
/// as continuous here.
pub fn build_column_plan(
    source: &dyn DataSource,
    options: &ReaderOptions,
    kind: DataKind,
) -> Result<ColumnPlan> {
    match kind {
        DataKind::Discrete => discover_columns(source, options, ColumnType::Discrete),
        DataKind::Mixed => {
            let mut plan = discover_columns(source, options, ColumnType::Continuous)?;
            classify_columns(source, options, &mut plan)?;
            Ok(plan)
        }
        DataKind::Continuous | DataKind::Covariance => {
            discover_columns(source, options, ColumnType::Continuous)
        }
    }
}
