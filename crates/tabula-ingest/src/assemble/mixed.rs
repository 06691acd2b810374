use tracing::{info, info_span};

use tabula_model::{
    CategoryDictionary, ColumnType, DataKind, Dataset, MISSING_CATEGORY, MISSING_CONTINUOUS,
    MixedData, ReaderOptions,
};

use super::{ReadOutcome, Rejections, log_plan_warnings};
use crate::discovery::build_column_plan;
use crate::error::Result;
use crate::issue::Issue;
use crate::scan::{ContinuousCell, DataRow, DataRowScanner, parse_continuous};
use crate::source::DataSource;
use crate::tokenizer::Tokenizer;

/// Reads a file whose columns are classified one by one.
///
/// Continuous columns fill a floating array, discrete columns an integer
/// array with a category dictionary; the other store stays `None`. A row is
/// committed only once every continuous token parsed, so rejected rows never
/// add categories.
pub fn read_mixed(source: &dyn DataSource, options: &ReaderOptions) -> Result<ReadOutcome> {
    let span = info_span!("read_mixed", file = source.name());
    let _guard = span.enter();

    let plan = build_column_plan(source, options, DataKind::Mixed)?;
    log_plan_warnings(source, &plan);
    let tokenizer = Tokenizer::from_options(options);
    let mut rejections = Rejections::new(source.name());

    let mut categories: Vec<Option<CategoryDictionary>> = plan
        .columns
        .iter()
        .map(|c| c.is_discrete().then(CategoryDictionary::new))
        .collect();
    let mut continuous: Vec<Option<Vec<f64>>> = plan
        .columns
        .iter()
        .map(|c| (!c.is_discrete()).then(Vec::new))
        .collect();
    let mut discrete: Vec<Option<Vec<i32>>> = plan
        .columns
        .iter()
        .map(|c| c.is_discrete().then(Vec::new))
        .collect();
    let mut rows = 0usize;

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

        let mut numbers = vec![MISSING_CONTINUOUS; values.len()];
        let mut invalid = Vec::new();
        for (idx, (column, token)) in plan.columns.iter().zip(values).enumerate() {
            if column.column_type != ColumnType::Continuous {
                continue;
            }
            match parse_continuous(token, options) {
                ContinuousCell::Value(value) => numbers[idx] = value,
                ContinuousCell::Missing => {}
                ContinuousCell::Invalid => invalid.push(Issue::InvalidNumber {
                    line: *line_number,
                    column: column.number(),
                    value: token.clone(),
                }),
            }
        }
        if !invalid.is_empty() {
            rejections.reject_row(invalid);
            continue;
        }

        for (idx, token) in values.iter().enumerate() {
            if let Some(store) = continuous[idx].as_mut() {
                store.push(numbers[idx]);
            }
            if let (Some(store), Some(dictionary)) =
                (discrete[idx].as_mut(), categories[idx].as_mut())
            {
                let code = if options.is_missing(token) {
                    MISSING_CATEGORY
                } else {
                    dictionary.encode(token)
                };
                store.push(code);
            }
        }
        rows += 1;
    }

    info!(
        rows,
        continuous = plan.count_of(ColumnType::Continuous),
        discrete = plan.count_of(ColumnType::Discrete),
        rejected = rejections.rows,
        "mixed dataset assembled"
    );
    Ok(rejections.finish(Dataset::Mixed(MixedData {
        columns: plan.columns,
        categories,
        continuous,
        discrete,
        rows,
    })))
}
