use tracing::{info, info_span};

use tabula_model::{
    CategoryDictionary, ColumnType, Dataset, DiscreteColumn, MISSING_CATEGORY, ReaderOptions,
    VerticalDiscreteData,
};

use super::{ReadOutcome, Rejections, log_plan_warnings};
use crate::discovery::discover_columns;
use crate::error::Result;
use crate::scan::{DataRow, DataRowScanner};
use crate::source::DataSource;
use crate::tokenizer::Tokenizer;

/// Reads every retained column as categories, stored column-major.
///
/// Codes follow first-seen order per column; missing markers become
/// [`MISSING_CATEGORY`].
pub fn read_discrete(source: &dyn DataSource, options: &ReaderOptions) -> Result<ReadOutcome> {
    let span = info_span!("read_discrete", file = source.name());
    let _guard = span.enter();

    let plan = discover_columns(source, options, ColumnType::Discrete)?;
    log_plan_warnings(source, &plan);
    let tokenizer = Tokenizer::from_options(options);
    let mut rejections = Rejections::new(source.name());
    let mut dictionaries = vec![CategoryDictionary::new(); plan.len()];
    let mut data: Vec<Vec<i32>> = vec![Vec::new(); plan.len()];
    let mut rows = 0usize;

    for row in DataRowScanner::open(source, &tokenizer, &plan)? {
        let row = row?;
        let DataRow::Complete { values, .. } = &row else {
            rejections.reject_row(row.shape_issue());
            continue;
        };
        for ((dictionary, codes), token) in dictionaries.iter_mut().zip(&mut data).zip(values) {
            let code = if options.is_missing(token) {
                MISSING_CATEGORY
            } else {
                dictionary.encode(token)
            };
            codes.push(code);
        }
        rows += 1;
    }

    info!(
        rows,
        columns = plan.len(),
        rejected = rejections.rows,
        "discrete dataset assembled"
    );
    let columns = plan
        .columns
        .into_iter()
        .zip(dictionaries)
        .map(|(column, categories)| DiscreteColumn { column, categories })
        .collect();
    Ok(rejections.finish(Dataset::VerticalDiscrete(VerticalDiscreteData {
        columns,
        data,
        rows,
    })))
}
