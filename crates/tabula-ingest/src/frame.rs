//! Export of datasets to Polars DataFrames.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use tabula_model::{CategoryDictionary, Dataset, MISSING_CATEGORY};

use crate::error::Result;

/// Converts any dataset variant to a DataFrame.
///
/// Continuous values become `Float64` columns and discrete codes are decoded
/// to `String` columns; missing sentinels become nulls. A covariance matrix
/// becomes one `Float64` column per variable. Duplicate column names are
/// rejected by Polars.
pub fn to_dataframe(dataset: &Dataset) -> Result<DataFrame> {
    let columns: Vec<Column> = match dataset {
        Dataset::Continuous(data) => data
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| float_column(&column.name, data.data.iter().map(|row| row[idx])))
            .collect(),
        Dataset::VerticalDiscrete(data) => data
            .columns
            .iter()
            .zip(&data.data)
            .map(|(column, codes)| category_column(&column.column.name, codes, &column.categories))
            .collect(),
        Dataset::Mixed(data) => data
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                match (
                    &data.continuous[idx],
                    &data.discrete[idx],
                    &data.categories[idx],
                ) {
                    (Some(values), _, _) => float_column(&column.name, values.iter().copied()),
                    (None, Some(codes), Some(categories)) => {
                        category_column(&column.name, codes, categories)
                    }
                    _ => Series::new_null(column.name.as_str().into(), data.rows).into_column(),
                }
            })
            .collect(),
        Dataset::Covariance(data) => data
            .variables
            .iter()
            .enumerate()
            .map(|(idx, name)| float_column(name, data.matrix.iter().map(|row| row[idx])))
            .collect(),
    };
    Ok(DataFrame::new(columns)?)
}

fn float_column(name: &str, values: impl Iterator<Item = f64>) -> Column {
    let values: Vec<Option<f64>> = values
        .map(|value| (!value.is_nan()).then_some(value))
        .collect();
    Series::new(name.into(), values).into_column()
}

fn category_column(name: &str, codes: &[i32], categories: &CategoryDictionary) -> Column {
    let values: Vec<Option<&str>> = codes
        .iter()
        .map(|&code| {
            if code == MISSING_CATEGORY {
                None
            } else {
                categories.value_of(code)
            }
        })
        .collect();
    Series::new(name.into(), values).into_column()
}
