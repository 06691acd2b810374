//! Tabular previews of assembled datasets.

use comfy_table::{Cell, CellAlignment, Table};

use tabula_ingest::DelimiterScore;
use tabula_model::{ColumnType, Dataset, Delimiter, MISSING_CATEGORY};

use crate::report::{align_column, apply_table_style, dim_cell, header_cell};

/// Display text of the first `limit` rows; `None` marks a missing cell.
///
/// Covariance matrices preview one row per variable.
pub fn preview_rows(dataset: &Dataset, limit: usize) -> Vec<Vec<Option<String>>> {
    (0..dataset.num_rows().min(limit))
        .map(|row| {
            (0..dataset.num_columns())
                .map(|column| cell_text(dataset, row, column))
                .collect()
        })
        .collect()
}

fn cell_text(dataset: &Dataset, row: usize, column: usize) -> Option<String> {
    match dataset {
        Dataset::Continuous(data) => data.value(row, column).and_then(format_value),
        Dataset::VerticalDiscrete(data) => data.category(row, column).map(str::to_string),
        Dataset::Mixed(data) => match data.columns.get(column)?.column_type {
            ColumnType::Continuous => data
                .continuous_column(column)?
                .get(row)
                .copied()
                .and_then(format_value),
            ColumnType::Discrete => {
                let code = *data.discrete_column(column)?.get(row)?;
                if code == MISSING_CATEGORY {
                    return None;
                }
                data.categories
                    .get(column)?
                    .as_ref()?
                    .value_of(code)
                    .map(str::to_string)
            }
        },
        Dataset::Covariance(data) => data.get(row, column).and_then(format_value),
    }
}

fn format_value(value: f64) -> Option<String> {
    (!value.is_nan()).then(|| value.to_string())
}

pub fn dataset_table(dataset: &Dataset, limit: usize) -> Table {
    let mut table = Table::new();
    let mut header = Vec::new();
    if matches!(dataset, Dataset::Covariance(_)) {
        header.push(header_cell(""));
    }
    header.extend(dataset.column_names().into_iter().map(header_cell));
    table.set_header(header);
    apply_table_style(&mut table);

    let names = dataset.column_names();
    for (row, values) in preview_rows(dataset, limit).into_iter().enumerate() {
        let mut cells = Vec::with_capacity(values.len() + 1);
        if matches!(dataset, Dataset::Covariance(_)) {
            cells.push(header_cell(names.get(row).copied().unwrap_or_default()));
        }
        cells.extend(values.into_iter().map(|value| match value {
            Some(text) => Cell::new(text),
            None => dim_cell("-"),
        }));
        table.add_row(cells);
    }
    table
}

/// Per-delimiter scores, best candidate first.
pub fn score_table(scores: &[DelimiterScore], chosen: Option<Delimiter>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Delimiter"),
        header_cell("Fields"),
        header_cell("Deviating lines"),
        header_cell("Max fields"),
        header_cell("Chosen"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for score in scores {
        let chosen_cell = if Some(score.delimiter) == chosen {
            Cell::new("yes")
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(score.delimiter.label()),
            Cell::new(score.modal_count),
            Cell::new(score.deviating_lines),
            Cell::new(score.max_count),
            chosen_cell,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_ingest::{MemorySource, read_dataset};
    use tabula_model::{DataKind, ReaderOptions};

    fn load(kind: DataKind, text: &str) -> Dataset {
        read_dataset(&MemorySource::new("t", text), kind, &ReaderOptions::default())
            .unwrap()
            .dataset
    }

    #[test]
    fn continuous_missing_is_none() {
        let dataset = load(DataKind::Continuous, "a,b\n1,*\n2.5,3\n");
        assert_eq!(
            preview_rows(&dataset, 10),
            vec![
                vec![Some("1".to_string()), None],
                vec![Some("2.5".to_string()), Some("3".to_string())],
            ]
        );
    }

    #[test]
    fn discrete_shows_categories() {
        let dataset = load(DataKind::Discrete, "g\nred\n*\nblue\n");
        let rows = preview_rows(&dataset, 2);
        assert_eq!(rows, vec![vec![Some("red".to_string())], vec![None]]);
    }

    #[test]
    fn covariance_rows_are_variables() {
        let reader = ReaderOptions::new(Delimiter::Whitespace);
        let dataset = read_dataset(
            &MemorySource::new("c", "5\nx y\n1\n0.5 2\n"),
            DataKind::Covariance,
            &reader,
        )
        .unwrap()
        .dataset;
        let rows = preview_rows(&dataset, 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], Some("0.5".to_string()));
    }
}
