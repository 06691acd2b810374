//! The four dataset shapes produced by the readers.
//!
//! A read yields exactly one [`Dataset`] variant. Consumers match on the
//! variant instead of downcasting.

use serde::{Deserialize, Serialize};

use crate::category::{CategoryDictionary, MISSING_CATEGORY};
use crate::column::DataColumn;
use crate::delimiter::DataKind;
use crate::error::{ModelError, Result};

/// Value stored for a continuous cell that matched a missing-value marker.
///
/// Serialized as `null` and read back as NaN.
pub const MISSING_CONTINUOUS: f64 = f64::NAN;

/// Serde adapters writing [`MISSING_CONTINUOUS`] as `null`.
mod missing_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MISSING_CONTINUOUS;

    fn encode(values: &[f64]) -> Vec<Option<f64>> {
        values
            .iter()
            .map(|value| (!value.is_nan()).then_some(*value))
            .collect()
    }

    fn decode(values: Vec<Option<f64>>) -> Vec<f64> {
        values
            .into_iter()
            .map(|value| value.unwrap_or(MISSING_CONTINUOUS))
            .collect()
    }

    /// `Vec<Vec<f64>>` matrices.
    pub mod rows {
        use super::{Deserialize, Deserializer, Serializer, decode, encode};

        pub fn serialize<S: Serializer>(
            rows: &[Vec<f64>],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(rows.iter().map(|row| encode(row)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Vec<f64>>, D::Error> {
            let rows = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
            Ok(rows.into_iter().map(decode).collect())
        }
    }

    /// Mixed-data stores, `None` for discrete columns.
    pub mod optional_columns {
        use super::{Deserialize, Deserializer, Serializer, decode, encode};

        pub fn serialize<S: Serializer>(
            columns: &[Option<Vec<f64>>],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(columns.iter().map(|column| column.as_deref().map(encode)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Option<Vec<f64>>>, D::Error> {
            let columns = Vec::<Option<Vec<Option<f64>>>>::deserialize(deserializer)?;
            Ok(columns
                .into_iter()
                .map(|column| column.map(decode))
                .collect())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Dataset {
    Continuous(ContinuousData),
    #[serde(rename = "discrete")]
    VerticalDiscrete(VerticalDiscreteData),
    Mixed(MixedData),
    Covariance(CovarianceData),
}

impl Dataset {
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Continuous(_) => DataKind::Continuous,
            Self::VerticalDiscrete(_) => DataKind::Discrete,
            Self::Mixed(_) => DataKind::Mixed,
            Self::Covariance(_) => DataKind::Covariance,
        }
    }

    /// Column or variable names in dataset order.
    pub fn column_names(&self) -> Vec<&str> {
        match self {
            Self::Continuous(data) => data.columns.iter().map(|c| c.name.as_str()).collect(),
            Self::VerticalDiscrete(data) => data
                .columns
                .iter()
                .map(|c| c.column.name.as_str())
                .collect(),
            Self::Mixed(data) => data.columns.iter().map(|c| c.name.as_str()).collect(),
            Self::Covariance(data) => data.variables.iter().map(String::as_str).collect(),
        }
    }

    pub fn num_columns(&self) -> usize {
        match self {
            Self::Continuous(data) => data.columns.len(),
            Self::VerticalDiscrete(data) => data.columns.len(),
            Self::Mixed(data) => data.columns.len(),
            Self::Covariance(data) => data.variables.len(),
        }
    }

    /// Data rows; for covariance data this is the matrix dimension.
    pub fn num_rows(&self) -> usize {
        match self {
            Self::Continuous(data) => data.num_rows(),
            Self::VerticalDiscrete(data) => data.rows,
            Self::Mixed(data) => data.rows,
            Self::Covariance(data) => data.variables.len(),
        }
    }
}

/// Dense numeric table, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousData {
    pub columns: Vec<DataColumn>,
    #[serde(with = "missing_as_null::rows")]
    pub data: Vec<Vec<f64>>,
}

impl ContinuousData {
    pub fn num_rows(&self) -> usize {
        self.data.len()
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(column)).copied()
    }

    /// True when the cell holds the missing sentinel.
    pub fn is_missing(&self, row: usize, column: usize) -> bool {
        self.value(row, column).is_some_and(f64::is_nan)
    }
}

/// A discrete column together with its category dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscreteColumn {
    pub column: DataColumn,
    pub categories: CategoryDictionary,
}

/// Category-encoded table stored column-major: `data[column][row]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerticalDiscreteData {
    pub columns: Vec<DiscreteColumn>,
    pub data: Vec<Vec<i32>>,
    pub rows: usize,
}

impl VerticalDiscreteData {
    pub fn code(&self, row: usize, column: usize) -> Option<i32> {
        self.data.get(column).and_then(|c| c.get(row)).copied()
    }

    /// Decoded category at a cell; `None` for missing cells.
    pub fn category(&self, row: usize, column: usize) -> Option<&str> {
        let code = self.code(row, column)?;
        if code == MISSING_CATEGORY {
            return None;
        }
        self.columns.get(column)?.categories.value_of(code)
    }
}

/// Table whose columns are each either continuous or discrete.
///
/// For column `i` exactly one of `continuous[i]` and `discrete[i]` is
/// populated, chosen by `columns[i].column_type`. `categories[i]` is present
/// for discrete columns only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixedData {
    pub columns: Vec<DataColumn>,
    pub categories: Vec<Option<CategoryDictionary>>,
    #[serde(with = "missing_as_null::optional_columns")]
    pub continuous: Vec<Option<Vec<f64>>>,
    pub discrete: Vec<Option<Vec<i32>>>,
    pub rows: usize,
}

impl MixedData {
    pub fn continuous_column(&self, column: usize) -> Option<&[f64]> {
        self.continuous.get(column)?.as_deref()
    }

    pub fn discrete_column(&self, column: usize) -> Option<&[i32]> {
        self.discrete.get(column)?.as_deref()
    }
}

/// Symmetric covariance matrix with its sample size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CovarianceData {
    pub variables: Vec<String>,
    pub cases: usize,
    #[serde(with = "missing_as_null::rows")]
    pub matrix: Vec<Vec<f64>>,
}

impl CovarianceData {
    /// Builds the full matrix from lower-triangular rows.
    ///
    /// Row `i` of `lower` must hold `i + 1` values (diagonal included); the
    /// upper triangle is mirrored from it.
    pub fn from_lower_triangle(
        variables: Vec<String>,
        cases: usize,
        lower: &[Vec<f64>],
    ) -> Result<Self> {
        let n = variables.len();
        if lower.len() != n {
            return Err(ModelError::CovarianceShape {
                expected: n,
                actual: lower.len(),
            });
        }
        let mut matrix = vec![vec![0.0; n]; n];
        for (i, row) in lower.iter().enumerate() {
            if row.len() != i + 1 {
                return Err(ModelError::CovarianceShape {
                    expected: i + 1,
                    actual: row.len(),
                });
            }
            for (j, value) in row.iter().enumerate() {
                matrix[i][j] = *value;
                matrix[j][i] = *value;
            }
        }
        Ok(Self {
            variables,
            cases,
            matrix,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.matrix.get(row).and_then(|r| r.get(column)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    #[test]
    fn lower_triangle_is_mirrored() {
        let lower = vec![vec![1.0], vec![0.5, 2.0], vec![0.1, 0.2, 3.0]];
        let cov = CovarianceData::from_lower_triangle(
            vec!["x".into(), "y".into(), "z".into()],
            100,
            &lower,
        )
        .unwrap();
        assert_eq!(cov.get(0, 1), Some(0.5));
        assert_eq!(cov.get(1, 0), Some(0.5));
        assert_eq!(cov.get(0, 2), Some(0.1));
        assert_eq!(cov.get(2, 2), Some(3.0));
        assert_eq!(cov.cases, 100);
    }

    #[test]
    fn short_triangle_row_is_rejected() {
        let lower = vec![vec![1.0], vec![0.5]];
        let err =
            CovarianceData::from_lower_triangle(vec!["x".into(), "y".into()], 5, &lower)
                .unwrap_err();
        assert!(matches!(
            err,
            ModelError::CovarianceShape {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn discrete_category_lookup_skips_missing() {
        let mut categories = CategoryDictionary::new();
        categories.encode("a");
        let data = VerticalDiscreteData {
            columns: vec![DiscreteColumn {
                column: DataColumn::new(0, "x", ColumnType::Discrete),
                categories,
            }],
            data: vec![vec![0, MISSING_CATEGORY]],
            rows: 2,
        };
        assert_eq!(data.category(0, 0), Some("a"));
        assert_eq!(data.category(1, 0), None);
        assert_eq!(Dataset::VerticalDiscrete(data).kind(), DataKind::Discrete);
    }

    #[test]
    fn missing_continuous_cells_survive_json() {
        let dataset = Dataset::Continuous(ContinuousData {
            columns: vec![DataColumn::new(0, "x", ColumnType::Continuous)],
            data: vec![vec![MISSING_CONTINUOUS], vec![2.5]],
        });
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.contains(r#""data":[[null],[2.5]]"#));

        let Dataset::Continuous(back) = serde_json::from_str(&json).unwrap() else {
            panic!("kind tag lost");
        };
        assert!(back.is_missing(0, 0));
        assert_eq!(back.value(1, 0), Some(2.5));
    }

    #[test]
    fn missing_mixed_and_covariance_cells_survive_json() {
        let mixed = MixedData {
            columns: vec![
                DataColumn::new(0, "x", ColumnType::Continuous),
                DataColumn::new(1, "g", ColumnType::Discrete),
            ],
            categories: vec![None, Some(CategoryDictionary::from_values(vec!["a".into()]))],
            continuous: vec![Some(vec![1.0, MISSING_CONTINUOUS]), None],
            discrete: vec![None, Some(vec![0, MISSING_CATEGORY])],
            rows: 2,
        };
        let back: MixedData =
            serde_json::from_str(&serde_json::to_string(&mixed).unwrap()).unwrap();
        let column = back.continuous_column(0).unwrap();
        assert_eq!(column[0], 1.0);
        assert!(column[1].is_nan());
        assert!(back.continuous_column(1).is_none());

        let cov = CovarianceData::from_lower_triangle(
            vec!["a".into(), "b".into()],
            4,
            &[vec![1.0], vec![MISSING_CONTINUOUS, 2.0]],
        )
        .unwrap();
        let back: CovarianceData =
            serde_json::from_str(&serde_json::to_string(&cov).unwrap()).unwrap();
        assert!(back.get(0, 1).is_some_and(f64::is_nan));
        assert_eq!(back.get(1, 1), Some(2.0));
    }
}
