//! Column plan entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type decided for a retained column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Continuous,
    Discrete,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => f.write_str("continuous"),
            Self::Discrete => f.write_str("discrete"),
        }
    }
}

/// One retained source column.
///
/// Excluded columns never become a `DataColumn`; membership in a plan is the
/// inclusion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Zero-based position in the source line.
    pub index: usize,
    pub name: String,
    pub column_type: ColumnType,
}

impl DataColumn {
    pub fn new(index: usize, name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            index,
            name: name.into(),
            column_type,
        }
    }

    /// One-based position, as reported in diagnostics.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_discrete(&self) -> bool {
        self.column_type == ColumnType::Discrete
    }
}

/// Placeholder name for the zero-based column `index` ("column 1", ...).
pub fn ordinal_name(index: usize) -> String {
    format!("column {}", index + 1)
}
