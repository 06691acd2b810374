//! Conditions found while scanning a file.
//!
//! Readers and the validator detect the same conditions with the same row
//! grammar; each [`Issue`] variant carries only the data it needs and turns
//! into a [`ValidationResult`] with a fixed level and kind.

use tabula_model::{AttributeKey, Level, MessageKind, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    // Input
    /// The input could not be opened or read.
    FileIo { message: String },
    /// No content line at all.
    EmptyFile,

    // Row shape
    /// More fields than the column count.
    ExcessData {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// Fewer fields than the column count.
    InsufficientData {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// The file ended before all expected rows (covariance block).
    MissingRows { expected: usize, actual: usize },

    // Cells
    /// Token in a continuous column is not a finite number.
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },
    /// Token matched a missing-value marker.
    MissingValue {
        line: usize,
        column: usize,
        value: String,
    },

    // Header
    /// A retained column repeats an earlier column's name.
    DuplicateColumnName {
        line: usize,
        column: usize,
        name: String,
    },
    /// A name exclusion matched no column.
    UnknownExcludedColumn { name: String },

    // Covariance
    /// First line is not a positive case count.
    InvalidCaseCount { line: usize, value: String },
    /// No variable-name line after the case count.
    MissingVariableNames,
}

impl Issue {
    pub fn kind(&self) -> MessageKind {
        match self {
            Issue::FileIo { .. } => MessageKind::FileIoError,
            Issue::EmptyFile => MessageKind::EmptyFile,
            Issue::ExcessData { .. } => MessageKind::ExcessData,
            Issue::InsufficientData { .. } | Issue::MissingRows { .. } => {
                MessageKind::InsufficientData
            }
            Issue::InvalidNumber { .. } => MessageKind::InvalidNumber,
            Issue::MissingValue { .. } => MessageKind::MissingValue,
            Issue::DuplicateColumnName { .. } => MessageKind::DuplicateColumnName,
            Issue::UnknownExcludedColumn { .. } => MessageKind::UnknownExcludedColumn,
            Issue::InvalidCaseCount { .. } => MessageKind::InvalidCaseCount,
            Issue::MissingVariableNames => MessageKind::MissingVariableNames,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Issue::MissingValue { .. } => Level::Info,
            Issue::DuplicateColumnName { .. } | Issue::UnknownExcludedColumn { .. } => {
                Level::Warning
            }
            _ => Level::Error,
        }
    }

    /// Line the issue points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Issue::ExcessData { line, .. }
            | Issue::InsufficientData { line, .. }
            | Issue::InvalidNumber { line, .. }
            | Issue::MissingValue { line, .. }
            | Issue::DuplicateColumnName { line, .. }
            | Issue::InvalidCaseCount { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::FileIo { message } => format!("Unable to read file: {message}"),
            Issue::EmptyFile => "File contains no data".to_string(),
            Issue::ExcessData {
                line,
                expected,
                actual,
            } => format!("Line {line}: excess data. Expected {expected} fields but found {actual}"),
            Issue::InsufficientData {
                line,
                expected,
                actual,
            } => format!(
                "Line {line}: insufficient data. Expected {expected} fields but found {actual}"
            ),
            Issue::MissingRows { expected, actual } => {
                format!("Insufficient data. Expected {expected} matrix rows but found {actual}")
            }
            Issue::InvalidNumber {
                line,
                column,
                value,
            } => format!("Line {line}, column {column}: invalid number '{value}'"),
            Issue::MissingValue {
                line,
                column,
                value,
            } => format!("Line {line}, column {column}: missing value '{value}'"),
            Issue::DuplicateColumnName { column, name, .. } => {
                format!("Column {column}: duplicate column name '{name}'")
            }
            Issue::UnknownExcludedColumn { name } => {
                format!("Excluded column '{name}' does not exist")
            }
            Issue::InvalidCaseCount { line, value } => {
                format!("Line {line}: invalid number of cases '{value}'")
            }
            Issue::MissingVariableNames => "Missing line of variable names".to_string(),
        }
    }

    /// The leveled record for this issue in file `file_name`.
    pub fn to_result(&self, file_name: &str) -> ValidationResult {
        let result = ValidationResult::new(self.level(), self.kind(), self.message())
            .with_attribute(AttributeKey::FileName, file_name);
        match self {
            Issue::FileIo { .. } | Issue::EmptyFile | Issue::MissingVariableNames => result,
            Issue::ExcessData {
                line,
                expected,
                actual,
            }
            | Issue::InsufficientData {
                line,
                expected,
                actual,
            } => result
                .with_attribute(AttributeKey::LineNumber, line)
                .with_attribute(AttributeKey::ExpectedCount, expected)
                .with_attribute(AttributeKey::ActualCount, actual),
            Issue::MissingRows { expected, actual } => result
                .with_attribute(AttributeKey::ExpectedCount, expected)
                .with_attribute(AttributeKey::ActualCount, actual),
            Issue::InvalidNumber {
                line,
                column,
                value,
            }
            | Issue::MissingValue {
                line,
                column,
                value,
            } => result
                .with_attribute(AttributeKey::LineNumber, line)
                .with_attribute(AttributeKey::ColumnNumber, column)
                .with_attribute(AttributeKey::Value, value),
            Issue::DuplicateColumnName { line, column, name } => result
                .with_attribute(AttributeKey::LineNumber, line)
                .with_attribute(AttributeKey::ColumnNumber, column)
                .with_attribute(AttributeKey::Value, name),
            Issue::UnknownExcludedColumn { name } => {
                result.with_attribute(AttributeKey::Value, name)
            }
            Issue::InvalidCaseCount { line, value } => result
                .with_attribute(AttributeKey::LineNumber, line)
                .with_attribute(AttributeKey::Value, value),
        }
    }
}
