//! Leveled diagnostic records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of condition a [`ValidationResult`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    FileIoError,
    EmptyFile,
    ExcessData,
    InsufficientData,
    InvalidNumber,
    MissingValue,
    DuplicateColumnName,
    UnknownExcludedColumn,
    InvalidCaseCount,
    MissingVariableNames,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FileIoError => "FILE_IO_ERROR",
            Self::EmptyFile => "EMPTY_FILE",
            Self::ExcessData => "EXCESS_DATA",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::MissingValue => "MISSING_VALUE",
            Self::DuplicateColumnName => "DUPLICATE_COLUMN_NAME",
            Self::UnknownExcludedColumn => "UNKNOWN_EXCLUDED_COLUMN",
            Self::InvalidCaseCount => "INVALID_CASE_COUNT",
            Self::MissingVariableNames => "MISSING_VARIABLE_NAMES",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keys of the attribute map attached to each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKey {
    FileName,
    LineNumber,
    ColumnNumber,
    Value,
    ExpectedCount,
    ActualCount,
}

impl AttributeKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FileName => "FILE_NAME",
            Self::LineNumber => "LINE_NUMBER",
            Self::ColumnNumber => "COLUMN_NUMBER",
            Self::Value => "VALUE",
            Self::ExpectedCount => "EXPECTED_COUNT",
            Self::ActualCount => "ACTUAL_COUNT",
        }
    }
}

/// One diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub level: Level,
    pub kind: MessageKind,
    pub message: String,
    pub attributes: BTreeMap<AttributeKey, String>,
}

impl ValidationResult {
    pub fn new(level: Level, kind: MessageKind, message: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            message: message.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: AttributeKey, value: impl ToString) -> Self {
        self.attributes.insert(key, value.to_string());
        self
    }

    pub fn attribute(&self, key: AttributeKey) -> Option<&str> {
        self.attributes.get(&key).map(String::as_str)
    }

    /// Line number attribute parsed back to a number.
    pub fn line_number(&self) -> Option<usize> {
        self.attribute(AttributeKey::LineNumber)?.parse().ok()
    }
}

/// Results of one validation run, grouped by level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub infos: Vec<ValidationResult>,
    pub warnings: Vec<ValidationResult>,
    pub errors: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Infos, then warnings, then errors.
    pub fn results(&self) -> impl Iterator<Item = &ValidationResult> {
        self.infos
            .iter()
            .chain(self.warnings.iter())
            .chain(self.errors.iter())
    }

    pub fn len(&self) -> usize {
        self.infos.len() + self.warnings.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn count_of(&self, kind: MessageKind) -> usize {
        self.results().filter(|result| result.kind == kind).count()
    }
}

impl FromIterator<ValidationResult> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        let mut report = Self::default();
        for result in iter {
            match result.level {
                Level::Info => report.infos.push(result),
                Level::Warning => report.warnings.push(result),
                Level::Error => report.errors.push(result),
            }
        }
        report
    }
}
