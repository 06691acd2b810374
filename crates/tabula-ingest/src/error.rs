//! Error types for data ingestion.

use thiserror::Error;

use tabula_model::ModelError;

/// Errors that abort a read.
///
/// Per-row problems in tabular files are not errors; they are reported in
/// [`ReadOutcome::issues`](crate::ReadOutcome) and the row is skipped.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to open or read the input.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input is not UTF-8 (UTF-16 byte-order mark or invalid byte sequence).
    #[error("{path} line {line}: unsupported encoding ({encoding}); input must be UTF-8")]
    UnsupportedEncoding {
        path: String,
        line: usize,
        encoding: &'static str,
    },

    // === Structure Errors ===
    /// No content line (everything blank or commented).
    #[error("no data found in {path}")]
    EmptyFile { path: String },

    /// No candidate delimiter split any sampled line.
    #[error("could not detect a delimiter in {path} ({sampled} lines sampled)")]
    DelimiterNotDetected { path: String, sampled: usize },

    // === Covariance Errors ===
    /// First covariance line is not a positive case count.
    #[error("{path} line {line}: invalid number of cases '{value}'")]
    InvalidCaseCount {
        path: String,
        line: usize,
        value: String,
    },

    /// Covariance file ends before the variable-name line.
    #[error("{path}: missing variable names line")]
    MissingVariableNames { path: String },

    /// A triangular row has the wrong number of values.
    #[error("{path} line {line}: expected {expected} values in matrix row {row} but found {actual}")]
    CovarianceRowLength {
        path: String,
        line: usize,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A matrix entry is not a finite number.
    #[error("{path} line {line}, column {column}: invalid number '{value}'")]
    InvalidCovarianceValue {
        path: String,
        line: usize,
        column: usize,
        value: String,
    },

    /// Covariance file ends before all triangular rows were read.
    #[error("{path}: expected {expected} matrix rows but found {actual}")]
    MissingCovarianceRows {
        path: String,
        expected: usize,
        actual: usize,
    },

    // === Model / DataFrame Errors ===
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    /// Maps an IO failure on `path`, keeping "not found" distinct.
    pub fn io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_string(),
            }
        } else {
            Self::FileRead {
                path: path.to_string(),
                source: err,
            }
        }
    }

    /// Maps a failure reading line `line`; invalid UTF-8 is an encoding error.
    pub fn line_read(path: &str, line: usize, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData {
            Self::UnsupportedEncoding {
                path: path.to_string(),
                line,
                encoding: "invalid UTF-8",
            }
        } else {
            Self::io(path, err)
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
