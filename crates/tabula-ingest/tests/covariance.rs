//! Integration tests for covariance files.

use tabula_ingest::{IngestError, MemorySource, read_covariance, read_covariance_matrix};
use tabula_model::{Dataset, Delimiter, ReaderOptions};

fn options() -> ReaderOptions {
    ReaderOptions::new(Delimiter::Whitespace)
}

#[test]
fn matrix_is_symmetric_with_case_count() {
    let text = "// sample covariance\n250\nx1 x2 x3\n1.0\n0.3 2.0\n\n-0.2 0.4 3.0\n";
    let source = MemorySource::new("cov.txt", text);
    let cov = read_covariance_matrix(&source, &options()).unwrap();

    assert_eq!(cov.cases, 250);
    assert_eq!(cov.variables, vec!["x1", "x2", "x3"]);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(cov.matrix[i][j], cov.matrix[j][i]);
        }
    }
    assert_eq!(cov.get(2, 0), Some(-0.2));
    assert_eq!(cov.get(0, 2), Some(-0.2));
    assert_eq!(cov.get(1, 1), Some(2.0));
}

#[test]
fn read_covariance_wraps_dataset() {
    let source = MemorySource::new("cov.txt", "10\na b\n1\n0.5 1\n");
    let outcome = read_covariance(&source, &options()).unwrap();
    let Dataset::Covariance(cov) = outcome.dataset else {
        panic!("expected covariance data");
    };
    assert_eq!(cov.num_variables(), 2);
    assert!(outcome.issues.is_empty());
}

#[test]
fn zero_cases_is_rejected() {
    let source = MemorySource::new("cov.txt", "0\na\n1\n");
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCaseCount { line: 1, .. }));
}

#[test]
fn non_numeric_cases_is_rejected() {
    let source = MemorySource::new("cov.txt", "many\na\n1\n");
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCaseCount { ref value, .. } if value == "many"));
}

#[test]
fn triangular_row_length_mismatch_is_fatal() {
    let source = MemorySource::new("cov.txt", "10\na b\n1\n0.5 1 9\n");
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::CovarianceRowLength {
            line: 4,
            row: 2,
            expected: 2,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn truncated_matrix_is_fatal() {
    let source = MemorySource::new("cov.txt", "10\na b c\n1\n0.5 1\n");
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingCovarianceRows {
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn missing_names_line_is_fatal() {
    let source = MemorySource::new("cov.txt", "10\n");
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(err, IngestError::MissingVariableNames { .. }));
}

#[test]
fn invalid_entry_is_fatal() {
    let source = MemorySource::new("cov.txt", "10\na b\n1\nx 1\n");
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::InvalidCovarianceValue { line: 4, column: 1, .. }
    ));
}

#[test]
fn missing_marker_entry_is_nan() {
    let source = MemorySource::new("cov.txt", "10\na b\n1\n* 1\n");
    let cov = read_covariance_matrix(&source, &options()).unwrap();
    assert!(cov.get(1, 0).unwrap().is_nan());
    assert!(cov.get(0, 1).unwrap().is_nan());
    assert_eq!(cov.get(1, 1), Some(1.0));
}

#[test]
fn unreadable_trailing_line_is_an_error() {
    let mut bytes = b"10\na b\n1\n0.5 1\nnote: \n".to_vec();
    bytes.extend_from_slice(b"caf\xe9\n");
    let source = MemorySource::new("cov.txt", bytes);
    let err = read_covariance_matrix(&source, &options()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedEncoding { line: 6, .. }
    ));
}

#[test]
fn readable_trailing_lines_are_ignored() {
    let source = MemorySource::new("cov.txt", "10\na b\n1\n0.5 1\nextra line\n1 2 3\n");
    let cov = read_covariance_matrix(&source, &options()).unwrap();
    assert_eq!(cov.num_variables(), 2);
}
