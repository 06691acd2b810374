//! Integration tests for the tabular readers.

use std::io::Write;

use tabula_ingest::{
    FileSource, IngestError, MemorySource, read_continuous, read_dataset, read_discrete,
    read_mixed,
};
use tabula_model::{
    AttributeKey, ColumnExclusion, ColumnType, DataKind, Dataset, Delimiter, MISSING_CATEGORY,
    MessageKind, ReaderOptions,
};
use tempfile::NamedTempFile;

fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn tab_options() -> ReaderOptions {
    ReaderOptions::new(Delimiter::Tab)
}

#[test]
fn continuous_file_has_one_row_per_data_line() {
    let file = create_temp_file("x\ty\tz\n1.0\t2\t3\n4\t5.5\t6\n-1e2\t0\t7\n");
    let source = FileSource::new(file.path());
    let outcome = read_continuous(&source, &tab_options()).unwrap();

    assert!(outcome.is_clean());
    let Dataset::Continuous(data) = outcome.dataset else {
        panic!("expected continuous data");
    };
    assert_eq!(data.num_rows(), 3);
    assert_eq!(data.columns.len(), 3);
    assert_eq!(data.value(2, 0), Some(-100.0));
    assert_eq!(data.value(1, 1), Some(5.5));
}

#[test]
fn continuous_missing_marker_is_nan_not_zero() {
    let source = MemorySource::new("mem", "x,y\n1,*\n*,2\n");
    let outcome = read_continuous(&source, &ReaderOptions::default()).unwrap();
    let Dataset::Continuous(data) = outcome.dataset else {
        panic!("expected continuous data");
    };
    assert!(data.is_missing(0, 1));
    assert!(data.is_missing(1, 0));
    assert_eq!(data.value(1, 1), Some(2.0));
    assert!(outcome.issues.is_empty());
}

#[test]
fn malformed_rows_are_excluded_and_reported() {
    let text = "a,b,c\n1,2,3\n4,5\n6,7,8,9\n1,x,3\n10,11,12\n";
    let source = MemorySource::new("data.csv", text);
    let outcome = read_continuous(&source, &ReaderOptions::default()).unwrap();

    assert_eq!(outcome.dataset.num_rows(), 2);
    assert_eq!(outcome.rejected_rows, 3);
    let kinds: Vec<MessageKind> = outcome.issues.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MessageKind::InsufficientData,
            MessageKind::ExcessData,
            MessageKind::InvalidNumber
        ]
    );
    let invalid = &outcome.issues[2];
    assert_eq!(invalid.attribute(AttributeKey::LineNumber), Some("5"));
    assert_eq!(invalid.attribute(AttributeKey::ColumnNumber), Some("2"));
    assert_eq!(invalid.attribute(AttributeKey::Value), Some("x"));
    assert_eq!(invalid.attribute(AttributeKey::FileName), Some("data.csv"));
}

#[test]
fn exclusions_reduce_column_count() {
    let text = "a,b,c,d\n1,2,3,4\n5,6,7,8\n";
    let source = MemorySource::new("mem", text);

    let by_index = ReaderOptions::default()
        .with_excluded_columns(ColumnExclusion::indices([0, 3, 3, 17]));
    let outcome = read_continuous(&source, &by_index).unwrap();
    assert_eq!(outcome.dataset.column_names(), vec!["b", "c"]);

    let by_name = ReaderOptions::default().with_excluded_columns(ColumnExclusion::names(["c"]));
    let outcome = read_continuous(&source, &by_name).unwrap();
    assert_eq!(outcome.dataset.column_names(), vec!["a", "b", "d"]);
    let Dataset::Continuous(data) = outcome.dataset else {
        panic!("expected continuous data");
    };
    assert_eq!(data.data[1], vec![5.0, 6.0, 8.0]);
}

#[test]
fn excluded_column_values_are_never_parsed() {
    let source = MemorySource::new("mem", "id,x\nabc,1\ndef,2\n");
    let options = ReaderOptions::default().with_excluded_columns(ColumnExclusion::names(["id"]));
    let outcome = read_continuous(&source, &options).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.dataset.num_rows(), 2);
}

#[test]
fn headerless_file_uses_ordinal_names() {
    let source = MemorySource::new("mem", "1 2\n3 4\n");
    let options = ReaderOptions::new(Delimiter::Whitespace).with_header(false);
    let outcome = read_continuous(&source, &options).unwrap();
    assert_eq!(outcome.dataset.column_names(), vec!["column 1", "column 2"]);
    assert_eq!(outcome.dataset.num_rows(), 2);
}

#[test]
fn discrete_codes_follow_first_encounter_order() {
    let text = "color,size\nred,S\nblue,L\nred,*\ngreen,S\n";
    let source = MemorySource::new("mem", text);
    let outcome = read_discrete(&source, &ReaderOptions::default()).unwrap();
    let Dataset::VerticalDiscrete(data) = outcome.dataset else {
        panic!("expected discrete data");
    };
    assert_eq!(data.rows, 4);
    assert_eq!(data.data[0], vec![0, 1, 0, 2]);
    assert_eq!(data.data[1], vec![0, 1, MISSING_CATEGORY, 0]);
    assert_eq!(data.columns[0].categories.values(), &["red", "blue", "green"]);
    assert_eq!(data.category(3, 0), Some("green"));
    assert_eq!(data.category(2, 1), None);
}

#[test]
fn discrete_codes_are_stable_across_reads() {
    let file = create_temp_file("g\nb\na\nc\na\n");
    let source = FileSource::new(file.path());
    let first = read_discrete(&source, &ReaderOptions::default()).unwrap();
    let second = read_discrete(&source, &ReaderOptions::default()).unwrap();
    let (Dataset::VerticalDiscrete(a), Dataset::VerticalDiscrete(b)) =
        (first.dataset, second.dataset)
    else {
        panic!("expected discrete data");
    };
    assert_eq!(a.data, b.data);
    assert_eq!(a.columns[0].categories, b.columns[0].categories);
}

#[test]
fn mixed_columns_route_to_their_store() {
    let text = "x,g\n1.5,a\n2.5,b\n3.5,a\n4.5,*\n";
    let source = MemorySource::new("mem", text);
    let options = ReaderOptions::default().with_category_threshold(3);
    let outcome = read_mixed(&source, &options).unwrap();
    let Dataset::Mixed(data) = outcome.dataset else {
        panic!("expected mixed data");
    };
    assert_eq!(data.rows, 4);
    assert_eq!(data.columns[0].column_type, ColumnType::Continuous);
    assert_eq!(data.columns[1].column_type, ColumnType::Discrete);
    assert_eq!(data.continuous_column(0), Some(&[1.5, 2.5, 3.5, 4.5][..]));
    assert!(data.discrete_column(0).is_none());
    assert!(data.continuous_column(1).is_none());
    assert_eq!(data.discrete_column(1), Some(&[0, 1, 0, MISSING_CATEGORY][..]));
    assert!(data.categories[0].is_none());
}

#[test]
fn mixed_threshold_boundary() {
    // Three distinct values plus missing markers.
    let text = "v\n1\n2\n3\n*\n1\n";
    let source = MemorySource::new("mem", text);

    let at = read_mixed(&source, &ReaderOptions::default().with_category_threshold(3)).unwrap();
    let Dataset::Mixed(data) = at.dataset else {
        panic!("expected mixed data");
    };
    assert_eq!(data.columns[0].column_type, ColumnType::Discrete);

    let below = read_mixed(&source, &ReaderOptions::default().with_category_threshold(2)).unwrap();
    let Dataset::Mixed(data) = below.dataset else {
        panic!("expected mixed data");
    };
    assert_eq!(data.columns[0].column_type, ColumnType::Continuous);
}

#[test]
fn mixed_rejected_row_adds_no_categories() {
    let text = "x,g\n1,a\n2,b\n3,a\n4,b\nbad,c\n";
    let source = MemorySource::new("mem", text);
    let options = ReaderOptions::default().with_category_threshold(3);
    let outcome = read_mixed(&source, &options).unwrap();
    assert_eq!(outcome.rejected_rows, 1);
    let Dataset::Mixed(data) = outcome.dataset else {
        panic!("expected mixed data");
    };
    assert_eq!(data.rows, 4);
    assert_eq!(data.columns[0].column_type, ColumnType::Continuous);
    assert_eq!(data.columns[1].column_type, ColumnType::Discrete);
    let categories = data.categories[1].as_ref().unwrap();
    assert_eq!(categories.values(), &["a", "b"]);
}

#[test]
fn read_dataset_dispatches_on_kind() {
    let source = MemorySource::new("mem", "a,b\n1,2\n");
    let outcome = read_dataset(&source, DataKind::Discrete, &ReaderOptions::default()).unwrap();
    assert_eq!(outcome.dataset.kind(), DataKind::Discrete);
}

#[test]
fn missing_file_is_fatal() {
    let source = FileSource::new("/definitely/not/here.txt");
    let err = read_continuous(&source, &ReaderOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn quoted_header_and_values_are_stripped() {
    let source = MemorySource::new("mem", "\"a\",\"b\"\n\"1\",\"2\"\n");
    let outcome = read_continuous(&source, &ReaderOptions::default()).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.dataset.column_names(), vec!["a", "b"]);
}

#[test]
fn utf16_input_is_rejected_by_byte_order_mark() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "a,b\n1,2\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let source = MemorySource::new("wide.csv", bytes);
    let err = read_continuous(&source, &ReaderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedEncoding {
            line: 1,
            encoding: "UTF-16 LE",
            ..
        }
    ));
}

#[test]
fn latin1_bytes_name_the_offending_line() {
    let mut bytes = b"name,x\nabc,1\n".to_vec();
    bytes.extend_from_slice(b"caf\xe9,2\n");
    let source = MemorySource::new("latin1.csv", bytes);
    let err = read_discrete(&source, &ReaderOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedEncoding { line: 3, .. }));
    assert!(err.to_string().starts_with("latin1.csv line 3: unsupported encoding"));
}
