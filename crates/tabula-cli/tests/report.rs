use tabula_cli::report::{report_counts, report_to_csv, report_to_json};
use tabula_ingest::MemorySource;
use tabula_model::{DataKind, ReaderOptions, ValidationOptions, ValidationReport};
use tabula_validate::Validator;

fn validate(name: &str, text: &str) -> ValidationReport {
    let mut validator = Validator::new(ValidationOptions::new(
        DataKind::Continuous,
        ReaderOptions::default(),
    ));
    validator.validate(&MemorySource::new(name, text)).clone()
}

#[test]
fn csv_report_lists_grouped_results() {
    let report = validate("data.csv", "a,b\n1,*\n2\nx,3\n");
    insta::assert_snapshot!(report_to_csv(&report).unwrap(), @r#"
    level,kind,file,line,column,value,expected,actual,message
    INFO,MISSING_VALUE,data.csv,2,2,*,,,"Line 2, column 2: missing value '*'"
    ERROR,INSUFFICIENT_DATA,data.csv,3,,,2,1,Line 3: insufficient data. Expected 2 fields but found 1
    ERROR,INVALID_NUMBER,data.csv,4,1,x,,,"Line 4, column 1: invalid number 'x'"
    "#);
    assert_eq!(report_counts(&report), "2 errors, 0 warnings, 1 info");
}

#[test]
fn json_report_for_empty_file() {
    let report = validate("empty.csv", "\n// nothing here\n");
    assert!(report_to_json(&report).unwrap().contains("\"EMPTY_FILE\""));
    insta::assert_json_snapshot!(report, @r#"
    {
      "infos": [],
      "warnings": [],
      "errors": [
        {
          "level": "ERROR",
          "kind": "EMPTY_FILE",
          "message": "File contains no data",
          "attributes": {
            "FILE_NAME": "empty.csv"
          }
        }
      ]
    }
    "#);
}

#[test]
fn clean_report_writes_no_csv() {
    let report = validate("ok.csv", "a\n1\n2\n");
    assert!(report.is_empty());
    assert_eq!(report_to_csv(&report).unwrap(), "");
}
