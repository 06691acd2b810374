//! Exit status of the `tabula` binary.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;

fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn tabula_status(args: &[&str], file: &Path) -> Option<i32> {
    Command::new(env!("CARGO_BIN_EXE_tabula"))
        .args(args)
        .arg(file)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
        .status
        .code()
}

#[test]
fn single_column_file_has_no_detectable_delimiter() {
    let file = create_temp_file("a\n1\n2\n");
    assert_eq!(tabula_status(&["load", "--delimiter", "auto"], file.path()), Some(1));
    assert_eq!(tabula_status(&["validate", "--delimiter", "auto"], file.path()), Some(1));
    assert_eq!(tabula_status(&["sniff"], file.path()), Some(1));
}

#[test]
fn clean_file_validates_with_success() {
    let file = create_temp_file("a,b\n1,2\n3,4\n");
    assert_eq!(tabula_status(&["validate", "--delimiter", "auto"], file.path()), Some(0));
    assert_eq!(tabula_status(&["load", "--delimiter", "comma"], file.path()), Some(0));
}

#[test]
fn validation_errors_exit_with_one() {
    let file = create_temp_file("a,b\n1,x\n");
    assert_eq!(tabula_status(&["validate", "--delimiter", "comma"], file.path()), Some(1));
}

#[test]
fn unreadable_file_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    assert_eq!(tabula_status(&["load", "--delimiter", "comma"], &missing), Some(2));
    assert_eq!(tabula_status(&["load", "--delimiter", "auto"], &missing), Some(2));
}
