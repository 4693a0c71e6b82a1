//! Integration tests for the header-lint CLI

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_header-lint"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_enable_reports_and_fails() {
    let output = binary()
        .args(["--enable", "header-main", "--no-color", "--format", "compact"])
        .arg(fixture("header_string_actions.hbs.json"))
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":1:12: error: header-main: Use of actions as Strings"));
}

#[test]
fn test_exit_zero() {
    let output = binary()
        .args(["--enable", "header-main", "--exit-zero", "--no-color"])
        .arg(fixture("header_operations.hbs.json"))
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 file processed: 2 errors"));
}

#[test]
fn test_json_output() {
    let output = binary()
        .args(["--enable", "header-main", "--format", "json"])
        .arg(fixture("header_operations.hbs.json"))
        .output()
        .expect("Failed to run command");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["error_count"], 2);
    assert_eq!(value["diagnostics"][1]["line"], 4);
}

#[test]
fn test_directory_argument() {
    let output = binary()
        .args(["--enable", "header-main", "--format", "compact"])
        .arg(fixture(""))
        .output()
        .expect("Failed to run command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_directory_skips_non_template_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name": "app", "version": "1.0.0"}"#,
    )
    .unwrap();
    std::fs::copy(
        fixture("header_operations.hbs.json"),
        dir.path().join("orders.hbs.json"),
    )
    .unwrap();

    let output = binary()
        .args(["--enable", "header-main", "--format", "json"])
        .arg(dir.path())
        .output()
        .expect("Failed to run command");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["files_processed"], 1);
    assert_eq!(value["summary"]["error_count"], 2);
}

#[test]
fn test_explicit_non_template_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let package = dir.path().join("package.json");
    std::fs::write(&package, r#"{"name": "app"}"#).unwrap();

    let output = binary()
        .args(["--enable", "header-main", "--format", "compact"])
        .arg(&package)
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parse-error"));
}

#[test]
fn test_invalid_config_value() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("header-lint.yaml");
    std::fs::write(&config, "rules:\n  header-main: \"yes\"\n").unwrap();

    let output = binary()
        .arg("--config")
        .arg(&config)
        .arg(fixture("header_operations.hbs.json"))
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("The header-main rule accepts a boolean value."));
    assert!(stderr.contains("You specified 'yes'"));
}

#[test]
fn test_list_and_explain() {
    let output = binary().args(["--list-rules"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("header-main"));

    let output = binary().args(["--explain", "header-main"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(incorrect)"));

    let output = binary().args(["--explain", "no-such-rule"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_no_files() {
    let output = binary().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No files specified"));
}
