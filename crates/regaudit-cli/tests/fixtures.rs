//! End-to-end CLI tests against `tests/fixtures/`.
//!
//! Each fixture contains:
//! - `evidence.json` (regaudit.evidence.v1)
//! - `regaudit.toml`
//! - `expected.report.json`, compared after normalizing timestamps and tool version

use assert_cmd::Command;
use regaudit_test_util::normalize_nondeterministic;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn regaudit_cmd() -> Command {
    Command::cargo_bin("regaudit").expect("regaudit binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("regaudit-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

/// Audit `chemistry` with the fixture's config and evidence; returns exit code and report.
fn run_audit_on_fixture(fixture_name: &str) -> (i32, Value) {
    let fixture_path = fixtures_dir().join(fixture_name);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = regaudit_cmd()
        .arg("--config")
        .arg(fixture_path.join("regaudit.toml"))
        .arg("audit")
        .arg("--department")
        .arg("chemistry")
        .arg("--evidence")
        .arg(fixture_path.join("evidence.json"))
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("Failed to run command");

    let exit_code = output.status.code().unwrap_or(-1);
    let content = std::fs::read_to_string(&report_path).expect("Failed to read report");
    let report: Value = serde_json::from_str(&content).expect("Failed to parse report JSON");

    (exit_code, report)
}

fn load_expected_report(fixture_name: &str) -> Value {
    let path = fixtures_dir()
        .join(fixture_name)
        .join("expected.report.json");
    let content = std::fs::read_to_string(&path).expect("Failed to read expected report");
    serde_json::from_str(&content).expect("Failed to parse expected report")
}

fn assert_reports_match(actual: Value, expected: Value, fixture_name: &str) {
    let actual = normalize_nondeterministic(actual);
    let expected = normalize_nondeterministic(expected);

    assert_eq!(
        actual,
        expected,
        "Report mismatch for fixture '{}'.\n\nActual:\n{}\n\nExpected:\n{}",
        fixture_name,
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[test]
fn fixture_partial_fails_below_threshold() {
    let (exit_code, report) = run_audit_on_fixture("audit_partial");
    assert_eq!(exit_code, 2, "75% under the standard profile should exit 2");
    assert_reports_match(report, load_expected_report("audit_partial"), "audit_partial");
}

#[test]
fn fixture_clean_passes_strict() {
    let (exit_code, report) = run_audit_on_fixture("audit_clean");
    assert_eq!(exit_code, 0, "fully compliant audit should exit 0");
    assert_reports_match(report, load_expected_report("audit_clean"), "audit_clean");
}

#[test]
fn every_fixture_has_expected_report() {
    for entry in std::fs::read_dir(fixtures_dir()).expect("read fixtures dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            assert!(
                path.join("expected.report.json").exists(),
                "fixture {} has no expected.report.json",
                path.display()
            );
            assert!(path.join("evidence.json").exists());
        }
    }
}
