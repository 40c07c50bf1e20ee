//! Integration tests for `relforge doctor` command
//!
//! - Reports cargo and rustup status
//! - Reports per-matrix-target standard library status when a manifest
//!   is present

mod common;

use common::{run_relforge, TestProject};

#[test]
fn test_doctor_reports_cargo() {
    let project = TestProject::new();

    let output = run_relforge(&project, &["doctor"]);

    // cargo is present wherever the test suite runs.
    assert!(
        output.status.success(),
        "doctor should pass where cargo exists: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cargo"));
}

#[test]
fn test_doctor_works_without_manifest() {
    let project = TestProject::new();

    let output = run_relforge(&project, &["doctor"]);

    // Toolchain checks run even outside a relforge project.
    assert!(output.status.success());
}

#[test]
fn test_doctor_mentions_matrix_targets_with_manifest() {
    let project = TestProject::new();
    project.write_manifest();

    let output = run_relforge(&project, &["doctor"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    // With rustup available the matrix targets are listed; without it
    // only the base checks appear. Either way the summary line prints.
    assert!(
        stdout.contains("checks passed"),
        "summary expected: {stdout}"
    );
}
