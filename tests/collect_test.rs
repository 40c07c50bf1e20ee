//! Integration tests for `relforge collect` command
//!
//! Collection is exercised against fabricated build outputs placed at
//! the toolchain's expected paths:
//! - One output file per matrix entry, named per convention
//! - Idempotent: re-collection yields identical contents
//! - Stale files from earlier runs never survive
//! - Missing artifacts are all reported, none silently dropped
//! - --checksums writes a SHA256SUMS covering every artifact

mod common;

use assert_fs::prelude::*;
use common::{run_relforge, TestProject};
use predicates::prelude::*;

fn setup_built_project() -> TestProject {
    let project = TestProject::new();
    project.write_manifest();
    project.fake_artifact("x86_64-unknown-linux-musl", "release", "proj", b"linux binary");
    project.fake_artifact("x86_64-pc-windows-gnu", "release", "proj.exe", b"windows binary");
    project
}

#[test]
fn test_collect_one_file_per_target() {
    let project = setup_built_project();

    let output = run_relforge(&project, &["collect"]);

    assert!(
        output.status.success(),
        "collect should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        project.dir_entries("dist"),
        vec!["proj-linux-amd64", "proj-windows-amd64.exe"]
    );
}

#[test]
fn test_collect_is_idempotent() {
    let project = setup_built_project();

    assert!(run_relforge(&project, &["collect"]).status.success());
    let first = project.read_file("dist/proj-linux-amd64");

    assert!(run_relforge(&project, &["collect"]).status.success());
    let second = project.read_file("dist/proj-linux-amd64");

    assert_eq!(first, second);
    assert_eq!(
        project.dir_entries("dist"),
        vec!["proj-linux-amd64", "proj-windows-amd64.exe"]
    );
}

#[test]
fn test_collect_removes_stale_files() {
    let project = setup_built_project();
    project.create_file("dist/proj-solaris-sparc", "stale artifact");

    assert!(run_relforge(&project, &["collect"]).status.success());

    assert_eq!(
        project.dir_entries("dist"),
        vec!["proj-linux-amd64", "proj-windows-amd64.exe"]
    );
}

#[test]
fn test_collect_reports_every_missing_artifact() {
    let project = TestProject::new();
    project.write_manifest();
    // Neither target has been built.

    let output = run_relforge(&project, &["collect"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    // Both mappings are attempted and both misses are reported.
    assert!(
        stderr.contains("x86_64-unknown-linux-musl"),
        "first miss reported: {stderr}"
    );
    assert!(
        stderr.contains("x86_64-pc-windows-gnu"),
        "second miss reported: {stderr}"
    );
}

#[test]
fn test_collect_partial_build_still_copies_present_artifacts() {
    let project = TestProject::new();
    project.write_manifest();
    project.fake_artifact("x86_64-pc-windows-gnu", "release", "proj.exe", b"windows binary");

    let output = run_relforge(&project, &["collect"]);

    // The run fails, but the present artifact was still collected for
    // inspection.
    assert!(!output.status.success());
    assert_eq!(
        project.dir_entries("dist"),
        vec!["proj-windows-amd64.exe"]
    );
}

#[test]
fn test_collect_writes_checksums_on_request() {
    let project = setup_built_project();

    let output = run_relforge(&project, &["collect", "--checksums"]);

    assert!(output.status.success());
    let sums = project.read_file("dist/SHA256SUMS");
    assert!(sums.contains("  proj-linux-amd64\n"));
    assert!(sums.contains("  proj-windows-amd64.exe\n"));
    assert_eq!(sums.lines().count(), 2);
}

#[test]
fn test_collect_dist_layout() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("relforge.toml")
        .write_str(common::SAMPLE_MANIFEST)
        .unwrap();
    temp.child("target/x86_64-unknown-linux-musl/release/proj")
        .write_binary(b"linux binary")
        .unwrap();
    temp.child("target/x86_64-pc-windows-gnu/release/proj.exe")
        .write_binary(b"windows binary")
        .unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_relforge"))
        .current_dir(temp.path())
        .arg("collect")
        .output()
        .expect("Failed to execute relforge");
    assert!(output.status.success());

    temp.child("dist/proj-linux-amd64")
        .assert(predicate::path::exists());
    temp.child("dist/proj-windows-amd64.exe")
        .assert(predicate::path::exists());
    // Checksums stay opt-in: the output directory holds exactly one
    // file per matrix entry.
    temp.child("dist/SHA256SUMS")
        .assert(predicate::path::missing());
}

#[test]
fn test_collect_honors_custom_dist_dir() {
    let project = TestProject::new();
    project.create_file(
        "relforge.toml",
        r#"
[project]
name = "proj"

[build]
dist-dir = "artifacts"

[[target]]
triple = "x86_64-unknown-linux-musl"
"#,
    );
    project.fake_artifact("x86_64-unknown-linux-musl", "release", "proj", b"binary");

    let output = run_relforge(&project, &["collect"]);

    assert!(output.status.success());
    assert_eq!(project.dir_entries("artifacts"), vec!["proj-linux-amd64"]);
    assert!(!project.file_exists("dist"));
}

#[test]
fn test_collect_honors_per_target_profile() {
    let project = TestProject::new();
    project.create_file(
        "relforge.toml",
        r#"
[project]
name = "proj"

[[target]]
triple = "x86_64-unknown-linux-musl"
profile = "dev"
"#,
    );
    // The dev profile writes to target/<triple>/debug/.
    project.fake_artifact("x86_64-unknown-linux-musl", "debug", "proj", b"debug binary");

    let output = run_relforge(&project, &["collect"]);

    assert!(
        output.status.success(),
        "collect should find the debug artifact: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(project.dir_entries("dist"), vec!["proj-linux-amd64"]);
}
