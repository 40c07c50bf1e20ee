//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up manifests and fake build outputs.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write the sample two-target manifest
    pub fn write_manifest(&self) {
        self.create_file("relforge.toml", SAMPLE_MANIFEST);
    }

    /// Place a fake built binary where the toolchain would have put it
    pub fn fake_artifact(&self, triple: &str, profile: &str, bin_name: &str, bytes: &[u8]) {
        let rel = format!("target/{triple}/{profile}/{bin_name}");
        let path = self.dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap())
            .expect("Failed to create target directories");
        std::fs::write(path, bytes).expect("Failed to write fake artifact");
    }

    /// Sorted file names under a directory of the test project
    pub fn dir_entries(&self, name: &str) -> Vec<String> {
        let dir: &Path = &self.dir.path().join(name);
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("Failed to read directory")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample manifest TOML for testing: the canonical two-target release
/// matrix (static Linux plus Windows).
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "proj"
version = "1.0.0"

[[target]]
triple = "x86_64-unknown-linux-musl"

[[target]]
triple = "x86_64-pc-windows-gnu"
"#;

/// Run the relforge binary with the given arguments in a project
#[allow(dead_code)]
pub fn run_relforge(project: &TestProject, args: &[&str]) -> std::process::Output {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_relforge"));
    cmd.current_dir(project.path());
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute relforge")
}
