//! Doctor command logic
//!
//! Checks the cross-compilation toolchain and reports issues with
//! suggestions: is cargo available, is rustup available, and is the
//! standard library installed for every matrix target.

use std::process::Command;

/// Result of a single toolchain check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Check if all required checks passed
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Count failed checks
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// Check if a command is available and extract its version
pub fn check_command_available(command: &str) -> Option<String> {
    Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let combined = format!("{stdout}{stderr}");
                extract_version(&combined)
            } else {
                None
            }
        })
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check cargo availability
pub fn check_cargo() -> CheckResult {
    match check_command_available("cargo") {
        Some(version) => CheckResult::pass("cargo", Some(version), true),
        None => CheckResult::fail(
            "cargo",
            "cargo not found in PATH",
            Some("Install Rust via https://rustup.rs"),
            true,
        ),
    }
}

/// Check rustup availability
pub fn check_rustup() -> CheckResult {
    match check_command_available("rustup") {
        Some(version) => CheckResult::pass("rustup", Some(version), false),
        None => CheckResult::fail(
            "rustup",
            "rustup not found in PATH",
            Some("Install rustup to manage cross-compilation targets"),
            false,
        ),
    }
}

/// List the target triples rustup has the standard library installed for.
///
/// Returns `None` when rustup is unavailable, in which case per-target
/// checks cannot be performed.
pub fn installed_rustup_targets() -> Option<Vec<String>> {
    if which::which("rustup").is_err() {
        return None;
    }
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
    )
}

/// Check whether one matrix triple is installed
pub fn check_matrix_target(triple: &str, installed: &[String]) -> CheckResult {
    if installed.iter().any(|t| t == triple) {
        CheckResult::pass(&format!("target {triple}"), None, false)
    } else {
        CheckResult::fail(
            &format!("target {triple}"),
            "standard library not installed",
            Some(&format!("Run 'rustup target add {triple}'")),
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version_from_cargo_output() {
        assert_eq!(
            extract_version("cargo 1.82.0 (8f40fc59f 2024-08-21)"),
            Some("1.82.0".to_string())
        );
    }

    #[test]
    fn test_extract_version_with_prefix() {
        assert_eq!(extract_version("tool v2.5"), Some("2.5".to_string()));
    }

    #[test]
    fn test_extract_version_none_for_garbage() {
        assert_eq!(extract_version("no numbers here"), None);
    }

    #[test]
    fn test_check_matrix_target_installed() {
        let installed = vec![
            "x86_64-unknown-linux-gnu".to_string(),
            "x86_64-unknown-linux-musl".to_string(),
        ];
        let result = check_matrix_target("x86_64-unknown-linux-musl", &installed);
        assert!(result.passed);
    }

    #[test]
    fn test_check_matrix_target_missing_suggests_rustup() {
        let installed = vec!["x86_64-unknown-linux-gnu".to_string()];
        let result = check_matrix_target("x86_64-pc-windows-gnu", &installed);
        assert!(!result.passed);
        assert!(result
            .suggestion
            .unwrap()
            .contains("rustup target add x86_64-pc-windows-gnu"));
    }

    #[test]
    fn test_report_counts() {
        let mut report = DoctorReport::new();
        report.add_check(CheckResult::pass("a", None, true));
        report.add_check(CheckResult::fail("b", "broken", None, false));

        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.all_required_passed());
    }

    #[test]
    fn test_report_required_failure() {
        let mut report = DoctorReport::new();
        report.add_check(CheckResult::fail("cargo", "missing", None, true));
        assert!(!report.all_required_passed());
    }
}
