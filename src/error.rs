//! Error types for relforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest (relforge.toml) errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("No relforge.toml found at '{path}'. Run 'relforge init' to create one.")]
    NotFound { path: PathBuf },

    /// Manifest could not be read
    #[error("Failed to read manifest at '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Manifest parse error
    #[error("Failed to parse relforge.toml: {source}")]
    Parse {
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Target triple errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Triple string is not of the expected shape
    #[error("'{triple}' is not a valid target triple")]
    Malformed { triple: String },

    /// No recognizable operating system component
    #[error("Target '{triple}' has no recognizable operating system component")]
    UnknownOs { triple: String },

    /// Unsupported CPU architecture
    #[error("Target '{triple}' has unsupported architecture '{arch}'")]
    UnknownArch { triple: String, arch: String },
}

/// Build invocation errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// The build command exited with a non-zero status
    #[error("Build failed for '{triple}' (exit status {status})")]
    Failed { triple: String, status: i32 },

    /// The build command was killed by a signal
    #[error("Build for '{triple}' was terminated by a signal")]
    Terminated { triple: String },

    /// The build exceeded the configured timeout
    #[error("Build for '{triple}' exceeded the {secs}s timeout")]
    Timeout { triple: String, secs: u64 },

    /// The build command could not be spawned
    #[error("Failed to invoke '{command}': {error}")]
    Spawn { command: String, error: String },
}

/// Artifact collection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
    /// A build reported success but the binary is absent at its expected path
    #[error("Expected artifact for '{triple}' is missing at '{path}'")]
    MissingArtifact { triple: String, path: PathBuf },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to copy a file
    #[error("Failed to copy '{src_path}' to '{dest}': {error}")]
    CopyFile {
        src_path: PathBuf,
        dest: PathBuf,
        error: String,
    },

    /// Failed to write a file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read a file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level relforge error type
#[derive(Error, Debug)]
pub enum RelforgeError {
    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Target triple error
    #[error("Target error: {0}")]
    Target(#[from] TargetError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Collection error
    #[error("Collection error: {0}")]
    Collect(#[from] CollectError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// IO error
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_manifest_message_names_init() {
        let err = ManifestError::NotFound {
            path: PathBuf::from("/work/relforge.toml"),
        };
        let message = err.to_string();
        assert!(message.contains("/work/relforge.toml"));
        assert!(message.contains("relforge init"));
    }

    #[test]
    fn test_build_failure_message_carries_triple_and_status() {
        let err = BuildError::Failed {
            triple: "x86_64-pc-windows-gnu".to_string(),
            status: 101,
        };
        let message = err.to_string();
        assert!(message.contains("x86_64-pc-windows-gnu"));
        assert!(message.contains("101"));
    }

    #[test]
    fn test_missing_artifact_message_carries_path() {
        let err = CollectError::MissingArtifact {
            triple: "x86_64-unknown-linux-musl".to_string(),
            path: PathBuf::from("target/x86_64-unknown-linux-musl/release/proj"),
        };
        assert!(err.to_string().contains("release/proj"));
    }

    #[test]
    fn test_top_level_error_composes_domains() {
        let build: RelforgeError = BuildError::Timeout {
            triple: "x86_64-unknown-linux-musl".to_string(),
            secs: 900,
        }
        .into();
        assert!(build.to_string().starts_with("Build error:"));

        let target: RelforgeError = TargetError::UnknownOs {
            triple: "x86_64-unknown-freebsd".to_string(),
        }
        .into();
        assert!(target.to_string().starts_with("Target error:"));

        let fs: RelforgeError = FilesystemError::CreateDir {
            path: PathBuf::from("dist"),
            error: "denied".to_string(),
        }
        .into();
        assert!(fs.to_string().starts_with("Filesystem error:"));
    }
}
