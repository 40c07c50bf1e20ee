//! Default configuration values

/// Manifest file name
pub const MANIFEST_FILE: &str = "relforge.toml";

/// Default cargo profile for matrix entries
pub const DEFAULT_PROFILE: &str = "release";

/// Default output directory for collected artifacts
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default number of concurrent build jobs (sequential)
pub const DEFAULT_BUILD_JOBS: usize = 1;

/// Checksum manifest file name
pub const CHECKSUM_FILE: &str = "SHA256SUMS";
