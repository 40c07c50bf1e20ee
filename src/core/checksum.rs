//! SHA-256 checksum manifest for collected artifacts
//!
//! Release consumers verify downloads against a `SHA256SUMS` file in the
//! coreutils `sha256sum` format: `<hex digest>  <file name>`, one line
//! per artifact, in collection order.

use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::FilesystemError;

/// Hex-encoded SHA-256 digest of a file, streamed in chunks
pub fn sha256_file(path: &Path) -> Result<String, FilesystemError> {
    let file = std::fs::File::open(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut reader = std::io::BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|e| FilesystemError::ReadFile {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Render checksum lines in `sha256sum` format
pub fn render_checksums(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, digest) in entries {
        out.push_str(digest);
        out.push_str("  ");
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Write the SHA256SUMS file covering the named files in `dist_dir`
pub fn write_checksums(dist_dir: &Path, names: &[String]) -> Result<PathBuf, FilesystemError> {
    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let digest = sha256_file(&dist_dir.join(name))?;
        entries.push((name.clone(), digest));
    }

    let sums_path = dist_dir.join(defaults::CHECKSUM_FILE);
    std::fs::write(&sums_path, render_checksums(&entries)).map_err(|e| {
        FilesystemError::WriteFile {
            path: sums_path.clone(),
            error: e.to_string(),
        }
    })?;
    Ok(sums_path)
}
