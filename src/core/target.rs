//! Target triple parsing and artifact naming
//!
//! A target triple like `x86_64-unknown-linux-musl` identifies the
//! operating system, CPU architecture, and C runtime of one build. This
//! module parses triples into their OS/arch components and maps them to
//! the human-readable labels used in released file names
//! (`<project>-linux-amd64`, `<project>-windows-amd64.exe`, ...).
//!
//! Both full Rust triples (`x86_64-pc-windows-gnu`) and the vendor-less
//! shorthand (`x86_64-windows-gnu`) are accepted.

use std::fmt;

use crate::error::TargetError;

/// Operating system family of a build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    /// Linux (any libc)
    Linux,
    /// Windows (gnu or msvc runtime)
    Windows,
    /// `macOS`
    MacOs,
}

impl TargetOs {
    /// Label used in released artifact names
    pub fn label(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::MacOs => "macos",
        }
    }

    /// Executable suffix for binaries built for this OS
    pub fn exe_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Linux | Self::MacOs => "",
        }
    }
}

/// CPU architecture of a build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetArch {
    /// 64-bit x86
    X86_64,
    /// 64-bit ARM
    Aarch64,
    /// 32-bit x86
    I686,
    /// 32-bit ARM with VFP
    Armv7,
    /// 64-bit RISC-V
    Riscv64,
}

impl TargetArch {
    /// Label used in released artifact names
    pub fn label(self) -> &'static str {
        match self {
            Self::X86_64 => "amd64",
            Self::Aarch64 => "arm64",
            Self::I686 => "i386",
            Self::Armv7 => "armv7",
            Self::Riscv64 => "riscv64",
        }
    }
}

/// A parsed target triple
///
/// Keeps the raw string (what the toolchain is invoked with) alongside
/// the parsed OS and architecture used for artifact naming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetTriple {
    raw: String,
    os: TargetOs,
    arch: TargetArch,
}

impl TargetTriple {
    /// Parse a target triple string.
    ///
    /// The architecture is the first `-`-separated component; the OS is
    /// located by scanning the remaining components, so vendor fields
    /// (`unknown`, `pc`, `apple`) are optional.
    pub fn parse(triple: &str) -> Result<Self, TargetError> {
        let components: Vec<&str> = triple.split('-').collect();
        if components.len() < 2 || components.iter().any(|c| c.is_empty()) {
            return Err(TargetError::Malformed {
                triple: triple.to_string(),
            });
        }

        let arch = match components[0] {
            "x86_64" => TargetArch::X86_64,
            "aarch64" | "arm64" => TargetArch::Aarch64,
            "i686" => TargetArch::I686,
            "armv7" => TargetArch::Armv7,
            "riscv64" | "riscv64gc" => TargetArch::Riscv64,
            other => {
                return Err(TargetError::UnknownArch {
                    triple: triple.to_string(),
                    arch: other.to_string(),
                })
            }
        };

        let os = components[1..]
            .iter()
            .find_map(|component| match *component {
                "linux" => Some(TargetOs::Linux),
                "windows" => Some(TargetOs::Windows),
                "darwin" | "macos" => Some(TargetOs::MacOs),
                _ => None,
            })
            .ok_or_else(|| TargetError::UnknownOs {
                triple: triple.to_string(),
            })?;

        Ok(Self {
            raw: triple.to_string(),
            os,
            arch,
        })
    }

    /// The raw triple string, as passed to the toolchain
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Operating system family
    pub fn os(&self) -> TargetOs {
        self.os
    }

    /// CPU architecture
    pub fn arch(&self) -> TargetArch {
        self.arch
    }

    /// Released file name for a project built for this target.
    ///
    /// A pure function of (project, triple): the same inputs always yield
    /// the same name, regardless of build order or concurrency.
    pub fn artifact_name(&self, project: &str) -> String {
        format!(
            "{project}-{}-{}{}",
            self.os.label(),
            self.arch.label(),
            self.os.exe_suffix()
        )
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One entry of the build matrix: which project to build, for which
/// target, under which cargo profile.
///
/// Constructed once from the manifest and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Project identifier (cargo package and binary name)
    pub project: String,
    /// Parsed target triple
    pub triple: TargetTriple,
    /// Cargo profile name ("release", "dev", or a custom profile)
    pub profile: String,
}

impl BuildTarget {
    /// Create a build target
    pub fn new(project: &str, triple: TargetTriple, profile: &str) -> Self {
        Self {
            project: project.to_string(),
            triple,
            profile: profile.to_string(),
        }
    }

    /// Subdirectory under `target/<triple>/` where cargo places output
    /// for this profile. Cargo names the directory after the profile,
    /// except the `dev` profile which writes to `debug`.
    pub fn profile_dir(&self) -> &str {
        if self.profile == "dev" {
            "debug"
        } else {
            &self.profile
        }
    }
}
