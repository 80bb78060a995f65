//! Host platform detection for BDY CLI downloads.
//!
//! Maps the runner's OS and CPU architecture onto the closed set of published
//! binaries and derives the archive name parts used in the download URL.

use crate::error::PlatformError;
use serde::Serialize;
use std::fmt;

/// Operating systems with published BDY binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedPlatform {
    /// Linux
    Linux,
    /// macOS
    Darwin,
    /// Windows
    Win32,
}

impl SupportedPlatform {
    /// Platform name as used in error messages
    pub fn as_str(self) -> &'static str {
        match self {
            SupportedPlatform::Linux => "linux",
            SupportedPlatform::Darwin => "darwin",
            SupportedPlatform::Win32 => "win32",
        }
    }

    /// Label used as the first half of the download prefix
    pub fn download_label(self) -> &'static str {
        match self {
            SupportedPlatform::Win32 => "win",
            other => other.as_str(),
        }
    }

    /// Archive extension of the published binary
    pub fn file_extension(self) -> &'static str {
        match self {
            SupportedPlatform::Win32 => ".zip",
            _ => ".tar.gz",
        }
    }

    /// Accepts both Rust (`macos`, `windows`) and Node (`darwin`, `win32`) names.
    fn from_os_name(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(SupportedPlatform::Linux),
            "darwin" | "macos" => Some(SupportedPlatform::Darwin),
            "win32" | "windows" => Some(SupportedPlatform::Win32),
            _ => None,
        }
    }
}

impl fmt::Display for SupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architectures with published BDY binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedArchitecture {
    /// x86_64
    X64,
    /// aarch64
    Arm64,
}

impl SupportedArchitecture {
    /// Architecture name as used in download prefixes
    pub fn as_str(self) -> &'static str {
        match self {
            SupportedArchitecture::X64 => "x64",
            SupportedArchitecture::Arm64 => "arm64",
        }
    }

    fn from_arch_name(arch: &str) -> Option<Self> {
        match arch {
            "x64" | "x86_64" | "amd64" => Some(SupportedArchitecture::X64),
            "arm64" | "aarch64" => Some(SupportedArchitecture::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for SupportedArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OS and architecture names as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    /// OS name, e.g. `linux` or `macos`
    pub os: String,
    /// Architecture name, e.g. `x86_64` or `aarch64`
    pub arch: String,
}

impl HostTarget {
    /// Build from explicit names
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary is running on.
    ///
    /// Uses `std::env::consts` so the answer reflects the running binary,
    /// not the machine it was built on.
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}

/// Resolved download descriptor for the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    /// Operating system
    pub platform: SupportedPlatform,
    /// CPU architecture
    pub architecture: SupportedArchitecture,
    /// `{label}-{arch}`, e.g. `linux-x64` or `win-x64`
    pub download_prefix: String,
    /// `.zip` on Windows, `.tar.gz` elsewhere
    pub file_extension: String,
}

/// Resolve the download descriptor for a host.
///
/// # Errors
///
/// * `UnsupportedPlatform` - OS is not linux, darwin or win32
/// * `UnsupportedArchitecture` - architecture is not x64 or arm64
/// * `UnsupportedCombination` - darwin-x64 or win32-arm64
pub fn resolve_platform(host: &HostTarget) -> Result<PlatformInfo, PlatformError> {
    let platform = SupportedPlatform::from_os_name(&host.os).ok_or_else(|| {
        PlatformError::UnsupportedPlatform {
            platform: host.os.clone(),
        }
    })?;

    let architecture = SupportedArchitecture::from_arch_name(&host.arch).ok_or_else(|| {
        PlatformError::UnsupportedArchitecture {
            arch: host.arch.clone(),
        }
    })?;

    if matches!(
        (platform, architecture),
        (SupportedPlatform::Darwin, SupportedArchitecture::X64)
            | (SupportedPlatform::Win32, SupportedArchitecture::Arm64)
    ) {
        return Err(PlatformError::UnsupportedCombination {
            platform: platform.as_str().to_string(),
            arch: architecture.as_str().to_string(),
        });
    }

    Ok(PlatformInfo {
        platform,
        architecture,
        download_prefix: format!("{}-{}", platform.download_label(), architecture),
        file_extension: platform.file_extension().to_string(),
    })
}
