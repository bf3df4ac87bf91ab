//! Host platform identifiers and the set of targets prebuilt archives may ship.
//!
//! Operating systems and architectures are named the way workspace layouts
//! name them (`linux`, `darwin`, `amd64`, `386`), so a platform triple reads
//! like `linux_amd64`.

use std::fmt;

/// Platform triples accepted under `lib/` in release archives.
pub const SUPPORTED_TARGETS: &[&str] = &[
    "darwin_386",
    "darwin_amd64",
    "darwin_arm64",
    "freebsd_386",
    "freebsd_amd64",
    "freebsd_arm",
    "linux_386",
    "linux_amd64",
    "linux_arm",
    "linux_arm64",
    "netbsd_386",
    "netbsd_amd64",
    "netbsd_arm",
    "openbsd_386",
    "openbsd_amd64",
    "plan9_386",
    "plan9_amd64",
    "windows_386",
    "windows_amd64",
];

/// Whether `triple` names a supported target.
pub fn is_supported(triple: &str) -> bool {
    SUPPORTED_TARGETS.contains(&triple)
}

/// Platform information used to pick the library directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            arch: Self::detect_arch(),
        }
    }

    fn detect_os() -> String {
        #[cfg(target_os = "macos")]
        {
            "darwin".to_string()
        }
        #[cfg(not(target_os = "macos"))]
        {
            std::env::consts::OS.to_string()
        }
    }

    fn detect_arch() -> String {
        #[cfg(target_arch = "x86_64")]
        {
            "amd64".to_string()
        }
        #[cfg(target_arch = "aarch64")]
        {
            "arm64".to_string()
        }
        #[cfg(target_arch = "x86")]
        {
            "386".to_string()
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "x86")))]
        {
            std::env::consts::ARCH.to_string()
        }
    }

    /// `<os>_<arch>`, the name of the per-platform library directory.
    pub fn triple(&self) -> String {
        format!("{}_{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.triple())
    }
}
