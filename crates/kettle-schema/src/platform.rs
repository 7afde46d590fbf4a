//! Platform facts consumed by asset ranking and installation.
//!
//! Release assets name their target with Go-style tokens (`linux`, `darwin`,
//! `amd64`, `arm64`), so both enums render to those tokens rather than to
//! Rust's `std::env::consts` spelling.

use serde::{Deserialize, Serialize};

/// Operating system of the running host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Linux-based operating systems.
    Linux,
    /// Apple's kernel name, used by Go and Rust release tooling for macOS.
    Darwin,
    /// Microsoft Windows.
    Windows,
    /// Any other target, carrying the `std::env::consts::OS` value.
    #[serde(skip)]
    Other(&'static str),
}

impl Os {
    /// Get the current operating system
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to an [`Os`].
    pub fn from_rust_name(name: &'static str) -> Self {
        match name {
            "linux" => Self::Linux,
            "macos" => Self::Darwin,
            "windows" => Self::Windows,
            other => Self::Other(other),
        }
    }

    /// Token used in release asset names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture of the running host.
///
/// # Example
///
/// ```
/// use kettle_schema::Arch;
///
/// let current = Arch::current();
/// println!("Running on: {}", current);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// Intel/AMD 64-bit.
    Amd64,
    /// ARM 64-bit.
    Arm64,
    /// Intel 32-bit.
    I386,
    /// ARM 32-bit.
    Arm,
    /// Any other target, carrying the `std::env::consts::ARCH` value.
    #[serde(skip)]
    Other(&'static str),
}

impl Arch {
    /// Get the current architecture
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::ARCH)
    }

    /// Map a `std::env::consts::ARCH` value to an [`Arch`].
    pub fn from_rust_name(name: &'static str) -> Self {
        match name {
            "x86_64" => Self::Amd64,
            "aarch64" => Self::Arm64,
            "x86" => Self::I386,
            "arm" => Self::Arm,
            other => Self::Other(other),
        }
    }

    /// Canonical token used in release asset names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::I386 => "386",
            Self::Arm => "arm",
            Self::Other(name) => name,
        }
    }

    /// Every spelling vendors use for this architecture, canonical first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Amd64 => &["amd64", "x86_64", "x64"],
            Self::Arm64 => &["arm64", "aarch64"],
            Self::I386 => &["386"],
            Self::Arm => &["arm"],
            Self::Other(_) => &[],
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Linux distribution identity as read from `/etc/os-release`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinuxDistro {
    /// The `ID` field, e.g. `ubuntu`.
    pub id: String,
    /// The `VERSION_ID` field, e.g. `24.04`.
    pub version_id: String,
}

impl LinuxDistro {
    /// Parse the contents of an `os-release` file.
    ///
    /// Comment and blank lines are skipped; values may be double-quoted.
    pub fn parse_os_release(contents: &str) -> Self {
        let mut distro = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim_matches('"');
            match key {
                "ID" => distro.id = value.to_string(),
                "VERSION_ID" => distro.version_id = value.to_string(),
                _ => {}
            }
        }
        distro
    }

    /// Whether this is an Ubuntu host.
    pub fn is_ubuntu(&self) -> bool {
        self.id == "ubuntu"
    }
}

/// Immutable description of the host the binary runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSignature {
    /// Operating system.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
    /// Distribution facts, present only on Linux hosts with a readable os-release.
    pub linux_distro: Option<LinuxDistro>,
}

impl PlatformSignature {
    /// Build a signature from explicit facts.
    pub fn new(os: Os, arch: Arch, linux_distro: Option<LinuxDistro>) -> Self {
        Self {
            os,
            arch,
            linux_distro,
        }
    }

    /// Whether the host is Ubuntu.
    pub fn is_ubuntu(&self) -> bool {
        self.os == Os::Linux && self.linux_distro.as_ref().is_some_and(LinuxDistro::is_ubuntu)
    }

    /// `<os>-<arch>` suffix used by bare release binaries, e.g. `linux-amd64`.
    pub fn target_suffix(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

impl std::fmt::Display for PlatformSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)?;
        if let Some(distro) = &self.linux_distro {
            write!(f, " ({} {})", distro.id, distro.version_id)?;
        }
        Ok(())
    }
}
