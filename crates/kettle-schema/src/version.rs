//! Release version comparison.
//!
//! Tags are parsed loosely: each of the first three dot-separated components
//! is read as its leading digits, anything after the first non-digit is
//! ignored and a missing or digit-less component counts as `0`. So
//! `1.2.3-rc1` compares equal to `1.2.3`. Local builds report the `dev`
//! sentinel, which is older than every release.

use std::cmp::Ordering;
use std::fmt;

/// Version string reported by builds without a release tag.
pub const DEV_VERSION: &str = "dev";

/// A release version or the `dev` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseVersion {
    /// Unreleased local build.
    Dev,
    /// A tagged release, reduced to `major.minor.patch`.
    Release(semver::Version),
}

impl ReleaseVersion {
    /// Parse a version string, stripping a leading `v`.
    ///
    /// Never fails: unparseable components become `0`.
    pub fn parse(raw: &str) -> Self {
        let raw = strip_version_prefix(raw.trim());
        if raw == DEV_VERSION {
            return Self::Dev;
        }

        let mut parts = [0u64; 3];
        for (slot, component) in parts.iter_mut().zip(raw.split('.')) {
            *slot = leading_number(component);
        }
        Self::Release(semver::Version::new(parts[0], parts[1], parts[2]))
    }

    /// Whether this is the `dev` sentinel.
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Dev, Self::Dev) => Ordering::Equal,
            (Self::Dev, Self::Release(_)) => Ordering::Less,
            (Self::Release(_), Self::Dev) => Ordering::Greater,
            (Self::Release(a), Self::Release(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => f.write_str(DEV_VERSION),
            Self::Release(v) => write!(f, "{v}"),
        }
    }
}

/// Compare two version strings.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use kettle_schema::version::compare_versions;
///
/// assert_eq!(compare_versions("dev", "1.0.0"), Ordering::Less);
/// assert_eq!(compare_versions("v1.2.3", "1.2.3"), Ordering::Equal);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    ReleaseVersion::parse(a).cmp(&ReleaseVersion::parse(b))
}

/// Strip a single leading `v` from a tag such as `v1.4.0`.
pub fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

fn leading_number(component: &str) -> u64 {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component[..end].parse().unwrap_or(0)
}
