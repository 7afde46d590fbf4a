//! Release asset ranking.
//!
//! Vendors publish the same build under many shapes (bare binaries, tarballs,
//! zips, `.deb` packages) and naming schemes. Every candidate gets an integer
//! rank for the host platform; `0` means incompatible. Categories dominate
//! bonuses: a standalone binary (100) beats any archive (50 + 15 + 5), which
//! beats any package (25 + 15 + 5).

use serde::{Deserialize, Serialize};

use crate::platform::{Os, PlatformSignature};

const PLATFORM_MATCH: u32 = 10;
const STANDALONE_BONUS: u32 = 100;
const ARCHIVE_BONUS: u32 = 50;
const PACKAGE_BONUS: u32 = 25;
const OS_NAME_BONUS: u32 = 5;
const UBUNTU_DEB_BONUS: u32 = 15;

/// A single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// File name as published.
    pub name: String,
    /// Direct download URL.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// An asset name paired with its rank for the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetScore<'a> {
    /// Candidate asset name.
    pub name: &'a str,
    /// Desirability; `0` means incompatible.
    pub rank: u32,
}

impl AssetScore<'_> {
    /// Whether the asset can run on the host at all.
    pub fn is_compatible(&self) -> bool {
        self.rank > 0
    }
}

/// Container format of a downloaded asset, derived from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveKind {
    /// Gzip-compressed tar archive (`.tar.gz`, `.tgz`).
    TarGz,
    /// Uncompressed tar archive (`.tar`).
    Tar,
    /// A single gzip-compressed file (`.gz` without `.tar`).
    Gzip,
    /// Zip archive (`.zip`).
    Zip,
    /// Debian package (`.deb`).
    Deb,
    /// RPM package (`.rpm`).
    Rpm,
    /// Apple disk image (`.dmg`).
    Dmg,
    /// No recognized container; the file is the binary.
    RawBinary,
}

impl ArchiveKind {
    /// Detect the kind from a file name (case-insensitive).
    #[allow(clippy::case_sensitive_file_extension_comparisons)]
    pub fn from_filename(filename: &str) -> Self {
        let f = filename.to_lowercase();

        if f.ends_with(".tar.gz") || f.ends_with(".tgz") {
            Self::TarGz
        } else if f.ends_with(".tar") {
            Self::Tar
        } else if f.ends_with(".gz") {
            Self::Gzip
        } else if f.ends_with(".zip") {
            Self::Zip
        } else if f.ends_with(".deb") {
            Self::Deb
        } else if f.ends_with(".rpm") {
            Self::Rpm
        } else if f.ends_with(".dmg") {
            Self::Dmg
        } else {
            Self::RawBinary
        }
    }

    /// Whether the downloaded file must be unpacked before use.
    pub fn needs_extraction(self) -> bool {
        self != Self::RawBinary
    }
}

/// Rank an asset name for `platform`. Higher is better, `0` is unusable.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
pub fn rank_asset(name: &str, platform: &PlatformSignature) -> u32 {
    let name = name.to_lowercase();
    let os = platform.os.as_str();

    if is_source_archive(&name, platform) {
        return 0;
    }

    // Architecture match is mandatory, OS match is not.
    if !has_arch(&name, platform) {
        return 0;
    }

    let has_os = name.contains(os);
    let platform_ok = match platform.os {
        Os::Linux => {
            has_os || name.ends_with(".deb") || name.ends_with(".tar.gz") || name.ends_with(".zip")
        }
        Os::Darwin => {
            has_os
                && (name.ends_with(".tar.gz") || name.ends_with(".dmg") || name.ends_with(".zip"))
        }
        Os::Windows => has_os && (name.ends_with(".zip") || name.ends_with(".exe")),
        Os::Other(_) => false,
    };
    if !platform_ok {
        return 0;
    }

    let mut rank = PLATFORM_MATCH;

    if is_standalone_binary(&name, platform) {
        rank += STANDALONE_BONUS;
    } else if is_archive(&name) {
        rank += ARCHIVE_BONUS;
    } else if is_package(&name) {
        rank += PACKAGE_BONUS;
    }

    if has_os {
        rank += OS_NAME_BONUS;
    }

    if platform.is_ubuntu() && name.ends_with(".deb") {
        rank += UBUNTU_DEB_BONUS;
    }

    rank
}

/// Rank every candidate, in input order.
pub fn score_assets<'a, S: AsRef<str>>(
    names: &'a [S],
    platform: &PlatformSignature,
) -> Vec<AssetScore<'a>> {
    names
        .iter()
        .map(|n| AssetScore {
            name: n.as_ref(),
            rank: rank_asset(n.as_ref(), platform),
        })
        .collect()
}

/// Pick the best asset for `platform`.
///
/// The strictly greatest rank wins and the first-seen candidate wins ties.
/// Returns `None` for an empty list or when every candidate ranks `0`.
///
/// # Example
///
/// ```
/// use kettle_schema::{Arch, Os, PlatformSignature, select_best_asset};
///
/// let linux = PlatformSignature::new(Os::Linux, Arch::Amd64, None);
/// let names = ["tool-linux-amd64.tar.gz", "tool-linux-amd64"];
/// assert_eq!(select_best_asset(&names, &linux), Some("tool-linux-amd64"));
/// ```
pub fn select_best_asset<'a, S: AsRef<str>>(
    names: &'a [S],
    platform: &PlatformSignature,
) -> Option<&'a str> {
    let mut best: Option<AssetScore<'a>> = None;
    for score in score_assets(names, platform) {
        if !score.is_compatible() {
            continue;
        }
        if best.as_ref().is_none_or(|b| score.rank > b.rank) {
            best = Some(score);
        }
    }
    best.map(|b| b.name)
}

fn has_arch(name: &str, platform: &PlatformSignature) -> bool {
    platform.arch.aliases().iter().any(|alias| name.contains(alias))
}

/// Source tarballs (`source.tar.gz`, `*-src.zip`) and bare tag archives
/// (`v1.54.2.tar.gz`) that carry no platform tokens.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn is_source_archive(name: &str, platform: &PlatformSignature) -> bool {
    if name.contains("source") || name.contains("src") {
        return true;
    }

    let bare_version = name
        .strip_prefix('v')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit());

    bare_version
        && (name.ends_with(".tar.gz") || name.ends_with(".zip"))
        && !name.contains(platform.os.as_str())
        && !name.contains(platform.arch.as_str())
}

#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn is_standalone_binary(name: &str, platform: &PlatformSignature) -> bool {
    let looks_executable = !name.contains('.')
        || name.ends_with(".exe")
        || name.ends_with(&platform.target_suffix());
    looks_executable && !is_archive(name) && !is_package(name)
}

#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn is_archive(name: &str) -> bool {
    name.ends_with(".tar.gz")
        || name.ends_with(".zip")
        || name.ends_with(".tar")
        || name.ends_with(".gz")
        || name.ends_with(".dmg")
}

#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn is_package(name: &str) -> bool {
    name.ends_with(".deb") || name.ends_with(".rpm")
}
