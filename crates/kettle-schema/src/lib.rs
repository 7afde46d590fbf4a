//! Shared, I/O-free types for kettle: platform facts, release asset ranking,
//! shell dialects and version comparison.

pub mod asset;
pub mod platform;
pub mod shell;
pub mod version;

// Re-exports
pub use asset::{ArchiveKind, AssetScore, ReleaseAsset, rank_asset, score_assets, select_best_asset};
pub use platform::*;
pub use shell::{ShellType, UnsupportedShell};
pub use version::{ReleaseVersion, compare_versions};
