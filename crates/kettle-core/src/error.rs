//! Domain-specific errors for acquisition, installation and profile operations

use std::io;
use std::path::PathBuf;

use kettle_schema::UnsupportedShell;
use thiserror::Error;

/// Coarse classification of a [`KettleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport or HTTP status failure.
    Network,
    /// No compatible asset, or the binary is absent from an archive.
    NotFound,
    /// Shell dialect, archive kind or OS not handled.
    UnsupportedPlatform,
    /// Create/open/chmod/rename failures.
    Filesystem,
    /// A spawned child process failed.
    Process,
}

#[derive(Error, Debug)]
pub enum KettleError {
    #[error("failed to {context}: {source}")]
    Network {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("bad status from {url}: {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no suitable asset found for {repo} release {tag}")]
    NoSuitableAsset { repo: String, tag: String },

    #[error("binary {binary} not found in archive {}", archive.display())]
    BinaryNotFoundInArchive { archive: PathBuf, binary: String },

    #[error("unsupported archive format: {0}")]
    UnsupportedArchiveFormat(String),

    #[error(transparent)]
    UnsupportedShell(#[from] UnsupportedShell),

    #[error("SHELL environment variable not set")]
    ShellNotSet,

    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error("failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not locate the running executable: {0}")]
    CurrentExe(#[source] io::Error),

    #[error("failed to read archive {}: {message}", archive.display())]
    Archive { archive: PathBuf, message: String },

    #[error("`{command}` failed: {status}")]
    CommandFailed { command: String, status: String },
}

impl KettleError {
    /// Wrap an I/O error with the action and path that produced it.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wrap a transport error with the step that produced it.
    pub fn network(context: &'static str, source: reqwest::Error) -> Self {
        Self::Network { context, source }
    }

    /// Classify this error into the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::NoSuitableAsset { .. } | Self::BinaryNotFoundInArchive { .. } => {
                ErrorKind::NotFound
            }
            Self::UnsupportedArchiveFormat(_) | Self::UnsupportedShell(_) | Self::ShellNotSet => {
                ErrorKind::UnsupportedPlatform
            }
            Self::NoHomeDirectory
            | Self::CurrentExe(_)
            | Self::Filesystem { .. }
            | Self::Archive { .. } => ErrorKind::Filesystem,
            Self::CommandFailed { .. } => ErrorKind::Process,
        }
    }
}

/// Result alias for core operations.
pub type Result<T, E = KettleError> = std::result::Result<T, E>;
