//! Release acquisition, installation, shell profile and self-update logic for kettle.

pub mod config;
pub mod context;
pub mod error;
pub mod install;
pub mod io;
pub mod paths;
pub mod platform;
pub mod process;
pub mod release;
pub mod repo;
pub mod script;
pub mod self_update;
pub mod shell;

pub mod reporter;

pub use config::Settings;
pub use context::Context;
pub use error::{ErrorKind, KettleError, Result};
pub use release::{GitHubReleases, Release, ReleaseSource};
pub use repo::GitHubRepo;
pub use reporter::{NullReporter, Reporter};
pub use shell::ShellProfile;

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("kettle/", env!("CARGO_PKG_VERSION"));
