//! kettle - developer tool installer
//!
//! Installs command-line tools from the latest GitHub release asset that
//! fits the host, keeps kettle itself current, and wires tools into the
//! user's shell without ever duplicating a profile line.
//!
//! # Files
//!
//! ```text
//! ~/.config/kettle/
//! ├── kettle.bashrc      # tool profile, sourced from ~/.bashrc
//! ├── kettle.zshrc       # tool profile, sourced from ~/.zshrc
//! ├── kettle.fishrc      # tool profile, sourced from config.fish
//! └── completions/
//!     └── kettle.<shell>
//! ```

#![allow(missing_docs)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release version, or `dev` for untagged builds.
pub const VERSION: &str = env!("KETTLE_VERSION");
/// Short commit hash of the build.
pub const COMMIT: &str = env!("KETTLE_COMMIT");
/// Commit date of the build.
pub const BUILD_DATE: &str = env!("KETTLE_BUILD_DATE");

#[derive(Debug, Parser)]
#[command(name = "kettle")]
#[command(author, version = VERSION, about = "kettle - install and update developer CLI tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a tool from the latest release of a GitHub repository
    Github {
        /// Repository as owner/repo
        repo: String,
        /// Binary name inside the release (defaults to the repository name)
        #[arg(short, long)]
        binary: Option<String>,
        /// Install directory (defaults to ~/.local/bin or /usr/local/bin)
        #[arg(short, long, env = "KETTLE_INSTALL_DIR")]
        dir: Option<PathBuf>,
    },
    /// Update kettle itself to the latest release
    Update {
        /// Only report whether an update is available
        #[arg(long)]
        check: bool,
    },
    /// Install the running kettle binary and wire up the shell profile
    Install {
        /// Do not touch shell profiles
        #[arg(long)]
        no_profile: bool,
    },
    /// Edit shell profiles idempotently
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Download a vendor install script and run it with bash
    Script {
        /// Script URL
        url: String,
        /// Arguments passed to the script
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Show version and build information
    Version {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Add a line to kettle's tool profile unless already present
    Add {
        /// Line to add
        line: String,
        /// Only run the line when this command is on PATH
        #[arg(long, value_name = "COMMAND")]
        if_command: Option<String>,
        /// Write to the main shell profile instead of the tool profile
        #[arg(long, conflicts_with = "if_command")]
        main: bool,
    },
    /// Make the main shell profile source kettle's tool profile
    Source,
    /// Print the resolved profile paths
    Show,
}
