//! Supported shell dialects.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when `SHELL` names a shell kettle does not configure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported shell type: {0}")]
pub struct UnsupportedShell(pub String);

/// A shell dialect kettle can write configuration for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellType {
    /// GNU Bash.
    Bash,
    /// Z shell.
    Zsh,
    /// Friendly interactive shell.
    Fish,
}

impl ShellType {
    /// All supported shells, in completion-generation order.
    pub const ALL: [ShellType; 3] = [ShellType::Bash, ShellType::Zsh, ShellType::Fish];

    /// Identify the dialect from a shell binary path such as `/usr/bin/zsh`.
    pub fn from_shell_path(path: &str) -> Result<Self, UnsupportedShell> {
        let base = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);
        base.parse()
    }

    /// Lowercase shell name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
        }
    }

    /// A one-line statement that runs `line` only if `command` is on `PATH`.
    pub fn guard_line(&self, command: &str, line: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => {
                format!("if command -v {command} >/dev/null 2>&1; then {line}; fi")
            }
            Self::Fish => format!("if command -v {command} >/dev/null 2>&1; {line}; end"),
        }
    }

    /// Statement that sources `path` into the running shell.
    pub fn source_line(&self, path: &Path) -> String {
        format!("source {}", path.display())
    }
}

impl FromStr for ShellType {
    type Err = UnsupportedShell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            other => Err(UnsupportedShell(other.to_string())),
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
