//! Completions command

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use kettle_schema::ShellType;

use crate::ui::Output;

fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = crate::Cli::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, "kettle", &mut buf);
    buf
}

fn clap_shell(shell: ShellType) -> Shell {
    match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
    }
}

/// Print completions for `shell` to stdout.
pub fn completions(output: &Output, shell: Shell) {
    output.raw(String::from_utf8_lossy(&render(shell)).into_owned());
}

/// Write the completion script for `shell` to `path`, creating its directory.
pub fn write_completions(shell: ShellType, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    std::fs::write(path, render(clap_shell(shell)))
        .with_context(|| format!("Failed to write {}", path.display()))
}
