//! Install a tool from a repository's latest release.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use kettle_core::install::install_from_latest_release;
use kettle_core::{GitHubRepo, Settings};

use crate::ui::Output;

pub async fn github(
    settings: &Settings,
    output: &Output,
    repo: &str,
    binary: Option<&str>,
    dir: Option<PathBuf>,
) -> Result<()> {
    let repo: GitHubRepo = repo.parse()?;
    let binary = binary.unwrap_or(&repo.repo).to_string();
    let dir = dir.unwrap_or_else(|| settings.install_dir());
    let ctx = super::context(settings, output);

    install_from_latest_release(&ctx, &repo, &dir, &binary)
        .await
        .with_context(|| format!("Failed to install {binary} from {repo}"))?;
    Ok(())
}
