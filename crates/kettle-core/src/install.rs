//! Release-asset installation pipeline.

use std::path::{Path, PathBuf};

use kettle_schema::{ArchiveKind, select_best_asset};

use crate::config::Settings;
use crate::context::Context;
use crate::error::{KettleError, Result};
use crate::io::download::download_file;
use crate::io::extract::extract_binary;
use crate::io::{make_executable, rename};
use crate::repo::GitHubRepo;

/// Install `binary_name` from the latest release of `repo` into `dest_dir`.
///
/// Picks the best asset for the context's platform, downloads it next to the
/// destination, then either extracts the binary (removing the archive) or
/// renames a bare executable into place. Returns the installed path.
pub async fn install_from_latest_release(
    ctx: &Context,
    repo: &GitHubRepo,
    dest_dir: &Path,
    binary_name: &str,
) -> Result<PathBuf> {
    ctx.reporter.section(&format!("Installing {binary_name} from {repo}"));

    let release = ctx.releases.latest_release(repo).await?;
    let names = release.asset_names();
    let chosen = select_best_asset(&names, &ctx.platform).ok_or_else(|| {
        KettleError::NoSuitableAsset {
            repo: repo.to_string(),
            tag: release.tag_name.clone(),
        }
    })?;
    let asset = release
        .asset(chosen)
        .ok_or_else(|| KettleError::NoSuitableAsset {
            repo: repo.to_string(),
            tag: release.tag_name.clone(),
        })?;

    tracing::info!(asset = %asset.name, tag = %release.tag_name, "selected release asset");
    ctx.reporter
        .info(&format!("{} {} ({})", repo, release.tag_name, asset.name));

    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| KettleError::fs("create directory", dest_dir, e))?;

    let download_path = dest_dir.join(&asset.name);
    download_file(&ctx.client, &asset.download_url, &download_path).await?;

    let installed = if ArchiveKind::from_filename(&asset.name).needs_extraction() {
        let archive = download_path.clone();
        let dir = dest_dir.to_path_buf();
        let binary = binary_name.to_string();
        let extracted = tokio::task::spawn_blocking(move || extract_binary(&archive, &dir, &binary))
            .await
            .map_err(|e| KettleError::Archive {
                archive: download_path.clone(),
                message: e.to_string(),
            })?;

        let path = match extracted {
            Ok(path) => path,
            Err(e) => {
                tokio::fs::remove_file(&download_path).await.ok();
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::remove_file(&download_path).await {
            tracing::warn!(path = %download_path.display(), error = %e, "failed to remove archive");
            ctx.reporter.warning(&format!(
                "could not remove {}: {e}",
                download_path.display()
            ));
        }
        path
    } else {
        let target = dest_dir.join(binary_name);
        rename(&download_path, &target)?;
        make_executable(&target)?;
        target
    };

    ctx.reporter
        .success(&format!("{binary_name} installed to {}", installed.display()));
    Ok(installed)
}

/// Copy the running executable into the preferred install directory.
pub fn install_self(settings: &Settings) -> Result<PathBuf> {
    let current = std::env::current_exe().map_err(KettleError::CurrentExe)?;
    let dir = settings.install_dir();
    let name = current
        .file_name()
        .map_or_else(|| crate::paths::TOOL_NAME.into(), ToOwned::to_owned);
    let target = dir.join(name);

    if target == current {
        tracing::debug!(path = %target.display(), "already running from install dir");
        return Ok(target);
    }

    crate::paths::ensure_dir(&dir)?;
    std::fs::copy(&current, &target).map_err(|e| KettleError::fs("copy", &target, e))?;
    make_executable(&target)?;
    Ok(target)
}

/// Whether `name` resolves to an executable on `PATH`.
pub fn command_exists(name: &str) -> bool {
    which::which(name).is_ok()
}
