//! Replacing the running kettle binary with the latest release.
//!
//! The live path is only ever touched by a rename, so a crash at any point
//! leaves either the old or the new binary in place. Windows cannot rename
//! over a running executable; there the swap is handed to a detached batch
//! script that runs after this process exits.

use std::cmp::Ordering;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kettle_schema::ReleaseVersion;
use kettle_schema::version::strip_version_prefix;

use crate::config::Settings;
use crate::context::Context;
use crate::error::{KettleError, Result};
use crate::io::download::download_file;
use crate::io::make_executable;

/// Versions involved in one update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Version of the running binary (possibly `dev`).
    pub current: ReleaseVersion,
    /// Latest published version.
    pub latest: ReleaseVersion,
    /// Latest tag without its `v` prefix, as published.
    pub latest_tag: String,
}

impl UpdatePlan {
    /// Whether the published release is strictly newer than the running one.
    pub fn is_needed(&self) -> bool {
        self.current.cmp(&self.latest) == Ordering::Less
    }
}

/// What an update run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Already at or beyond the latest release; nothing touched.
    UpToDate,
    /// The binary at the target path was replaced.
    Updated,
    /// A helper will replace the binary after this process exits.
    Scheduled,
}

/// Compare `current_version` with the latest release of kettle's own repository.
pub async fn check(ctx: &Context, settings: &Settings, current_version: &str) -> Result<UpdatePlan> {
    let release = ctx.releases.latest_release(&settings.self_repo).await?;
    let latest_tag = strip_version_prefix(&release.tag_name).to_string();
    let plan = UpdatePlan {
        current: ReleaseVersion::parse(current_version),
        latest: ReleaseVersion::parse(&latest_tag),
        latest_tag,
    };
    tracing::debug!(current = %plan.current, latest = %plan.latest, "update check");
    Ok(plan)
}

/// Update the binary at `target` if a newer release exists.
///
/// Downloads the self-update URL into a fresh temporary file, marks it
/// executable and swaps it in with [`atomic_replace`]. The temporary file is
/// removed on any failure.
pub async fn update(
    ctx: &Context,
    settings: &Settings,
    current_version: &str,
    target: &Path,
) -> Result<(UpdatePlan, UpdateOutcome)> {
    let plan = check(ctx, settings, current_version).await?;
    if !plan.is_needed() {
        return Ok((plan, UpdateOutcome::UpToDate));
    }

    ctx.reporter
        .info(&format!("Updating {} -> {}", plan.current, plan.latest));

    let temp = tempfile::Builder::new()
        .prefix("kettle-update-")
        .tempfile_in(std::env::temp_dir())
        .map_err(|e| KettleError::fs("create temp file", std::env::temp_dir(), e))?
        .into_temp_path();

    download_file(&ctx.client, &settings.self_update_url, &temp).await?;
    make_executable(&temp)?;

    let outcome = atomic_replace(target, &temp)?;
    // The file now lives at `target` (or is owned by the scheduled helper).
    temp.keep().ok();
    Ok((plan, outcome))
}

/// Put `source` at `target` without ever leaving `target` half-written.
///
/// On Unix the result is always mode `0o755`.
pub fn atomic_replace(target: &Path, source: &Path) -> Result<UpdateOutcome> {
    #[cfg(windows)]
    {
        schedule_windows_replace(target, source)
    }
    #[cfg(not(windows))]
    {
        replace_in_place(target, source).map(|()| UpdateOutcome::Updated)
    }
}

#[cfg(not(windows))]
fn replace_in_place(target: &Path, source: &Path) -> Result<()> {
    make_executable(source)?;
    match std::fs::rename(source, target) {
        Ok(()) => {
            tracing::debug!(target = %target.display(), "replaced by rename");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            let staged = sibling(target, ".new");
            tracing::debug!(staged = %staged.display(), "temp dir on another filesystem, staging");
            std::fs::copy(source, &staged).map_err(|e| KettleError::fs("copy", &staged, e))?;
            make_executable(&staged)?;
            if let Err(e) = std::fs::rename(&staged, target) {
                std::fs::remove_file(&staged).ok();
                return Err(KettleError::fs("replace", target, e));
            }
            std::fs::remove_file(source).ok();
            Ok(())
        }
        Err(e) => Err(KettleError::fs("replace", target, e)),
    }
}

#[cfg(windows)]
fn schedule_windows_replace(target: &Path, source: &Path) -> Result<UpdateOutcome> {
    let script = sibling(target, ".update.bat");
    std::fs::write(&script, windows_update_script(source, target))
        .map_err(|e| KettleError::fs("write", &script, e))?;

    std::process::Command::new("cmd")
        .args(["/C", "start", "/B"])
        .arg(&script)
        .spawn()
        .map_err(|e| KettleError::CommandFailed {
            command: format!("cmd /C start /B {}", script.display()),
            status: e.to_string(),
        })?;
    tracing::debug!(script = %script.display(), "scheduled replacement");
    Ok(UpdateOutcome::Scheduled)
}

/// Batch script that waits for the caller to exit, moves `source` over
/// `target` and deletes itself.
pub fn windows_update_script(source: &Path, target: &Path) -> String {
    format!(
        "@echo off\r\ntimeout /t 2 /nobreak >nul\r\nmove /Y \"{}\" \"{}\"\r\ndel \"%~f0\"\r\n",
        source.display(),
        target.display()
    )
}

/// `target` with `suffix` appended to its full file name.
fn sibling(target: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = target.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kettle_schema::{Arch, Os, PlatformSignature};

    use super::*;
    use crate::release::GitHubReleases;
    use crate::reporter::NullReporter;

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    async fn setup(tag: &str) -> (mockito::ServerGuard, Context, Settings, tempfile::TempDir) {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/kettleofketchup/kettle/releases/latest")
            .with_status(200)
            .with_body(format!(r#"{{"tag_name":"{tag}","assets":[]}}"#))
            .create_async()
            .await;

        let home = tempfile::tempdir().unwrap();
        let mut settings = Settings::with_home(home.path());
        settings.api_base = server.url();
        settings.self_update_url = format!("{}/download/kettle", server.url());

        let client = reqwest::Client::new();
        let ctx = Context::new(
            client.clone(),
            Arc::new(GitHubReleases::new(client, server.url(), None)),
            PlatformSignature::new(Os::Linux, Arch::Amd64, None),
            Arc::new(NullReporter),
        );
        (server, ctx, settings, home)
    }

    #[tokio::test]
    async fn test_up_to_date_touches_nothing() {
        let (server, ctx, settings, home) = setup("v1.2.0").await;
        let target = home.path().join("kettle");
        std::fs::write(&target, "old").unwrap();

        let (plan, outcome) = update(&ctx, &settings, "1.2.0", &target).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::UpToDate);
        assert_eq!(plan.latest_tag, "1.2.0");
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");
        drop(server);
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_dev_build_updates() {
        let (mut server, ctx, settings, home) = setup("v0.3.1").await;
        server
            .mock("GET", "/download/kettle")
            .with_status(200)
            .with_body("new-binary")
            .create_async()
            .await;

        let target = home.path().join("kettle");
        std::fs::write(&target, "old").unwrap();

        let (plan, outcome) = update(&ctx, &settings, "dev", &target).await.unwrap();
        assert!(plan.current.is_dev());
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new-binary");
        #[cfg(unix)]
        assert_ne!(mode(&target) & 0o111, 0);
    }

    #[tokio::test]
    async fn test_failed_download_keeps_binary() {
        let (mut server, ctx, settings, home) = setup("v2.0.0").await;
        server
            .mock("GET", "/download/kettle")
            .with_status(500)
            .create_async()
            .await;

        let target = home.path().join("kettle");
        std::fs::write(&target, "old").unwrap();

        let err = update(&ctx, &settings, "1.9.9", &target).await.unwrap_err();
        assert!(matches!(err, KettleError::HttpStatus { .. }));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_atomic_replace_renames() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("kettle");
        let source = dir.path().join("kettle.download");
        std::fs::write(&target, "old").unwrap();
        std::fs::write(&source, "new").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&source, std::fs::Permissions::from_mode(0o600)).unwrap();
        }

        assert_eq!(atomic_replace(&target, &source).unwrap(), UpdateOutcome::Updated);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        assert!(!source.exists());
        #[cfg(unix)]
        assert_eq!(mode(&target), 0o755);
    }

    #[test]
    fn test_windows_script() {
        let script = windows_update_script(
            Path::new(r"C:\Temp\kettle-update-1"),
            Path::new(r"C:\bin\kettle.exe"),
        );
        assert!(script.starts_with("@echo off\r\ntimeout /t 2 /nobreak >nul\r\n"));
        assert!(script.contains(r#"move /Y "C:\Temp\kettle-update-1" "C:\bin\kettle.exe""#));
        assert!(script.ends_with("del \"%~f0\"\r\n"));
        assert_eq!(sibling(Path::new("kettle.exe"), ".update.bat"), Path::new("kettle.exe.update.bat"));
    }
}
