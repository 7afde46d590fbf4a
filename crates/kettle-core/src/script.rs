//! Vendor install scripts (`curl ... | bash` style installers).

use std::ffi::OsString;

use crate::context::Context;
use crate::error::{KettleError, Result};
use crate::io::download::download_file;
use crate::process::run_streamed;

/// Download the script at `url` to a temporary file and run it with `bash`,
/// passing `args` through. Output is streamed to the reporter. The script is
/// deleted afterwards whether or not it succeeded.
pub async fn run_install_script(ctx: &Context, url: &str, args: &[String]) -> Result<()> {
    ctx.reporter.section(&format!("Running install script {url}"));

    let script = tempfile::Builder::new()
        .prefix("kettle-install-")
        .suffix(".sh")
        .tempfile()
        .map_err(|e| KettleError::fs("create temp file", std::env::temp_dir(), e))?
        .into_temp_path();

    download_file(&ctx.client, url, &script).await?;

    let mut argv = vec![script.as_os_str().to_owned()];
    argv.extend(args.iter().map(OsString::from));
    let reporter = ctx.reporter.clone();

    let result =
        tokio::task::spawn_blocking(move || run_streamed("bash", argv, reporter.as_ref()))
            .await
            .map_err(|e| KettleError::CommandFailed {
                command: "bash".into(),
                status: e.to_string(),
            })?;

    if let Err(e) = script.close() {
        tracing::warn!(error = %e, "failed to remove install script");
    }
    result
}

#[cfg(all(test, unix))]
mod tests {
    use std::sync::Arc;

    use kettle_schema::{Arch, Os, PlatformSignature};

    use super::*;
    use crate::release::GitHubReleases;
    use crate::reporter::RecordingReporter;

    #[tokio::test]
    async fn test_runs_script_with_args() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/install.sh")
            .with_status(200)
            .with_body("#!/usr/bin/env bash\nargs=(\"$@\")\n[[ -n ${args[0]} ]] && echo \"installing ${args[0]}\"\n")
            .create_async()
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let client = reqwest::Client::new();
        let ctx = Context::new(
            client.clone(),
            Arc::new(GitHubReleases::new(client, server.url(), None)),
            PlatformSignature::new(Os::Linux, Arch::Amd64, None),
            reporter.clone(),
        );

        run_install_script(&ctx, &format!("{}/install.sh", server.url()), &["--yes".into()])
            .await
            .unwrap();

        assert!(reporter.lines().contains(&"output: installing --yes".to_string()));
    }
}
