//! kettle - developer tool installer CLI

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kettle_cli::cmd;
use kettle_cli::ui::Output;
use kettle_cli::{Cli, Commands};
use kettle_core::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new();

    let result = run(cli.command, &output).await;
    output.wait_async().await;
    result
}

async fn run(command: Commands, output: &Output) -> Result<()> {
    // Commands that never touch the filesystem work without a home directory.
    match command {
        Commands::Completions { shell } => {
            cmd::completions::completions(output, shell);
            return Ok(());
        }
        Commands::Version { json } => return cmd::version::version(output, json),
        _ => {}
    }

    let settings = Settings::from_env().context("Failed to load settings")?;
    tracing::debug!(?settings, "loaded settings");

    match command {
        Commands::Github { repo, binary, dir } => {
            cmd::github::github(&settings, output, &repo, binary.as_deref(), dir).await
        }
        Commands::Update { check } => cmd::update::update(&settings, output, check).await,
        Commands::Install { no_profile } => cmd::install::install(&settings, output, no_profile),
        Commands::Profile { command } => cmd::profile::profile(&settings, output, command),
        Commands::Script { url, args } => cmd::script::script(&settings, output, &url, &args).await,
        Commands::Completions { .. } | Commands::Version { .. } => Ok(()),
    }
}
