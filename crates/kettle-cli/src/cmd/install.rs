//! Install command

use anyhow::{Context as _, Result};
use kettle_core::Settings;
use kettle_core::install::install_self;

use crate::ui::Output;

pub fn install(settings: &Settings, output: &Output, no_profile: bool) -> Result<()> {
    output.section("Installing kettle");

    let target = install_self(settings).context("Failed to install kettle binary")?;
    output.success(&format!("Installed to {}", target.display()));

    if no_profile {
        return Ok(());
    }

    let profile = super::profile::resolve(settings)?;
    let completions = profile.completions_file();
    super::completions::write_completions(profile.shell, &completions)?;
    output.info(&format!("Wrote {} completions to {}", profile.shell, completions.display()));

    if profile.ensure_completions_sourced()? {
        output.info(&format!("Completions sourced from {}", profile.tool_profile.display()));
    }
    if profile.ensure_profile_sourced()? {
        output.info(&format!(
            "{} now sources {}",
            profile.main_profile.display(),
            profile.tool_profile.display()
        ));
    }

    output.success("Restart your shell to pick up the changes.");
    Ok(())
}
