//! Profile command

use anyhow::{Context as _, Result};
use kettle_core::install::command_exists;
use kettle_core::{Settings, ShellProfile};

use crate::ProfileCommands;
use crate::ui::Output;

/// Resolve the user's shell profile from settings.
pub fn resolve(settings: &Settings) -> Result<ShellProfile> {
    ShellProfile::resolve(settings.shell.as_deref(), &settings.home, &settings.config_dir)
        .context("Failed to resolve shell profile")
}

pub fn profile(settings: &Settings, output: &Output, command: ProfileCommands) -> Result<()> {
    let profile = resolve(settings)?;

    match command {
        ProfileCommands::Add {
            line,
            if_command,
            main,
        } => {
            let (added, target) = match (main, if_command) {
                (true, _) => (profile.add_line_to_shell_profile(&line)?, &profile.main_profile),
                (false, Some(cmd)) => {
                    if !command_exists(&cmd) {
                        output.warning(&format!(
                            "{cmd} is not on PATH; the line stays inactive until it is"
                        ));
                    }
                    (profile.conditional_append(&line, &cmd)?, &profile.tool_profile)
                }
                (false, None) => (profile.add_line_to_tool_profile(&line)?, &profile.tool_profile),
            };
            report(output, added, &line, target);
        }
        ProfileCommands::Source => {
            let added = profile.ensure_profile_sourced()?;
            report(
                output,
                added,
                &profile.shell.source_line(&profile.tool_profile),
                &profile.main_profile,
            );
        }
        ProfileCommands::Show => {
            output.info(&format!("shell:        {} ({})", profile.shell, profile.shell_bin));
            output.info(&format!("main profile: {}", profile.main_profile.display()));
            output.info(&format!("tool profile: {}", profile.tool_profile.display()));
            output.info(&format!("completions:  {}", profile.completions_file().display()));
            output.info(&format!("go bin:       {}", settings.go_bin().display()));
            if !settings.go_bin_on_path() {
                output.warning("go bin is not on PATH");
            }
        }
    }
    Ok(())
}

fn report(output: &Output, added: bool, line: &str, target: &std::path::Path) {
    if added {
        output.success(&format!("Added to {}: {line}", target.display()));
    } else {
        output.info(&format!("Already present: {line}"));
    }
}
