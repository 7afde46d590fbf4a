//! Self-update command

use anyhow::{Context as _, Result};
use kettle_core::Settings;
use kettle_core::self_update::{self, UpdateOutcome};

use crate::ui::Output;

pub async fn update(settings: &Settings, output: &Output, check_only: bool) -> Result<()> {
    let ctx = super::context(settings, output);
    output.info("Checking for kettle updates...");

    if check_only {
        let plan = self_update::check(&ctx, settings, crate::VERSION)
            .await
            .context("Failed to check for updates")?;
        if plan.is_needed() {
            output.warning(&format!("Update available: {} -> {}", plan.current, plan.latest));
        } else {
            output.success(&format!("kettle is up to date ({})", plan.current));
        }
        return Ok(());
    }

    let exe = std::env::current_exe().context("Failed to locate running executable")?;
    let (plan, outcome) = self_update::update(&ctx, settings, crate::VERSION, &exe)
        .await
        .context("Self-update failed")?;

    match outcome {
        UpdateOutcome::UpToDate => {
            output.success(&format!("kettle is up to date ({})", plan.current));
        }
        UpdateOutcome::Updated => {
            output.success(&format!("kettle updated to {}", plan.latest));
        }
        UpdateOutcome::Scheduled => {
            output.success(&format!(
                "kettle {} will be installed when this process exits",
                plan.latest
            ));
        }
    }
    Ok(())
}
