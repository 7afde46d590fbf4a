//! Run a vendor install script.

use anyhow::{Context as _, Result};
use kettle_core::Settings;
use kettle_core::script::run_install_script;

use crate::ui::Output;

pub async fn script(settings: &Settings, output: &Output, url: &str, args: &[String]) -> Result<()> {
    let ctx = super::context(settings, output);
    run_install_script(&ctx, url, args)
        .await
        .with_context(|| format!("Install script {url} failed"))?;
    output.success("Install script finished");
    Ok(())
}
