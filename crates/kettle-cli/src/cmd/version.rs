//! Version command

use anyhow::Result;
use serde::Serialize;

use crate::ui::Output;

#[derive(Debug, Serialize)]
struct BuildInfo {
    version: &'static str,
    commit: &'static str,
    build_date: &'static str,
    platform: String,
}

pub fn version(output: &Output, json: bool) -> Result<()> {
    let info = BuildInfo {
        version: crate::VERSION,
        commit: crate::COMMIT,
        build_date: crate::BUILD_DATE,
        platform: kettle_core::platform::current().to_string(),
    };

    if json {
        output.raw(format!("{}\n", serde_json::to_string_pretty(&info)?));
    } else {
        output.raw(format!(
            "kettle {} ({} {}) {}\n",
            info.version, info.commit, info.build_date, info.platform
        ));
    }
    Ok(())
}
