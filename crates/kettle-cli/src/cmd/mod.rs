//! Subcommand implementations.

pub mod completions;
pub mod github;
pub mod install;
pub mod profile;
pub mod script;
pub mod update;
pub mod version;

use std::sync::Arc;

use kettle_core::{Context, Settings};

use crate::ui::Output;

/// Build the shared core context, reporting through `output`.
pub(crate) fn context(settings: &Settings, output: &Output) -> Context {
    Context::from_settings(settings, Arc::new(output.clone()))
}
