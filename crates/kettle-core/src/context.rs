//! Shared operation context.
//!
//! Groups the collaborators every acquisition step needs so they are built
//! once in `main` and passed by reference.

use std::fmt;
use std::sync::Arc;

use kettle_schema::PlatformSignature;

use crate::config::Settings;
use crate::release::{GitHubReleases, ReleaseSource};
use crate::reporter::Reporter;

#[derive(Clone)]
pub struct Context {
    pub client: reqwest::Client,
    pub releases: Arc<dyn ReleaseSource>,
    pub platform: PlatformSignature,
    pub reporter: Arc<dyn Reporter>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(
        client: reqwest::Client,
        releases: Arc<dyn ReleaseSource>,
        platform: PlatformSignature,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            client,
            releases,
            platform,
            reporter,
        }
    }

    /// Context talking to the GitHub API configured in `settings`, for the
    /// detected host.
    pub fn from_settings(settings: &Settings, reporter: Arc<dyn Reporter>) -> Self {
        let client = reqwest::Client::new();
        let releases = GitHubReleases::new(
            client.clone(),
            settings.api_base.clone(),
            settings.github_token.clone(),
        );
        Self::new(
            client,
            Arc::new(releases),
            crate::platform::current().clone(),
            reporter,
        )
    }
}
