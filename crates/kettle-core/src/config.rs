//! Process-wide settings, read once from the environment at startup.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::Result;
use crate::paths;
use crate::repo::GitHubRepo;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository kettle updates itself from.
pub const SELF_REPO: &str = "kettleofketchup/kettle";

/// Fixed artifact URL for self-updates (a bare binary, not an archive).
pub const DEFAULT_SELF_UPDATE_URL: &str =
    "https://github.com/kettleofketchup/kettle/releases/latest/download/kettle";

/// Immutable configuration passed by reference to every component.
#[derive(Debug, Clone)]
pub struct Settings {
    /// User home directory.
    pub home: PathBuf,
    /// kettle's own config directory (generated profiles, completions).
    pub config_dir: PathBuf,
    /// Base URL of the release metadata API.
    pub api_base: String,
    /// Optional API token, sent as a bearer token.
    pub github_token: Option<String>,
    /// Repository self-updates are checked against.
    pub self_repo: GitHubRepo,
    /// Download URL for the self-update binary.
    pub self_update_url: String,
    /// Raw `SHELL` value, if set.
    pub shell: Option<String>,
    /// Raw `PATH` value, if set.
    pub path: Option<OsString>,
    /// Go workspace, `GOPATH` or `~/go`.
    pub gopath: PathBuf,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// | Variable            | Effect                                  |
    /// |---------------------|-----------------------------------------|
    /// | `KETTLE_CONFIG_DIR` | overrides `~/.config/kettle`            |
    /// | `KETTLE_API_URL`    | overrides the GitHub API base URL       |
    /// | `KETTLE_UPDATE_URL` | overrides the self-update download URL  |
    /// | `GITHUB_TOKEN`      | authenticates release metadata requests |
    pub fn from_env() -> Result<Self> {
        let home = paths::home_dir()?;
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let config_dir = var("KETTLE_CONFIG_DIR")
            .map_or_else(|| paths::default_config_dir(&home), PathBuf::from);
        let gopath = var("GOPATH").map_or_else(|| home.join("go"), PathBuf::from);

        Ok(Self {
            config_dir,
            api_base: var("KETTLE_API_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            github_token: var("GITHUB_TOKEN"),
            self_repo: GitHubRepo::from_static(SELF_REPO),
            self_update_url: var("KETTLE_UPDATE_URL")
                .unwrap_or_else(|| DEFAULT_SELF_UPDATE_URL.to_string()),
            shell: var("SHELL"),
            path: std::env::var_os("PATH"),
            gopath,
            home,
        })
    }

    /// Settings rooted at an explicit home directory, for tests and embedding.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            config_dir: paths::default_config_dir(&home),
            api_base: DEFAULT_API_BASE.to_string(),
            github_token: None,
            self_repo: GitHubRepo::from_static(SELF_REPO),
            self_update_url: DEFAULT_SELF_UPDATE_URL.to_string(),
            shell: None,
            path: None,
            gopath: home.join("go"),
            home,
        }
    }

    /// Preferred install directory for binaries.
    pub fn install_dir(&self) -> PathBuf {
        paths::install_dir(&self.home, self.path.as_deref())
    }

    /// Where `go install` puts binaries: `<gopath>/bin`.
    pub fn go_bin(&self) -> PathBuf {
        self.gopath.join("bin")
    }

    /// Whether [`Settings::go_bin`] is on `PATH`.
    pub fn go_bin_on_path(&self) -> bool {
        self.path
            .as_deref()
            .is_some_and(|p| paths::path_contains(p, &self.go_bin()))
    }
}
