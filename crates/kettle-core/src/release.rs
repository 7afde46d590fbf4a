//! Release metadata sources.

use async_trait::async_trait;
use kettle_schema::ReleaseAsset;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{KettleError, Result};
use crate::repo::GitHubRepo;

/// A published release and its downloadable assets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Tag the release was cut from, e.g. `v1.64.2`.
    pub tag_name: String,
    /// Files attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Asset names in published order.
    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.name.as_str()).collect()
    }

    /// Look up an asset by exact name.
    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// Anything that can answer "what is the latest release of `owner/repo`".
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the latest non-prerelease release.
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Release>;
}

/// GitHub REST v3 adapter.
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubReleases {
    pub fn new(client: Client, api_base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn latest_url(&self, repo: &GitHubRepo) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base, repo.owner, repo.repo
        )
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Release> {
        let url = self.latest_url(repo);
        tracing::debug!(%url, "fetching latest release");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| KettleError::network("fetch release", e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(KettleError::HttpStatus { url, status });
        }

        response
            .json::<Release>()
            .await
            .map_err(|e| KettleError::network("decode release", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "tag_name": "v1.64.2",
        "name": "v1.64.2",
        "assets": [
            {"name": "tool-1.64.2-linux-amd64.tar.gz",
             "browser_download_url": "https://example.com/a.tar.gz",
             "size": 100},
            {"name": "tool-1.64.2-darwin-arm64.tar.gz",
             "browser_download_url": "https://example.com/b.tar.gz"}
        ]
    }"#;

    #[tokio::test]
    async fn test_latest_release_decodes_assets() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/tool/releases/latest")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(BODY)
            .create_async()
            .await;

        let source = GitHubReleases::new(Client::new(), server.url(), Some("secret".into()));
        let release = source
            .latest_release(&GitHubRepo::new("acme", "tool"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag_name, "v1.64.2");
        assert_eq!(
            release.asset_names(),
            ["tool-1.64.2-linux-amd64.tar.gz", "tool-1.64.2-darwin-arm64.tar.gz"]
        );
        assert_eq!(
            release.asset("tool-1.64.2-darwin-arm64.tar.gz").unwrap().download_url,
            "https://example.com/b.tar.gz"
        );
    }

    #[tokio::test]
    async fn test_latest_release_requires_ok() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/missing/releases/latest")
            .with_status(404)
            .create_async()
            .await;

        let source = GitHubReleases::new(Client::new(), server.url(), None);
        let err = source
            .latest_release(&GitHubRepo::new("acme", "missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, KettleError::HttpStatus { status, .. } if status == 404));
    }
}
