//! `owner/repo` coordinates of a source repository.

use std::fmt;
use std::str::FromStr;

/// A repository on the release host, e.g. `golangci/golangci-lint`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepo {
    /// Account or organization.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl GitHubRepo {
    /// Build from owner and repository name.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse a compile-time `owner/repo` constant. Malformed input yields an
    /// empty repository name rather than failing.
    pub(crate) fn from_static(slug: &'static str) -> Self {
        let (owner, repo) = slug.split_once('/').unwrap_or((slug, ""));
        Self::new(owner, repo)
    }
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Returned for a slug that is not `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected owner/repo, got '{0}'")]
pub struct InvalidRepo(pub String);

impl FromStr for GitHubRepo {
    type Err = InvalidRepo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/').split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(owner, repo))
            }
            _ => Err(InvalidRepo(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        let r: GitHubRepo = "golangci/golangci-lint".parse().unwrap();
        assert_eq!(r.owner, "golangci");
        assert_eq!(r.repo, "golangci-lint");
        assert_eq!(r.to_string(), "golangci/golangci-lint");

        assert!("golangci".parse::<GitHubRepo>().is_err());
        assert!("/x".parse::<GitHubRepo>().is_err());
        assert!("a/b/c".parse::<GitHubRepo>().is_err());
    }
}
