// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Repository descriptor
//!
//! Resolves a user-supplied repository URL into platform, owner, name and
//! branch, and derives the URLs the checks fetch from. Parsing never touches
//! the network; [`Repo::resolve_default_branch`] is a separate step.

use crate::error::{FairbotError, Result};
use crate::http::{self, Fetch};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use url::Url;

/// Branch used when none is given and the platform API cannot tell us
pub const DEFAULT_BRANCH: &str = "main";

/// Supported code repository platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    GitHub,
    GitLab,
}

impl Platform {
    /// Infer the platform from a URL host
    pub fn from_host(host: &str) -> Option<Self> {
        match host.to_ascii_lowercase().as_str() {
            "github.com" | "www.github.com" => Some(Self::GitHub),
            "gitlab.com" | "www.gitlab.com" => Some(Self::GitLab),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => write!(f, "GitHub"),
            Self::GitLab => write!(f, "GitLab"),
        }
    }
}

/// Base URLs for the hosts the checks talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub github_api: String,
    pub github_raw: String,
    pub github_web: String,
    pub gitlab_web: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            github_api: "https://api.github.com".to_string(),
            github_raw: "https://raw.githubusercontent.com".to_string(),
            github_web: "https://github.com".to_string(),
            gitlab_web: "https://gitlab.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Route every host to one base URL (used against mock servers)
    pub fn single(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            github_api: base.clone(),
            github_raw: base.clone(),
            github_web: base.clone(),
            gitlab_web: base,
        }
    }
}

/// Optional inputs that refine which part of a repository is checked
#[derive(Debug, Clone, Default)]
pub struct RepoOptions {
    /// Branch, tag or commit
    pub branch: Option<String>,
    /// Subdirectory holding the README and configuration file
    pub path: Option<String>,
    /// Name of the configuration file on the remote
    pub config_file: Option<String>,
}

/// An immutable, resolved code repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    url: String,
    platform: Platform,
    owner: String,
    name: String,
    branch: String,
    explicit_branch: bool,
    path: Option<String>,
    config_file: Option<String>,
    endpoints: Endpoints,
}

impl Repo {
    /// Parse a repository URL against the public hosts
    pub fn parse(url: &str, options: RepoOptions) -> Result<Self> {
        Self::parse_with_endpoints(url, options, Endpoints::default())
    }

    /// Parse a repository URL, deriving fetch URLs from `endpoints`
    pub fn parse_with_endpoints(url: &str, options: RepoOptions, endpoints: Endpoints) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| FairbotError::MalformedUrl(format!("{}: {}", url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FairbotError::MalformedUrl(format!("{}: missing host", url)))?;
        let platform =
            Platform::from_host(host).ok_or_else(|| FairbotError::UnsupportedPlatform(host.to_string()))?;

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let (owner, name) = split_owner_name(platform, &segments)
            .ok_or_else(|| FairbotError::MalformedUrl(format!("{}: expected owner and repository name", url)))?;

        let path = options
            .path
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());

        debug!(%platform, %owner, %name, "Resolved repository");

        Ok(Self {
            url: url.to_string(),
            platform,
            owner,
            name,
            explicit_branch: options.branch.is_some(),
            branch: options.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            path,
            config_file: options.config_file,
            endpoints,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn config_file(&self) -> Option<&str> {
        self.config_file.as_deref()
    }

    /// REST API URL of the repository
    pub fn api_url(&self) -> String {
        match self.platform {
            Platform::GitHub => format!("{}/repos/{}/{}", self.endpoints.github_api, self.owner, self.name),
            Platform::GitLab => format!(
                "{}/api/v4/projects/{}",
                self.endpoints.gitlab_web,
                urlencoding::encode(&format!("{}/{}", self.owner, self.name))
            ),
        }
    }

    /// Web page of the repository
    pub fn web_url(&self) -> String {
        let base = match self.platform {
            Platform::GitHub => &self.endpoints.github_web,
            Platform::GitLab => &self.endpoints.gitlab_web,
        };
        format!("{}/{}/{}", base, self.owner, self.name)
    }

    /// Raw-content URL of `filename` on the configured branch and subdirectory
    pub fn raw_url(&self, filename: &str) -> String {
        let file = match &self.path {
            Some(path) => format!("{}/{}", path, filename),
            None => filename.to_string(),
        };
        match self.platform {
            Platform::GitHub => format!(
                "{}/{}/{}/{}/{}",
                self.endpoints.github_raw, self.owner, self.name, self.branch, file
            ),
            Platform::GitLab => format!(
                "{}/{}/{}/-/raw/{}/{}",
                self.endpoints.gitlab_web, self.owner, self.name, self.branch, file
            ),
        }
    }

    /// Ask the platform for its default branch when none was given.
    ///
    /// Keeps [`DEFAULT_BRANCH`] if the API cannot be reached or does not say.
    pub async fn resolve_default_branch(mut self, fetch: &dyn Fetch) -> Self {
        if self.explicit_branch {
            return self;
        }
        let reported = http::get_ok(fetch, &self.api_url())
            .await
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
            .and_then(|json| json.get("default_branch")?.as_str().map(str::to_string));

        match reported {
            Some(branch) => {
                debug!(%branch, "Using default branch reported by platform");
                self.branch = branch;
            }
            None => debug!(branch = DEFAULT_BRANCH, "Platform did not report a default branch"),
        }
        self
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn split_owner_name(platform: Platform, segments: &[&str]) -> Option<(String, String)> {
    let segments = match platform {
        Platform::GitHub => segments.get(..2)?,
        // GitLab routes everything below a repository through a "-" segment
        Platform::GitLab => match segments.iter().position(|s| *s == "-") {
            Some(dash) => &segments[..dash],
            None => segments,
        },
    };
    let (&name, owner) = segments.split_last()?;
    if owner.is_empty() {
        return None;
    }
    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return None;
    }
    Some((owner.join("/"), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StubFetch;

    #[test]
    fn test_parse_github() {
        let repo = Repo::parse("https://github.com/fair-software/howfairis", RepoOptions::default()).unwrap();
        assert_eq!(repo.platform(), Platform::GitHub);
        assert_eq!(repo.owner(), "fair-software");
        assert_eq!(repo.name(), "howfairis");
        assert_eq!(repo.branch(), DEFAULT_BRANCH);
        assert_eq!(repo.api_url(), "https://api.github.com/repos/fair-software/howfairis");
        assert_eq!(
            repo.raw_url("README.md"),
            "https://raw.githubusercontent.com/fair-software/howfairis/main/README.md"
        );
    }

    #[test]
    fn test_parse_github_ignores_trailing_segments() {
        let repo = Repo::parse(
            "https://github.com/owner/name.git/tree/develop/docs",
            RepoOptions::default(),
        )
        .unwrap();
        assert_eq!(repo.owner(), "owner");
        assert_eq!(repo.name(), "name");
    }

    #[test]
    fn test_parse_gitlab_with_subgroup() {
        let repo = Repo::parse(
            "https://gitlab.com/group/subgroup/project/-/tree/main",
            RepoOptions {
                branch: Some("dev".to_string()),
                path: Some("/docs/".to_string()),
                config_file: None,
            },
        )
        .unwrap();
        assert_eq!(repo.platform(), Platform::GitLab);
        assert_eq!(repo.owner(), "group/subgroup");
        assert_eq!(repo.name(), "project");
        assert_eq!(
            repo.api_url(),
            "https://gitlab.com/api/v4/projects/group%2Fsubgroup%2Fproject"
        );
        assert_eq!(
            repo.raw_url("README.rst"),
            "https://gitlab.com/group/subgroup/project/-/raw/dev/docs/README.rst"
        );
        assert_eq!(repo.web_url(), "https://gitlab.com/group/subgroup/project");
    }

    #[test]
    fn test_unsupported_platform() {
        let err = Repo::parse("https://bitbucket.org/owner/name", RepoOptions::default()).unwrap_err();
        assert!(matches!(err, FairbotError::UnsupportedPlatform(host) if host == "bitbucket.org"));
    }

    #[test]
    fn test_malformed_url() {
        for url in ["https://github.com/owner", "https://github.com/", "not a url", "https://gitlab.com/-/x"] {
            let err = Repo::parse(url, RepoOptions::default()).unwrap_err();
            assert!(matches!(err, FairbotError::MalformedUrl(_)), "{}: {:?}", url, err);
        }
    }

    #[test]
    fn test_endpoints_override() {
        let repo = Repo::parse_with_endpoints(
            "https://github.com/a/b",
            RepoOptions::default(),
            Endpoints::single("http://127.0.0.1:9000/"),
        )
        .unwrap();
        assert_eq!(repo.api_url(), "http://127.0.0.1:9000/repos/a/b");
        assert_eq!(repo.raw_url("x"), "http://127.0.0.1:9000/a/b/main/x");
        assert_eq!(repo.web_url(), "http://127.0.0.1:9000/a/b");
    }

    #[tokio::test]
    async fn test_resolve_default_branch_from_api() {
        let fetch = StubFetch::new().with_ok(
            "https://api.github.com/repos/a/b",
            r#"{"default_branch": "master", "private": false}"#,
        );
        let repo = Repo::parse("https://github.com/a/b", RepoOptions::default())
            .unwrap()
            .resolve_default_branch(&fetch)
            .await;
        assert_eq!(repo.branch(), "master");
    }

    #[tokio::test]
    async fn test_resolve_gitlab_default_branch() {
        let fetch = StubFetch::new().with_ok(
            "https://gitlab.com/api/v4/projects/group%2Fsub%2Fproject",
            r#"{"default_branch": "trunk", "visibility": "public"}"#,
        );
        let repo = Repo::parse("https://gitlab.com/group/sub/project", RepoOptions::default())
            .unwrap()
            .resolve_default_branch(&fetch)
            .await;
        assert_eq!(repo.branch(), "trunk");
        assert_eq!(
            repo.raw_url("README.md"),
            "https://gitlab.com/group/sub/project/-/raw/trunk/README.md"
        );
    }

    #[tokio::test]
    async fn test_resolve_default_branch_falls_back() {
        let fetch = StubFetch::new();
        let repo = Repo::parse("https://github.com/a/b", RepoOptions::default())
            .unwrap()
            .resolve_default_branch(&fetch)
            .await;
        assert_eq!(repo.branch(), DEFAULT_BRANCH);
        assert_eq!(fetch.requested(), vec!["https://api.github.com/repos/a/b".to_string()]);
    }

    #[tokio::test]
    async fn test_explicit_branch_is_not_resolved() {
        let fetch = StubFetch::new();
        let options = RepoOptions {
            branch: Some("v1.0".to_string()),
            ..Default::default()
        };
        let repo = Repo::parse("https://github.com/a/b", options)
            .unwrap()
            .resolve_default_branch(&fetch)
            .await;
        assert_eq!(repo.branch(), "v1.0");
        assert!(fetch.requested().is_empty());
    }
}
