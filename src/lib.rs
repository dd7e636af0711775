// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! fairbot: fair-software.eu compliance checker
//!
//! Checks a GitHub or GitLab repository against the five recommendations of
//! fair-software.eu:
//!
//! - publicly accessible, version-controlled repository
//! - license
//! - registry listing
//! - citation metadata
//! - software quality checklist
//!
//! and compares the result with the fair-software.eu badge in its README.
//!
//! Part of the Hyperpolymath Gitbot Fleet.

pub mod badge;
pub mod checks;
pub mod compliance;
pub mod config;
pub mod error;
pub mod http;
pub mod readme;
pub mod report;
pub mod repo;

pub use checks::{Check, CheckContext, CheckOutcome, Recommendation, Signal};
pub use compliance::{Compliance, Symbols};
pub use config::{Config, Settings};
pub use error::{FairbotError, Result};
pub use http::{Fetch, HttpClient};
pub use readme::{Readme, ReadmeFormat};
pub use report::{Reporter, Verdict};
pub use repo::{Endpoints, Platform, Repo, RepoOptions};

use std::path::PathBuf;
use tracing::{info, warn};

/// What to check and where its configuration comes from
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    /// Repository URL
    pub url: String,
    /// Branch, subdirectory and remote configuration filename
    pub options: RepoOptions,
    /// Local configuration file
    pub config_file: Option<PathBuf>,
    /// Skip the configuration file on the remote
    pub ignore_remote_config: bool,
    /// Hosts to fetch from
    pub endpoints: Endpoints,
}

impl CheckRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }
}

/// Outcome of checking a repository
#[derive(Debug, Clone)]
pub struct Assessment {
    pub repo: Repo,
    pub readme: Readme,
    pub outcomes: Vec<CheckOutcome>,
    pub compliance: Compliance,
}

impl Assessment {
    /// Badge snippet for the computed compliance, in the README's format
    pub fn badge(&self) -> String {
        badge::snippet(&self.compliance, self.readme.format)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::of(self)
    }
}

/// A repository with its configuration and README loaded, ready to be checked
pub struct Checker<'a> {
    fetch: &'a dyn Fetch,
    repo: Repo,
    config: Config,
    readme: Readme,
}

impl<'a> Checker<'a> {
    /// Fetch the README for `repo`
    pub async fn new(fetch: &'a dyn Fetch, repo: Repo, config: Config) -> Self {
        let include_comments = config.include_comments().unwrap_or(false);
        let readme = Readme::fetch(fetch, &repo, include_comments).await;
        Self {
            fetch,
            repo,
            config,
            readme,
        }
    }

    pub fn repo(&self) -> &Repo {
        &self.repo
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn readme(&self) -> &Readme {
        &self.readme
    }

    /// Run the five checks in badge order
    pub async fn check_five_recommendations(self) -> Assessment {
        let ctx = CheckContext {
            repo: &self.repo,
            readme: &self.readme,
            config: &self.config,
            fetch: self.fetch,
        };

        let mut outcomes = Vec::with_capacity(Recommendation::ALL.len());
        for check in checks::all() {
            outcomes.push(checks::evaluate(check.as_ref(), &ctx).await);
        }

        let mut values = [None; 5];
        for outcome in &outcomes {
            values[outcome.recommendation.index()] = Some(outcome.compliant);
        }
        let compliance = Compliance::from_values(values);

        Assessment {
            repo: self.repo,
            readme: self.readme,
            outcomes,
            compliance,
        }
    }
}

/// Resolve the repository and configuration, then run every check
pub async fn check(fetch: &dyn Fetch, request: &CheckRequest) -> Result<Assessment> {
    info!(url = %request.url, "Checking compliance with fair-software.eu");

    let repo = Repo::parse_with_endpoints(&request.url, request.options.clone(), request.endpoints.clone())?
        .resolve_default_branch(fetch)
        .await;
    info!(repository = %repo, platform = %repo.platform(), branch = repo.branch(), "Repository resolved");

    let config = Config::resolve(
        fetch,
        &repo,
        request.config_file.as_deref(),
        request.ignore_remote_config,
    )
    .await?;

    let checker = Checker::new(fetch, repo, config).await;
    if checker.readme().is_missing() {
        warn!("No README found; README-based signals will fail");
    }

    let assessment = checker.check_five_recommendations().await;
    info!(
        compliance = %assessment.compliance,
        compliant = assessment.compliance.compliant_count(),
        "Compliance calculated"
    );
    Ok(assessment)
}
