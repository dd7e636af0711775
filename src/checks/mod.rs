// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Checks for the five fair-software.eu recommendations
//!
//! Every check gathers a set of independent [`Signal`]s, from regexes over
//! the README or from live requests, and is satisfied when any one of them
//! passes. A configured force-flag replaces the check entirely.

pub mod checklist;
pub mod citation;
pub mod license;
pub mod registry;
pub mod repository;

use crate::config::Config;
use crate::http::{self, Fetch};
use crate::readme::Readme;
use crate::repo::Repo;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

pub use checklist::ChecklistCheck;
pub use citation::CitationCheck;
pub use license::LicenseCheck;
pub use registry::RegistryCheck;
pub use repository::RepositoryCheck;

/// The five recommendations, in badge order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Repository,
    License,
    Registry,
    Citation,
    Checklist,
}

impl Recommendation {
    pub const ALL: [Recommendation; 5] = [
        Self::Repository,
        Self::License,
        Self::Registry,
        Self::Citation,
        Self::Checklist,
    ];

    /// Position in a compliance vector
    pub fn index(self) -> usize {
        match self {
            Self::Repository => 0,
            Self::License => 1,
            Self::Registry => 2,
            Self::Citation => 3,
            Self::Checklist => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::License => "license",
            Self::Registry => "registry",
            Self::Citation => "citation",
            Self::Checklist => "checklist",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/5) {}", self.index() + 1, self.name())
    }
}

/// Everything a check may look at
pub struct CheckContext<'a> {
    pub repo: &'a Repo,
    pub readme: &'a Readme,
    pub config: &'a Config,
    pub fetch: &'a dyn Fetch,
}

/// Outcome of one independent test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub passed: bool,
}

impl Signal {
    pub fn new(name: &str, passed: bool) -> Self {
        Self {
            name: name.to_string(),
            passed,
        }
    }
}

/// Result of evaluating one recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub recommendation: Recommendation,
    pub compliant: bool,
    /// Whether the result came from a force-flag
    pub forced: bool,
    pub signals: Vec<Signal>,
}

/// Trait for all checks
#[async_trait]
pub trait Check: Send + Sync {
    /// Recommendation this check decides
    fn recommendation(&self) -> Recommendation;

    /// Evaluate every signal for the recommendation
    async fn signals(&self, ctx: &CheckContext<'_>) -> Vec<Signal>;
}

/// The five checks in badge order
pub fn all() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(RepositoryCheck),
        Box::new(LicenseCheck),
        Box::new(RegistryCheck),
        Box::new(CitationCheck),
        Box::new(ChecklistCheck),
    ]
}

/// Run a check, honouring its force-flag.
///
/// A forced check performs no requests and reports no signals.
pub async fn evaluate(check: &dyn Check, ctx: &CheckContext<'_>) -> CheckOutcome {
    let recommendation = check.recommendation();

    if let Some(forced) = ctx.config.force(recommendation) {
        info!(check = recommendation.name(), forced, "Check forced by configuration");
        return CheckOutcome {
            recommendation,
            compliant: forced,
            forced: true,
            signals: Vec::new(),
        };
    }

    let signals = check.signals(ctx).await;
    let compliant = signals.iter().any(|s| s.passed);
    info!(check = recommendation.name(), compliant, "Check evaluated");

    CheckOutcome {
        recommendation,
        compliant,
        forced: false,
        signals,
    }
}

/// Signal that passes when any of `patterns` occurs in the README.
///
/// A missing README fails every such signal.
pub(crate) fn readme_signal(check: Recommendation, name: &str, readme: &Readme, patterns: &[&str]) -> Signal {
    let passed = match readme.text.as_deref() {
        Some(text) => patterns.iter().any(|pattern| match Regex::new(pattern) {
            Ok(re) => re.is_match(text),
            Err(e) => {
                warn!(%pattern, error = %e, "Skipping invalid pattern");
                false
            }
        }),
        None => false,
    };
    record(check, name, passed)
}

/// Signal that passes when `url` answers with a success status
pub(crate) async fn exists_signal(check: Recommendation, name: &str, fetch: &dyn Fetch, url: &str) -> Signal {
    let passed = http::get_ok(fetch, url).await.is_some();
    record(check, name, passed)
}

/// Log and build a signal
pub(crate) fn record(check: Recommendation, name: &str, passed: bool) -> Signal {
    info!(check = check.name(), signal = name, passed, "Signal evaluated");
    Signal::new(name, passed)
}
