// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! (3/5) Registry
//!
//! A package registry listing is recognised by the badge it puts in the
//! README, or for GitHub Actions by a GitHub Marketplace listing.

use super::{readme_signal, record, Check, CheckContext, Recommendation, Signal};
use crate::http;
use crate::repo::Platform;
use async_trait::async_trait;

/// Badge URL patterns per registry
pub const BADGE_FAMILIES: [(&str, &[&str]); 10] = [
    ("has_ascl_badge", &[r"https://img\.shields\.io/badge/ascl.*"]),
    (
        "has_bintray_badge",
        &[
            r"https://api\.bintray\.com/packages/.*/.*/.*/images/download\.svg",
            r"https://img\.shields\.io/bintray/.*",
        ],
    ),
    (
        "has_bioconductor_badge",
        &[
            r"https://bioconductor\.org/shields/.*",
            r"https://www\.bioconductor\.org/shields/.*",
        ],
    ),
    (
        "has_conda_badge",
        &[
            r"https://anaconda\.org/.*/.*/badges/downloads\.svg",
            r"https://anaconda\.org/.*/.*/badges/installer/conda\.svg",
            r"https://anaconda\.org/.*/.*/badges/latest_release_date\.svg",
            r"https://anaconda\.org/.*/.*/badges/latest_release_relative_date\.svg",
            r"https://anaconda\.org/.*/.*/badges/platforms\.svg",
            r"https://anaconda\.org/.*/.*/badges/version\.svg",
            r"https://img\.shields\.io/conda/.*",
        ],
    ),
    (
        "has_cran_badge",
        &[
            r"https://cranlogs\.r-pkg\.org/badges/.*",
            r"https://www\.r-pkg\.org/badges/.*",
            r"https://img\.shields\.io/cran/.*",
        ],
    ),
    (
        "has_crates_badge",
        &[r"https://badgen\.net/crates/v/.*", r"https://img\.shields\.io/crates/.*"],
    ),
    (
        "has_maven_badge",
        &[
            r"https://badgen\.net/maven/v/maven-central/.*",
            r"https://img\.shields\.io/maven-central/.*",
            r"https://img\.shields\.io/maven-metadata/.*",
        ],
    ),
    (
        "has_npm_badge",
        &[
            r"https://badge\.fury\.io/js/.*",
            r"https://badgen\.net/npm/v/.*",
            r"https://img\.shields\.io/npm/.*",
        ],
    ),
    (
        "has_pypi_badge",
        &[
            r"https://pypi\.python\.org/pypi/",
            r"https://badge\.fury\.io/py/.*\.svg",
            r"https://badgen\.net/pypi/v/.*",
            r"https://img\.shields\.io/pypi/.*",
        ],
    ),
    (
        "has_rsd_badge",
        &[r"https://img\.shields\.io/badge/RSD-.*", r"https://img\.shields\.io/badge/rsd-.*"],
    ),
];

const MARKETPLACE_MARKERS: [&str; 2] = [
    "Use this GitHub Action with your project",
    "Add this Action to an existing workflow or create a new one.",
];

/// Registry check
pub struct RegistryCheck;

#[async_trait]
impl Check for RegistryCheck {
    fn recommendation(&self) -> Recommendation {
        Recommendation::Registry
    }

    async fn signals(&self, ctx: &CheckContext<'_>) -> Vec<Signal> {
        let mut signals: Vec<Signal> = BADGE_FAMILIES
            .iter()
            .map(|(name, patterns)| readme_signal(self.recommendation(), name, ctx.readme, patterns))
            .collect();
        signals.push(self.is_on_github_marketplace(ctx).await);
        signals
    }
}

impl RegistryCheck {
    /// The repository page advertises a Marketplace action (GitHub only)
    async fn is_on_github_marketplace(&self, ctx: &CheckContext<'_>) -> Signal {
        let passed = match ctx.repo.platform() {
            Platform::GitHub => http::get_ok(ctx.fetch, &ctx.repo.web_url())
                .await
                .is_some_and(|html| MARKETPLACE_MARKERS.iter().all(|m| html.contains(m))),
            Platform::GitLab => false,
        };
        record(self.recommendation(), "is_on_github_marketplace", passed)
    }
}
