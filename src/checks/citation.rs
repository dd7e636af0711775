// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! (4/5) Citation

use super::{exists_signal, readme_signal, Check, CheckContext, Recommendation, Signal};
use async_trait::async_trait;

/// Citation metadata files looked up next to the README
const CITATION_FILES: [(&str, &str); 4] = [
    ("has_citation_file", "CITATION"),
    ("has_citationcff_file", "CITATION.cff"),
    ("has_codemeta_file", "codemeta.json"),
    ("has_zenodo_metadata_file", ".zenodo.json"),
];

const ZENODO_BADGES: [&str; 2] = [
    r"https://zenodo\.org/badge/DOI/10\.5281/zenodo\.[0-9]*\.svg",
    r"https://zenodo\.org/badge/[0-9]*\.svg",
];

/// Citation check
pub struct CitationCheck;

#[async_trait]
impl Check for CitationCheck {
    fn recommendation(&self) -> Recommendation {
        Recommendation::Citation
    }

    async fn signals(&self, ctx: &CheckContext<'_>) -> Vec<Signal> {
        let mut signals = Vec::with_capacity(CITATION_FILES.len() + 1);
        for (name, filename) in CITATION_FILES {
            let url = ctx.repo.raw_url(filename);
            signals.push(exists_signal(self.recommendation(), name, ctx.fetch, &url).await);
        }
        signals.push(readme_signal(
            self.recommendation(),
            "has_zenodo_badge",
            ctx.readme,
            &ZENODO_BADGES,
        ));
        signals
    }
}
