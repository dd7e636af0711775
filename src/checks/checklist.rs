// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! (5/5) Software quality checklist

use super::{readme_signal, Check, CheckContext, Recommendation, Signal};
use async_trait::async_trait;

const BEST_PRACTICES_BADGES: [&str; 2] = [
    r"https://bestpractices\.coreinfrastructure\.org/projects/[0-9]*",
    r"https://www\.bestpractices\.dev/projects/[0-9]*",
];

/// Checklist check
pub struct ChecklistCheck;

#[async_trait]
impl Check for ChecklistCheck {
    fn recommendation(&self) -> Recommendation {
        Recommendation::Checklist
    }

    async fn signals(&self, ctx: &CheckContext<'_>) -> Vec<Signal> {
        vec![readme_signal(
            self.recommendation(),
            "has_core_infrastructures_badge",
            ctx.readme,
            &BEST_PRACTICES_BADGES,
        )]
    }
}
