// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! (1/5) Publicly accessible version-controlled repository

use super::{record, Check, CheckContext, Recommendation, Signal};
use crate::http;
use crate::repo::Platform;
use async_trait::async_trait;

/// Repository accessibility check
pub struct RepositoryCheck;

#[async_trait]
impl Check for RepositoryCheck {
    fn recommendation(&self) -> Recommendation {
        Recommendation::Repository
    }

    async fn signals(&self, ctx: &CheckContext<'_>) -> Vec<Signal> {
        vec![self.has_open_repository(ctx).await]
    }
}

impl RepositoryCheck {
    /// The platform API reports the repository as public
    async fn has_open_repository(&self, ctx: &CheckContext<'_>) -> Signal {
        let json = http::get_ok(ctx.fetch, &ctx.repo.api_url())
            .await
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok());

        let passed = json.is_some_and(|json| match ctx.repo.platform() {
            Platform::GitHub => json.get("private").and_then(|v| v.as_bool()) == Some(false),
            Platform::GitLab => json.get("visibility").and_then(|v| v.as_str()) == Some("public"),
        });

        record(self.recommendation(), "has_open_repository", passed)
    }
}
