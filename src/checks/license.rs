// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! (2/5) License

use super::{record, Check, CheckContext, Recommendation, Signal};
use crate::http;
use crate::repo::Platform;
use async_trait::async_trait;
use scraper::{Html, Selector};

/// Marker GitLab shows for repositories without a license
const GITLAB_NO_LICENSE: &str = "No license. All rights reserved";

/// License check
pub struct LicenseCheck;

#[async_trait]
impl Check for LicenseCheck {
    fn recommendation(&self) -> Recommendation {
        Recommendation::License
    }

    async fn signals(&self, ctx: &CheckContext<'_>) -> Vec<Signal> {
        vec![self.has_license(ctx).await]
    }
}

impl LicenseCheck {
    async fn has_license(&self, ctx: &CheckContext<'_>) -> Signal {
        let passed = match ctx.repo.platform() {
            Platform::GitHub => {
                let url = format!("{}/license", ctx.repo.api_url());
                http::get_ok(ctx.fetch, &url).await.is_some()
            }
            Platform::GitLab => http::get_ok(ctx.fetch, &ctx.repo.web_url())
                .await
                .is_some_and(|html| gitlab_page_has_license(&html)),
        };
        record(self.recommendation(), "has_license", passed)
    }
}

/// The project buttons region exists and does not carry the no-license marker
pub fn gitlab_page_has_license(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(buttons) = Selector::parse("div.project-buttons") else {
        return false;
    };
    match document.select(&buttons).next() {
        Some(region) => !region.text().any(|t| t.contains(GITLAB_NO_LICENSE)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::Settings;
    use crate::http::StubFetch;
    use crate::readme::Readme;
    use crate::repo::Repo;

    async fn run(repo: Repo, fetch: &StubFetch) -> bool {
        let readme = Readme::missing();
        let config = config(Settings::default());
        let ctx = CheckContext {
            repo: &repo,
            readme: &readme,
            config: &config,
            fetch,
        };
        super::super::evaluate(&LicenseCheck, &ctx).await.compliant
    }

    #[tokio::test]
    async fn test_github_license_endpoint() {
        let fetch = StubFetch::new().with_ok("https://api.github.com/repos/owner/name/license", "{}");
        assert!(run(github(), &fetch).await);
        assert!(!run(github(), &StubFetch::new()).await);
    }

    #[tokio::test]
    async fn test_gitlab_page_with_license() {
        let page = r#"<html><body><div class="project-buttons"><a href="/owner/name/-/blob/main/LICENSE">Apache License 2.0</a></div></body></html>"#;
        let fetch = StubFetch::new().with_ok("https://gitlab.com/owner/name", page);
        assert!(run(gitlab(), &fetch).await);
        assert_eq!(fetch.requested(), vec!["https://gitlab.com/owner/name".to_string()]);
    }

    #[test]
    fn test_gitlab_page_without_license() {
        let page = r#"<div class="project-buttons"><span>No license. All rights reserved</span></div>"#;
        assert!(!gitlab_page_has_license(page));
    }

    #[test]
    fn test_gitlab_page_without_region() {
        assert!(!gitlab_page_has_license("<html><body><p>nothing here</p></body></html>"));
    }
}
