// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! HTTP access for checks and loaders
//!
//! Every remote signal goes through the [`Fetch`] trait. Requests are plain
//! unauthenticated GETs, awaited one at a time, with no retries or caching.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can GET a URL
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url`. Transport failures are errors; HTTP error statuses are not.
    async fn get(&self, url: &str) -> Result<Response>;
}

/// GET `url` and return the body only if the request succeeded with a 2xx status
pub async fn get_ok(fetch: &dyn Fetch, url: &str) -> Option<String> {
    match fetch.get(url).await {
        Ok(response) if response.is_success() => Some(response.body),
        Ok(response) => {
            debug!(%url, status = response.status, "Request unsuccessful");
            None
        }
        Err(e) => {
            debug!(%url, error = %e, "Request failed");
            None
        }
    }
}

/// [`Fetch`] implementation backed by reqwest
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client identifying itself as fairbot
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fairbot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn get(&self, url: &str) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Response { status, body })
    }
}

#[cfg(test)]
pub(crate) use stub::StubFetch;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success_range() {
        let ok = Response { status: 204, body: String::new() };
        let missing = Response { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }

    #[tokio::test]
    async fn test_get_ok_filters_error_status() {
        let fetch = StubFetch::new()
            .with_ok("https://example.org/a", "body")
            .with_status("https://example.org/b", 500, "oops");
        assert_eq!(get_ok(&fetch, "https://example.org/a").await.as_deref(), Some("body"));
        assert_eq!(get_ok(&fetch, "https://example.org/b").await, None);
        assert_eq!(get_ok(&fetch, "https://example.org/c").await, None);
    }
}
