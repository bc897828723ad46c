//! HTTP client for the Reader engine
//!
//! The engine is addressed as `{base}/{target-url}` and picks the output
//! representation from the `X-Respond-With` header.

use crate::error::FetchError;
use crate::types::ResponseKind;
use crate::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, RESPOND_WITH_HEADER};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// Capability to retrieve a URL from the Reader engine
///
/// The adapter depends on this trait rather than on [`ReaderClient`]
/// so that tests can substitute a recording stub.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch `url` rendered as `kind`
    ///
    /// Performs exactly one attempt. Returns the response body verbatim
    /// on a 2xx status.
    async fn fetch(&self, url: &str, kind: ResponseKind) -> Result<String, FetchError>;
}

/// Builder for [`ReaderClient`]
#[derive(Debug, Clone)]
pub struct ReaderClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for ReaderClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ReaderClientBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Reader engine base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ReaderClient, FetchError> {
        Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;
        let base_url = self.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(self.timeout)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        Ok(ReaderClient {
            http,
            base_url,
            timeout: self.timeout,
        })
    }
}

/// Reader engine client
///
/// Wraps a single pooled [`reqwest::Client`]; clones share the pool.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReaderClient {
    /// Create a new client builder
    pub fn builder() -> ReaderClientBuilder {
        ReaderClientBuilder::new()
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured total timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full upstream address for a target URL
    ///
    /// The target is appended verbatim; it is not re-encoded or validated.
    pub fn request_url(&self, url: &str) -> String {
        format!("{}/{}", self.base_url, url)
    }
}

#[async_trait]
impl Upstream for ReaderClient {
    async fn fetch(&self, url: &str, kind: ResponseKind) -> Result<String, FetchError> {
        let request_url = self.request_url(url);
        debug!(url, kind = %kind, request_url = %request_url, "Fetching through Reader");

        let response = self
            .http
            .get(&request_url)
            .header(RESPOND_WITH_HEADER, kind.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(url, kind = %kind, error = %e, "Reader request failed");
                FetchError::from_reqwest(e)
            })?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            content_type = ?response.headers().get("content-type"),
            "Reader response received"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url, kind = %kind, status = status.as_u16(), "Reader returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        debug!(url, kind = %kind, size = body.len(), "Reader fetch succeeded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = ReaderClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = ReaderClient::builder()
            .base_url("http://reader:3000/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://reader:3000");
        assert_eq!(
            client.request_url("https://example.com/a"),
            "http://reader:3000/https://example.com/a"
        );
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ReaderClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(FetchError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_request_url_keeps_target_verbatim() {
        let client = ReaderClient::builder().build().unwrap();
        assert_eq!(
            client.request_url("example.com/page?q=a b"),
            "http://localhost:3000/example.com/page?q=a b"
        );
    }
}
