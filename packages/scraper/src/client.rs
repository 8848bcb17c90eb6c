//! Shared HTTP client for upstream page fetches.
//!
//! Wraps a single [`reqwest::Client`] configured from [`ScrapeConfig`]
//! (timeout, User-Agent, extra headers). The client is cheap to clone and
//! holds no per-request state, so one instance serves every extractor.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::{ScrapeConfig, ScrapeError};

/// HTTP client used by every extractor.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: reqwest::Client,
    config: Arc<ScrapeConfig>,
}

impl PageClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if a configured header is invalid or the
    /// underlying client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut header_map = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScrapeError::Parse(format!("invalid header name '{key}': {e}")))?;
            let val = HeaderValue::from_str(value)
                .map_err(|e| ScrapeError::Parse(format!("invalid header value '{value}': {e}")))?;
            header_map.insert(name, val);
        }

        let client = reqwest::Client::builder()
            .default_headers(header_map)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Upstream`] on network failure, timeout, or a
    /// non-2xx status.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        log::info!("Fetching {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Like [`Self::fetch_html`] but overrides the User-Agent for sites that
    /// block non-browser clients.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Upstream`] on network failure, timeout, or a
    /// non-2xx status.
    pub async fn fetch_html_as(&self, url: &str, user_agent: &str) -> Result<String, ScrapeError> {
        log::info!("Fetching {url} (custom user agent)");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetches `url` with the given query parameters and decodes the body
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Upstream`] on network failure, timeout, or a
    /// non-2xx status, and [`ScrapeError::Parse`] if the body is not valid
    /// JSON for `T`.
    pub async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ScrapeError> {
        log::info!("Fetching {url}");
        let body = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|e| ScrapeError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    use super::*;

    #[tokio::test]
    async fn silent_upstream_times_out() {
        // Connections are queued by the OS but never answered.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/wiki/Serie_A_2023-2024", listener.local_addr().unwrap());

        let client =
            PageClient::new(ScrapeConfig::new().with_timeout(Duration::from_secs(1))).unwrap();

        let started = Instant::now();
        let err = client.fetch_html(&url).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(err, ScrapeError::Upstream(_)), "{err:?}");
        assert!(err.to_string().starts_with("Request error"));
        drop(listener);
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = PageClient::new(ScrapeConfig::new()).unwrap();
        let err = client
            .fetch_html(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Upstream(_)));
    }

    #[test]
    fn invalid_configured_header_is_rejected() {
        let err = PageClient::new(ScrapeConfig::new().with_header("bad header", "x")).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }
}
