//! HTTP feed fetcher.
//!
//! Feeds are downloaded with a plain GET. `webcal://` URLs are the same
//! feeds served over HTTPS and are rewritten before the request.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, trace, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::fetcher::{BoxFuture, FeedFetcher};

const PROVIDER_NAME: &str = "http";

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("calcountdown/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches feeds over HTTP(S).
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    /// Creates a new fetcher with the given configuration.
    pub fn new(config: HttpConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_provider(PROVIDER_NAME)
            })?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> ProviderResult<Vec<u8>> {
        let url = request_url(url);
        trace!(url = %url, "Fetching feed");

        let response = self
            .client
            .get(&*url)
            .header("Accept", "text/calendar, */*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                ProviderError::network(format!("Request to {} failed: {}", url, e))
                    .with_provider(PROVIDER_NAME)
                    .with_source(e)
            })?;

        handle_response(response)
            .await
            .map_err(|e| e.with_provider(PROVIDER_NAME))
    }
}

impl FeedFetcher for HttpFeedFetcher {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<Vec<u8>>> {
        Box::pin(self.get(url))
    }
}

/// Rewrites `webcal://` to `https://`, leaves anything else untouched.
fn request_url(url: &str) -> std::borrow::Cow<'_, str> {
    match url.get(..9) {
        Some(scheme) if scheme.eq_ignore_ascii_case("webcal://") => {
            format!("https://{}", &url[9..]).into()
        }
        _ => url.into(),
    }
}

async fn handle_response(response: Response) -> ProviderResult<Vec<u8>> {
    let status = response.status();
    trace!(status = %status, "Received response");

    match status {
        s if s.is_success() => {
            let body = response.bytes().await.map_err(|e| {
                ProviderError::network(format!("Failed to read response: {}", e)).with_source(e)
            })?;
            debug!(bytes = body.len(), "Feed downloaded");
            Ok(body.to_vec())
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::access_denied(
            format!("Access to feed denied ({})", status),
        )),
        StatusCode::NOT_FOUND | StatusCode::GONE => {
            Err(ProviderError::not_found(format!("Feed not found ({})", status)))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            Err(ProviderError::rate_limited("Too many requests to server"))
        }
        s if s.is_server_error() => Err(ProviderError::server(format!("Server error ({})", s))),
        s => {
            warn!(status = %s, "Unexpected response status");
            Err(ProviderError::unexpected_status(format!(
                "Unexpected status {}",
                s
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    const FEED: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";

    fn fetcher() -> HttpFeedFetcher {
        HttpFeedFetcher::new(HttpConfig::default().with_timeout(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("calcountdown/"));
    }

    #[test]
    fn webcal_is_rewritten() {
        assert_eq!(
            request_url("webcal://example.com/feed.ics"),
            "https://example.com/feed.ics"
        );
        assert_eq!(
            request_url("WEBCAL://example.com/feed.ics"),
            "https://example.com/feed.ics"
        );
        assert_eq!(
            request_url("http://example.com/feed.ics"),
            "http://example.com/feed.ics"
        );
    }

    #[tokio::test]
    async fn fetches_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/feed.ics")
            .with_status(200)
            .with_header("content-type", "text/calendar")
            .with_body(FEED)
            .create_async()
            .await;

        let url = format!("{}/feed.ics", server.url());
        let body = fetcher().fetch(&url).await.unwrap();

        assert_eq!(body, FEED.as_bytes());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sends_user_agent_and_calendar_accept() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/feed.ics")
            .match_header(
                "user-agent",
                mockito::Matcher::Regex("^calcountdown/".to_string()),
            )
            .match_header(
                "accept",
                mockito::Matcher::Regex("^text/calendar".to_string()),
            )
            .with_status(200)
            .with_body(FEED)
            .create_async()
            .await;

        let url = format!("{}/feed.ics", server.url());
        fetcher().fetch(&url).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.ics")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing.ics", server.url());
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(err.provider(), Some("http"));
    }

    #[tokio::test]
    async fn server_error_is_retryable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/feed.ics")
            .with_status(503)
            .create_async()
            .await;

        let url = format!("{}/feed.ics", server.url());
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn forbidden_maps_to_access_denied() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/private.ics")
            .with_status(403)
            .create_async()
            .await;

        let url = format!("{}/private.ics", server.url());
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::AccessDenied);
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let err = fetcher()
            .fetch("http://127.0.0.1:1/feed.ics")
            .await
            .unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::NetworkError);
        assert!(err.is_retryable());
    }
}
