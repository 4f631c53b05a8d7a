//! The [`FeedFetcher`] trait.
//!
//! A fetcher turns a feed URL into the raw bytes of an iCalendar document.
//! Parsing is done separately by [`crate::ics::parse_feed`], so fetchers stay
//! transport-only and can be swapped out in tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::file::FileFeedFetcher;
use crate::http::{HttpConfig, HttpFeedFetcher};

/// A boxed future that is Send, used to keep the trait object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves the raw bytes of a calendar feed.
///
/// # Example
///
/// ```ignore
/// struct StaticFetcher(Vec<u8>);
///
/// impl FeedFetcher for StaticFetcher {
///     fn name(&self) -> &str {
///         "static"
///     }
///
///     fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, ProviderResult<Vec<u8>>> {
///         Box::pin(async move { Ok(self.0.clone()) })
///     }
/// }
/// ```
pub trait FeedFetcher: Send + Sync {
    /// Returns the name of this fetcher (e.g. "http", "file").
    fn name(&self) -> &str;

    /// Fetches the feed at `url`.
    ///
    /// Errors are [`ProviderError`]s with a fetch-side code: network failures,
    /// HTTP status errors, or a missing local file.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<Vec<u8>>>;
}

/// Picks a fetcher for the URL scheme.
///
/// `http`, `https` and `webcal` go over HTTP, `file` reads from disk.
pub fn fetcher_for_url(url: &Url, http: &HttpConfig) -> ProviderResult<Arc<dyn FeedFetcher>> {
    match url.scheme() {
        "http" | "https" | "webcal" => Ok(Arc::new(HttpFeedFetcher::new(http.clone())?)),
        "file" => Ok(Arc::new(FileFeedFetcher::new())),
        other => Err(ProviderError::configuration(format!(
            "unsupported feed URL scheme '{}' in {}",
            other, url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn picks_fetcher_by_scheme() {
        let http = HttpConfig::default();

        let fetcher = fetcher_for_url(&parse("https://example.com/a.ics"), &http).unwrap();
        assert_eq!(fetcher.name(), "http");

        let fetcher = fetcher_for_url(&parse("webcal://example.com/a.ics"), &http).unwrap();
        assert_eq!(fetcher.name(), "http");

        let fetcher = fetcher_for_url(&parse("file:///tmp/a.ics"), &http).unwrap();
        assert_eq!(fetcher.name(), "file");
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = fetcher_for_url(&parse("ftp://example.com/a.ics"), &HttpConfig::default())
            .err()
            .unwrap();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert!(err.message().contains("ftp"));
    }
}
