//! Local feed fetcher for `file://` URLs.

use std::io::ErrorKind;

use tracing::debug;
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::fetcher::{BoxFuture, FeedFetcher};

const PROVIDER_NAME: &str = "file";

/// Reads feeds from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFeedFetcher;

impl FileFeedFetcher {
    pub fn new() -> Self {
        Self
    }

    async fn read(&self, url: &str) -> ProviderResult<Vec<u8>> {
        let path = Url::parse(url)
            .ok()
            .filter(|u| u.scheme() == "file")
            .and_then(|u| u.to_file_path().ok())
            .ok_or_else(|| {
                ProviderError::configuration(format!("not a local file URL: {}", url))
                    .with_provider(PROVIDER_NAME)
            })?;

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            let err = match e.kind() {
                ErrorKind::NotFound => {
                    ProviderError::not_found(format!("{} does not exist", path.display()))
                }
                ErrorKind::PermissionDenied => {
                    ProviderError::access_denied(format!("cannot read {}", path.display()))
                }
                _ => ProviderError::network(format!("failed to read {}: {}", path.display(), e)),
            };
            err.with_provider(PROVIDER_NAME).with_source(e)
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "Feed read from disk");
        Ok(bytes)
    }
}

impl FeedFetcher for FileFeedFetcher {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<Vec<u8>>> {
        Box::pin(self.read(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use std::io::Write;

    #[tokio::test]
    async fn reads_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n")
            .unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let body = FileFeedFetcher::new().fetch(url.as_str()).await.unwrap();
        assert!(body.starts_with(b"BEGIN:VCALENDAR"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("gone.ics")).unwrap();

        let err = FileFeedFetcher::new().fetch(url.as_str()).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(err.provider(), Some("file"));
    }

    #[tokio::test]
    async fn rejects_non_file_url() {
        let err = FileFeedFetcher::new()
            .fetch("https://example.com/feed.ics")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
    }
}
