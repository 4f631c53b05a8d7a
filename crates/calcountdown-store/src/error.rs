//! Store error types.

use calcountdown_providers::ProviderError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Fetching or parsing the feed failed. The previous events are kept.
    #[error("Failed to refresh {url}: {source}")]
    Refresh {
        url: String,
        #[source]
        source: ProviderError,
    },

    /// No fetcher could be set up for the feed URL.
    #[error("Cannot open feed {url}: {source}")]
    Setup {
        url: String,
        #[source]
        source: ProviderError,
    },
}

impl StoreError {
    /// Creates a refresh error.
    pub fn refresh(url: impl Into<String>, source: ProviderError) -> Self {
        Self::Refresh {
            url: url.into(),
            source,
        }
    }

    pub fn setup(url: impl Into<String>, source: ProviderError) -> Self {
        Self::Setup {
            url: url.into(),
            source,
        }
    }

    /// Returns the underlying provider error.
    pub fn provider_error(&self) -> &ProviderError {
        match self {
            Self::Refresh { source, .. } | Self::Setup { source, .. } => source,
        }
    }

    /// Returns true if the next refresh attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Refresh { source, .. } if source.is_retryable())
    }
}
