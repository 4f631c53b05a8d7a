//! Feed fetching and parsing.
//!
//! - [`FeedFetcher`] - retrieves the raw bytes of a feed
//! - [`HttpFeedFetcher`] / [`FileFeedFetcher`] - the built-in fetchers
//! - [`parse_feed`] - iCalendar bytes to [`calcountdown_core::FeedComponent`]s
//! - [`ProviderError`] - error type shared by fetchers and the parser
//!
//! ```text
//!   feed URL ──▶ FeedFetcher ──▶ bytes ──▶ parse_feed ──▶ Vec<FeedComponent>
//! ```

pub mod error;
pub mod fetcher;
pub mod file;
pub mod http;
pub mod ics;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use fetcher::{BoxFuture, FeedFetcher, fetcher_for_url};
pub use file::FileFeedFetcher;
pub use http::{HttpConfig, HttpFeedFetcher};
pub use ics::parse_feed;
