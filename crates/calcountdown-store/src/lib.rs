//! Refresh-on-access event store.
//!
//! This crate keeps the pruned events of one calendar feed in memory and
//! refetches them lazily once they are older than the refresh interval.
//!
//! # Example
//!
//! ```rust,no_run
//! use calcountdown_providers::HttpConfig;
//! use calcountdown_store::{EventStore, StoreConfig};
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EventStore::for_url(
//!         "https://example.com/feed.ics",
//!         &HttpConfig::default(),
//!         StoreConfig::default(),
//!     )?;
//!
//!     if let Some(next) = store.closest_event("", Utc::now()).await? {
//!         println!("{}", calcountdown_core::format_countdown(&next.as_upcoming()));
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{EventStore, NextEvent};
