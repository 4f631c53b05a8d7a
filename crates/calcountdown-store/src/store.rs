//! Refresh-on-access event store.
//!
//! An [`EventStore`] holds the pruned events of one feed together with the
//! time they were fetched. Every query first checks whether the events are
//! older than the refresh interval and, if so, refetches the feed before
//! answering. There is no background timer.
//!
//! The state lives behind a single async mutex that stays locked while a
//! refresh is running, so concurrent queries never trigger two fetches and
//! never see events from one refresh paired with the timestamp of another.

use std::fmt;
use std::sync::Arc;

use calcountdown_core::{Event, Upcoming, closest_event, in_event, prune};
use calcountdown_providers::{
    FeedFetcher, HttpConfig, ProviderError, fetcher_for_url, parse_feed,
};
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct StoreState {
    events: Vec<Event>,
    /// `None` until the first successful refresh.
    last_refreshed: Option<DateTime<Utc>>,
}

impl StoreState {
    fn is_stale(&self, now: DateTime<Utc>, interval: TimeDelta) -> bool {
        match self.last_refreshed {
            Some(at) => now - at > interval,
            None => true,
        }
    }
}

/// The next matching event, detached from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextEvent {
    pub event: Event,
    /// Time left until the event starts.
    pub remaining: TimeDelta,
}

impl NextEvent {
    /// Borrows this as a core [`Upcoming`] for formatting.
    pub fn as_upcoming(&self) -> Upcoming<'_> {
        Upcoming {
            event: &self.event,
            remaining: self.remaining,
        }
    }
}

/// Cached events of a single calendar feed.
pub struct EventStore {
    url: String,
    fetcher: Arc<dyn FeedFetcher>,
    config: StoreConfig,
    state: Mutex<StoreState>,
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("url", &self.url)
            .field("fetcher", &self.fetcher.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EventStore {
    /// Creates an empty store. Nothing is fetched until the first query.
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn FeedFetcher>, config: StoreConfig) -> Self {
        Self {
            url: url.into(),
            fetcher,
            config,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Creates a store and performs the initial refresh.
    ///
    /// # Errors
    ///
    /// Returns the refresh error if the feed cannot be fetched or parsed.
    pub async fn open(
        url: impl Into<String>,
        fetcher: Arc<dyn FeedFetcher>,
        config: StoreConfig,
        now: DateTime<Utc>,
    ) -> StoreResult<Self> {
        let store = Self::new(url, fetcher, config);
        store.refresh(now).await?;
        Ok(store)
    }

    /// Creates an empty store, picking the fetcher from the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Setup`] if the URL does not parse or its scheme
    /// is not supported.
    pub fn for_url(url: &str, http: &HttpConfig, config: StoreConfig) -> StoreResult<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            StoreError::setup(
                url,
                ProviderError::configuration(format!("invalid feed URL: {}", e)).with_source(e),
            )
        })?;
        let fetcher = fetcher_for_url(&parsed, http).map_err(|e| StoreError::setup(url, e))?;
        Ok(Self::new(url, fetcher, config))
    }

    /// Returns the feed URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Refreshes the events if they are older than the refresh interval.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Refresh`] if a due refresh fails. The previous
    /// events and refresh time are kept, so the next call retries.
    pub async fn ensure_fresh(&self, now: DateTime<Utc>) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if !state.is_stale(now, self.config.refresh_interval) {
            return Ok(());
        }
        debug!(url = %self.url, last_refreshed = ?state.last_refreshed, "Events are stale");
        self.refresh_locked(&mut state, now).await
    }

    /// Refetches the feed regardless of freshness.
    pub async fn refresh(&self, now: DateTime<Utc>) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state, now).await
    }

    async fn refresh_locked(&self, state: &mut StoreState, now: DateTime<Utc>) -> StoreResult<()> {
        let events = match self.load(now).await {
            Ok(events) => events,
            Err(e) => {
                warn!(
                    url = %self.url,
                    error = %e,
                    kept = state.events.len(),
                    "Refresh failed, keeping previous events"
                );
                return Err(StoreError::refresh(&self.url, e));
            }
        };

        info!(url = %self.url, events = events.len(), "Feed refreshed");
        state.events = events;
        state.last_refreshed = Some(now);
        Ok(())
    }

    async fn load(&self, now: DateTime<Utc>) -> Result<Vec<Event>, ProviderError> {
        let bytes = self.fetcher.fetch(&self.url).await?;
        let components = parse_feed(&bytes)?;
        Ok(prune(&components, now))
    }

    /// Finds the next event whose summary ends with `filter_suffix`.
    ///
    /// # Errors
    ///
    /// Returns the refresh error if a due refresh fails.
    pub async fn closest_event(
        &self,
        filter_suffix: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<NextEvent>> {
        self.ensure_fresh(now).await?;
        let state = self.state.lock().await;
        Ok(
            closest_event(&state.events, filter_suffix, now).map(|upcoming| NextEvent {
                event: upcoming.event.clone(),
                remaining: upcoming.remaining,
            }),
        )
    }

    /// Checks whether an event is in progress.
    ///
    /// # Errors
    ///
    /// Returns the refresh error if a due refresh fails.
    pub async fn in_event(&self, now: DateTime<Utc>) -> StoreResult<bool> {
        self.ensure_fresh(now).await?;
        let state = self.state.lock().await;
        Ok(in_event(
            &state.events,
            now,
            self.config.default_event_duration,
        ))
    }

    /// Returns a copy of the current events without refreshing.
    pub async fn events(&self) -> Vec<Event> {
        self.state.lock().await.events.clone()
    }

    /// Returns when the events were last fetched, if ever.
    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_refreshed
    }

    /// Returns true if the next query would refetch the feed.
    pub async fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.state
            .lock()
            .await
            .is_stale(now, self.config.refresh_interval)
    }
}
