//! Store configuration.

use calcountdown_core::DEFAULT_EVENT_DURATION;
use chrono::TimeDelta;

/// Store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long fetched events stay fresh.
    pub refresh_interval: TimeDelta,

    /// Duration assumed for events without an end.
    pub default_event_duration: TimeDelta,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            default_event_duration: DEFAULT_EVENT_DURATION,
        }
    }
}

impl StoreConfig {
    /// Feeds are refetched once a day unless configured otherwise.
    pub const DEFAULT_REFRESH_INTERVAL: TimeDelta = TimeDelta::days(1);

    /// Builder: set refresh interval.
    pub fn with_refresh_interval(mut self, interval: TimeDelta) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Builder: set default event duration.
    pub fn with_default_event_duration(mut self, duration: TimeDelta) -> Self {
        self.default_event_duration = duration;
        self
    }
}
