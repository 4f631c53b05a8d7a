//! Queries over a pruned event list.
//!
//! Both queries are pure: they take the event list and the query time and
//! never fail.

use chrono::{DateTime, TimeDelta, Utc};

use crate::event::Event;

/// Fallback duration for events without an end.
pub const DEFAULT_EVENT_DURATION: TimeDelta = TimeDelta::minutes(90);

/// The closest upcoming event and how long until it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upcoming<'a> {
    /// The matched event.
    pub event: &'a Event,
    /// Time left until the event starts. Always positive.
    pub remaining: TimeDelta,
}

impl Upcoming<'_> {
    /// Whole days left.
    pub fn days(&self) -> i64 {
        self.remaining.num_days()
    }

    /// Hours left after removing whole days (0-23).
    pub fn hours(&self) -> i64 {
        self.remaining.num_hours() % 24
    }

    /// Minutes left after removing whole hours (0-59).
    pub fn minutes(&self) -> i64 {
        self.remaining.num_minutes() % 60
    }

    /// Seconds left after removing whole minutes (0-59). Sub-second time is dropped.
    pub fn seconds(&self) -> i64 {
        self.remaining.num_seconds() % 60
    }
}

/// Finds the earliest event that has not started yet and whose summary ends
/// with `filter_suffix` (case-insensitive; an empty suffix matches anything).
///
/// Events starting exactly at `now` are not upcoming. When several events
/// start at the same time, the first one in feed order wins.
pub fn closest_event<'a>(
    events: &'a [Event],
    filter_suffix: &str,
    now: DateTime<Utc>,
) -> Option<Upcoming<'a>> {
    let suffix = filter_suffix.to_lowercase();

    events
        .iter()
        .filter(|event| event.summary_ends_with_folded(&suffix))
        .map(|event| Upcoming {
            event,
            remaining: event.time_until_start(now),
        })
        .filter(|upcoming| upcoming.remaining > TimeDelta::zero())
        .min_by_key(|upcoming| upcoming.remaining)
}

/// Checks whether any event is in progress at `now`.
///
/// Open-ended events last `default_duration`. Events starting or ending
/// exactly at `now` do not count.
pub fn in_event(events: &[Event], now: DateTime<Utc>, default_duration: TimeDelta) -> bool {
    events
        .iter()
        .any(|event| event.is_ongoing_at(now, default_duration))
}
