//! Event types.
//!
//! - [`FeedComponent`]: one component as parsed from a feed, before pruning
//! - [`ComponentKind`]: the component type (`VEVENT`, `VTODO`, ...)
//! - [`Event`]: a pruned event with UTC-normalized times

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::time::FeedTime;

/// The type of a parsed calendar component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// `VEVENT`
    Event,
    /// `VTODO`
    Todo,
    /// Any other component, with its name.
    Other(String),
}

/// A calendar component as produced by the feed parser.
///
/// Only the fields the pruner looks at are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedComponent {
    /// The component type.
    pub kind: ComponentKind,
    /// `DTSTART`, if present.
    pub start: Option<FeedTime>,
    /// `DTEND`, if present.
    pub end: Option<FeedTime>,
    /// `SUMMARY`, if present.
    pub summary: Option<String>,
}

impl FeedComponent {
    /// Creates a `VEVENT` component with the given start.
    pub fn event(start: impl Into<Option<FeedTime>>) -> Self {
        Self {
            kind: ComponentKind::Event,
            start: start.into(),
            end: None,
            summary: None,
        }
    }

    /// Creates a component of the given kind with no properties.
    pub fn of_kind(kind: ComponentKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
            summary: None,
        }
    }

    /// Builder method to set the start.
    pub fn with_start(mut self, start: FeedTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: FeedTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Returns true if this is a `VEVENT`.
    pub fn is_event(&self) -> bool {
        self.kind == ComponentKind::Event
    }
}

/// A relevant calendar event, with times normalized to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends. `None` means open-ended.
    pub end: Option<DateTime<Utc>>,
    /// The event summary, used for display and filter matching.
    pub summary: String,
}

impl Event {
    /// Creates a new event.
    pub fn new(
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            summary: summary.into(),
        }
    }

    /// Returns the end, or `start + default_duration` for open-ended events.
    pub fn effective_end(&self, default_duration: TimeDelta) -> DateTime<Utc> {
        self.end.unwrap_or(self.start + default_duration)
    }

    /// Checks if the event is in progress at `now`.
    ///
    /// Both bounds are exclusive.
    pub fn is_ongoing_at(&self, now: DateTime<Utc>, default_duration: TimeDelta) -> bool {
        self.start < now && now < self.effective_end(default_duration)
    }

    /// Returns the time left until the event starts (negative once started).
    pub fn time_until_start(&self, now: DateTime<Utc>) -> TimeDelta {
        self.start - now
    }

    /// Checks if the summary ends with `suffix`, ignoring case.
    pub fn summary_ends_with(&self, suffix: &str) -> bool {
        self.summary_ends_with_folded(&suffix.to_lowercase())
    }

    /// Like [`Event::summary_ends_with`], for a suffix that is already lowercase.
    pub(crate) fn summary_ends_with_folded(&self, folded_suffix: &str) -> bool {
        self.summary.to_lowercase().ends_with(folded_suffix)
    }
}
