//! Output formatting for countdowns.
//!
//! Two shapes are supported:
//! - **Text**: `"<summary> starting in <D> day(s) HH:MM:SS"`
//! - **JSON**: a [`JsonCountdown`] object for scripting
//!
//! # Example
//!
//! ```rust
//! use calcountdown_core::{closest_event, format_countdown, Event};
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let events = vec![Event::new(now + Duration::hours(1), None, "Team Sync")];
//! let upcoming = closest_event(&events, "", now).unwrap();
//! assert_eq!(format_countdown(&upcoming), "Team Sync starting in 0 days 01:00:00");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::Upcoming;

/// Response when no event matches.
pub const NO_FUTURE_EVENT: &str = "No future event found";

/// The output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable single line.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Formats the countdown line for an upcoming event.
///
/// The day count is singular only for exactly one day.
pub fn format_countdown(upcoming: &Upcoming<'_>) -> String {
    let days = upcoming.days();
    format!(
        "{} starting in {} {} {:02}:{:02}:{:02}",
        upcoming.event.summary,
        days,
        day_label(days),
        upcoming.hours(),
        upcoming.minutes(),
        upcoming.seconds()
    )
}

/// Formats an optional countdown, falling back to [`NO_FUTURE_EVENT`].
pub fn format_countdown_or_default(upcoming: Option<&Upcoming<'_>>) -> String {
    upcoming
        .map(format_countdown)
        .unwrap_or_else(|| NO_FUTURE_EVENT.to_string())
}

fn day_label(days: i64) -> &'static str {
    if days == 1 { "day" } else { "days" }
}

/// JSON shape of a countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonCountdown {
    /// The event summary.
    pub summary: String,
    /// When the event starts (UTC).
    pub start: DateTime<Utc>,
    /// When the event ends (UTC), if known.
    pub end: Option<DateTime<Utc>>,
    /// Total seconds until the start.
    pub remaining_seconds: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// The formatted text line.
    pub text: String,
}

impl JsonCountdown {
    /// Builds the JSON view of an upcoming event.
    pub fn from_upcoming(upcoming: &Upcoming<'_>) -> Self {
        Self {
            summary: upcoming.event.summary.clone(),
            start: upcoming.event.start,
            end: upcoming.event.end,
            remaining_seconds: upcoming.remaining.num_seconds(),
            days: upcoming.days(),
            hours: upcoming.hours(),
            minutes: upcoming.minutes(),
            seconds: upcoming.seconds(),
            text: format_countdown(upcoming),
        }
    }
}

#[cfg(test)]
mod golden_tests;
