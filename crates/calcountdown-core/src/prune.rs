//! Pruning of parsed feed components down to relevant events.
//!
//! A component survives when all of the following hold:
//!
//! 1. it is a `VEVENT`,
//! 2. its start exists and carries a time of day,
//! 3. it started no more than [`MAX_EVENT_AGE`] before the reference time,
//! 4. its end, when present, is not before the reference time.
//!
//! Rule 2 drops all-day events entirely, even though [`sanitize`] knows how
//! to place a bare date at midnight UTC.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use crate::event::{Event, FeedComponent};
use crate::time::sanitize;

/// Upper bound on how long any event runs.
///
/// Events that started longer ago than this are considered over, whatever
/// their end says.
pub const MAX_EVENT_AGE: TimeDelta = TimeDelta::weeks(1);

/// Filters parsed components down to events still relevant at `reference_now`.
///
/// Feed order is preserved. Components that fail any rule are skipped
/// silently.
pub fn prune<'a, I>(components: I, reference_now: DateTime<Utc>) -> Vec<Event>
where
    I: IntoIterator<Item = &'a FeedComponent>,
{
    let mut considered = 0usize;
    let events: Vec<Event> = components
        .into_iter()
        .inspect(|_| considered += 1)
        .filter_map(|component| prune_component(component, reference_now))
        .collect();

    debug!(
        considered,
        kept = events.len(),
        reference_now = %reference_now,
        "Pruned feed components"
    );

    events
}

/// Applies the pruning rules to a single component.
fn prune_component(component: &FeedComponent, reference_now: DateTime<Utc>) -> Option<Event> {
    if !component.is_event() {
        return None;
    }

    let start = match component.start.as_ref() {
        Some(start) if start.has_time_of_day() => sanitize(start),
        _ => {
            trace!(summary = ?component.summary, "Dropping event without a timed start");
            return None;
        }
    };

    if reference_now - start > MAX_EVENT_AGE {
        trace!(summary = ?component.summary, start = %start, "Dropping event older than a week");
        return None;
    }

    let end = component.end.as_ref().map(sanitize);
    if end.is_some_and(|end| end < reference_now) {
        trace!(summary = ?component.summary, end = ?end, "Dropping event that already ended");
        return None;
    }

    Some(Event::new(
        start,
        end,
        component.summary.clone().unwrap_or_default(),
    ))
}
