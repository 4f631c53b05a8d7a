//! iCalendar feed parsing.
//!
//! Turns raw feed bytes into [`FeedComponent`]s. No filtering happens here:
//! every component is returned with its kind so the pruner can decide.

use calcountdown_core::{ComponentKind, FeedComponent, FeedTime};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, Todo,
};
use tracing::{debug, trace};

use crate::error::{ProviderError, ProviderResult};

const PROVIDER_NAME: &str = "ics";
const UTF8_BOM: &str = "\u{feff}";

/// Parses an iCalendar document into its components, in feed order.
///
/// # Errors
///
/// Returns an `InvalidFeed` error when the bytes are not UTF-8, do not start
/// with `BEGIN:VCALENDAR`, or are rejected by the iCalendar parser.
pub fn parse_feed(bytes: &[u8]) -> ProviderResult<Vec<FeedComponent>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ProviderError::invalid_feed("feed is not valid UTF-8")
            .with_provider(PROVIDER_NAME)
            .with_source(e)
    })?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let starts_with_header = text
        .trim_start()
        .get(..15)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
    if !starts_with_header {
        return Err(
            ProviderError::invalid_feed("missing BEGIN:VCALENDAR header")
                .with_provider(PROVIDER_NAME),
        );
    }

    let calendar = text.parse::<Calendar>().map_err(|e| {
        ProviderError::invalid_feed(format!("failed to parse feed: {}", e))
            .with_provider(PROVIDER_NAME)
    })?;

    let components: Vec<FeedComponent> = calendar.iter().map(convert_component).collect();
    debug!(components = components.len(), "Parsed feed");
    Ok(components)
}

fn convert_component(component: &CalendarComponent) -> FeedComponent {
    match component {
        CalendarComponent::Event(event) => convert_event(event),
        CalendarComponent::Todo(todo) => convert_todo(todo),
        CalendarComponent::Venue(venue) => other_component(venue.component_kind()),
        CalendarComponent::Other(other) => other_component(other.component_kind()),
        _ => other_component(String::from("UNKNOWN")),
    }
}

fn other_component(name: String) -> FeedComponent {
    trace!(component = %name, "Skipping component");
    FeedComponent::of_kind(ComponentKind::Other(name))
}

fn convert_event(event: &Event) -> FeedComponent {
    let parsed = FeedComponent {
        kind: ComponentKind::Event,
        start: event.get_start().map(convert_time),
        end: event.get_end().map(convert_time),
        summary: event.get_summary().map(str::to_string),
    };
    trace!(summary = ?parsed.summary, start = ?parsed.start, "Parsed VEVENT");
    parsed
}

// Todos never become events; only the summary is kept for logging.
fn convert_todo(todo: &Todo) -> FeedComponent {
    let mut parsed = FeedComponent::of_kind(ComponentKind::Todo);
    parsed.summary = todo.property_value("SUMMARY").map(str::to_string);
    parsed
}

fn convert_time(value: DatePerhapsTime) -> FeedTime {
    match value {
        DatePerhapsTime::Date(date) => FeedTime::from_date(date),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => FeedTime::from_utc(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => FeedTime::floating(naive),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            FeedTime::zoned(date_time, tzid)
        }
    }
}
