//! Golden tests for countdown output.
//!
//! These use insta inline snapshots so the exact response text is visible
//! next to the scenario that produces it.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::event::Event;
use crate::format::{JsonCountdown, format_countdown, format_countdown_or_default};
use crate::query::closest_event;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 5, 12, 0, 0).unwrap()
}

/// A small esports-style schedule, in feed order.
fn schedule() -> Vec<Event> {
    vec![
        Event::new(
            now() + TimeDelta::days(2) + TimeDelta::hours(4),
            None,
            "T1 vs GEN - LCK",
        ),
        Event::new(
            now() + TimeDelta::hours(7) + TimeDelta::minutes(30),
            Some(now() + TimeDelta::hours(9)),
            "FNC vs G2 - LEC",
        ),
        Event::new(
            now() + TimeDelta::days(1) + TimeDelta::seconds(42),
            None,
            "TL vs C9 - LCS",
        ),
        Event::new(now() - TimeDelta::minutes(20), None, "Running - LEC"),
    ]
}

fn respond(suffix: &str) -> String {
    let events = schedule();
    format_countdown_or_default(closest_event(&events, suffix, now()).as_ref())
}

#[test]
fn golden_any_league() {
    insta::assert_snapshot!(respond(""), @"FNC vs G2 - LEC starting in 0 days 07:30:00");
}

#[test]
fn golden_lcs() {
    insta::assert_snapshot!(respond("lcs"), @"TL vs C9 - LCS starting in 1 day 00:00:42");
}

#[test]
fn golden_lck() {
    insta::assert_snapshot!(respond("LCK"), @"T1 vs GEN - LCK starting in 2 days 04:00:00");
}

#[test]
fn golden_no_match() {
    insta::assert_snapshot!(respond("lpl"), @"No future event found");
}

#[test]
fn golden_long_wait() {
    let events = vec![Event::new(
        now() + TimeDelta::days(45) + TimeDelta::hours(23) + TimeDelta::minutes(59),
        None,
        "Worlds Final",
    )];
    let upcoming = closest_event(&events, "", now()).unwrap();
    insta::assert_snapshot!(format_countdown(&upcoming), @"Worlds Final starting in 45 days 23:59:00");
}

#[test]
fn golden_json() {
    let events = schedule();
    let upcoming = closest_event(&events, "lcs", now()).unwrap();
    let json = serde_json::to_string_pretty(&JsonCountdown::from_upcoming(&upcoming)).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "summary": "TL vs C9 - LCS",
      "start": "2025-02-06T12:00:42Z",
      "end": null,
      "remaining_seconds": 86442,
      "days": 1,
      "hours": 0,
      "minutes": 0,
      "seconds": 42,
      "text": "TL vs C9 - LCS starting in 1 day 00:00:42"
    }
    "#);
}
