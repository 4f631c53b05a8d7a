//! Shared fixtures for the client tests.

use std::sync::Arc;

use calcountdown_providers::{BoxFuture, FeedFetcher, ProviderError, ProviderResult};
use calcountdown_store::{EventStore, StoreConfig};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::countdown::CalendarCountdown;

/// Serves a fixed feed, or fails every time when `None`.
pub(crate) struct StaticFetcher(Option<String>);

impl FeedFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, ProviderResult<Vec<u8>>> {
        Box::pin(async move {
            match &self.0 {
                Some(feed) => Ok(feed.clone().into_bytes()),
                None => Err(ProviderError::network("connection refused")),
            }
        })
    }
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 5, 12, 0, 0).unwrap()
}

fn vevent(summary: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let stamp = |at: DateTime<Utc>| at.format("%Y%m%dT%H%M%SZ").to_string();
    let end = end
        .map(|end| format!("DTEND:{}\r\n", stamp(end)))
        .unwrap_or_default();
    format!(
        "BEGIN:VEVENT\r\nUID:{}\r\nDTSTART:{}\r\n{}SUMMARY:{}\r\nEND:VEVENT\r\n",
        stamp(start),
        stamp(start),
        end,
        summary
    )
}

fn calendar(events: &[String]) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\n{}END:VCALENDAR\r\n",
        events.concat()
    )
}

/// League matches around [`now`], one of them in progress.
pub(crate) fn esports_feed() -> String {
    calendar(&[
        vevent(
            "T1 vs GEN - LCK",
            now() + TimeDelta::days(2) + TimeDelta::hours(4),
            None,
        ),
        vevent(
            "FNC vs G2 - LEC",
            now() + TimeDelta::hours(7) + TimeDelta::minutes(30),
            Some(now() + TimeDelta::hours(9)),
        ),
        vevent(
            "TL vs C9 - LCS",
            now() + TimeDelta::days(1) + TimeDelta::seconds(42),
            None,
        ),
        vevent("Running - LEC", now() - TimeDelta::minutes(20), None),
    ])
}

/// Public holidays, all starting at a time of day.
pub(crate) fn holiday_feed() -> String {
    calendar(&[vevent(
        "Carnival",
        now() + TimeDelta::days(3) + TimeDelta::hours(6),
        None,
    )])
}

pub(crate) fn store(feed: Option<String>) -> EventStore {
    EventStore::new(
        "https://example.com/feed.ics",
        Arc::new(StaticFetcher(feed)),
        StoreConfig::default(),
    )
}

pub(crate) fn countdown(
    feed: String,
    filters: &[(&str, &str)],
    description: &str,
) -> CalendarCountdown {
    CalendarCountdown::new(
        store(Some(feed)),
        filters
            .iter()
            .map(|(keyword, suffix)| (keyword.to_string(), suffix.to_string())),
        description,
    )
}
