//! Timestamp types for calendar feed data.
//!
//! Feeds carry start/end values in several shapes: a bare date, a floating
//! (timezone-naive) datetime, a UTC datetime, or a local datetime tagged with
//! a `TZID`. [`FeedTime`] keeps the shape the parser saw, and [`sanitize`]
//! collapses every shape into a single UTC timestamp for the rest of the
//! pipeline.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A start or end value as it appears in the feed, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FeedTime {
    /// A date without a time of day (`VALUE=DATE`).
    Date(NaiveDate),
    /// A datetime with no timezone information.
    Floating(NaiveDateTime),
    /// A datetime in UTC (`...Z`).
    Utc(DateTime<Utc>),
    /// A local datetime with an IANA timezone identifier.
    Zoned {
        date_time: NaiveDateTime,
        tzid: String,
    },
}

impl FeedTime {
    /// Creates a date-only value.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Creates a timezone-naive value.
    pub fn floating(date_time: NaiveDateTime) -> Self {
        Self::Floating(date_time)
    }

    /// Creates a UTC value.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }

    /// Creates a local value tagged with a timezone identifier.
    pub fn zoned(date_time: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self::Zoned {
            date_time,
            tzid: tzid.into(),
        }
    }

    /// Returns `true` if the value carries a time of day.
    ///
    /// Only [`FeedTime::Date`] lacks one.
    pub fn has_time_of_day(&self) -> bool {
        !matches!(self, Self::Date(_))
    }

    /// Normalizes this value to UTC. See [`sanitize`].
    pub fn to_utc(&self) -> DateTime<Utc> {
        sanitize(self)
    }
}

impl From<DateTime<Utc>> for FeedTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }
}

/// Normalizes a feed timestamp to UTC.
///
/// - date-only values become midnight UTC of that date,
/// - floating values are assumed to already be UTC,
/// - UTC values are kept,
/// - zoned values are resolved through the IANA database. Ambiguous local
///   times (DST fold) take the earliest instant. Unknown timezones and local
///   times that fall in a DST gap are read as UTC.
pub fn sanitize(time: &FeedTime) -> DateTime<Utc> {
    match time {
        FeedTime::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
        FeedTime::Floating(naive) => naive.and_utc(),
        FeedTime::Utc(dt) => *dt,
        FeedTime::Zoned { date_time, tzid } => resolve_zoned(date_time, tzid),
    }
}

fn resolve_zoned(date_time: &NaiveDateTime, tzid: &str) -> DateTime<Utc> {
    let tz = match tzid.trim_matches('"').parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(tzid = %tzid, "Unknown timezone identifier, assuming UTC");
            return date_time.and_utc();
        }
    };

    match tz.from_local_datetime(date_time).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            warn!(
                tzid = %tzid,
                local = %date_time,
                "Local time does not exist in timezone, assuming UTC"
            );
            date_time.and_utc()
        }
    }
}
