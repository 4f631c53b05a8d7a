//! Core types: events, timestamp normalization, pruning, queries, formatting

pub mod event;
pub mod format;
pub mod prune;
pub mod query;
pub mod time;
pub mod tracing;

pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use event::{ComponentKind, Event, FeedComponent};
pub use format::{
    JsonCountdown, NO_FUTURE_EVENT, OutputFormat, format_countdown, format_countdown_or_default,
};
pub use prune::{MAX_EVENT_AGE, prune};
pub use query::{DEFAULT_EVENT_DURATION, Upcoming, closest_event, in_event};
pub use time::{FeedTime, sanitize};
