//! Calendar query commands.

use calcountdown_core::{JsonCountdown, OutputFormat, format_countdown_or_default};
use chrono::{DateTime, Utc};

use crate::cli::QueryArgs;
use crate::error::ClientResult;
use crate::registry::CountdownRegistry;

/// Renders the countdown to the next matching event.
///
/// JSON output is `null` when nothing matches.
pub async fn next(
    registry: &CountdownRegistry,
    query: &QueryArgs,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> ClientResult<String> {
    let next = registry
        .next(&query.param(), query.channel.as_deref(), now)
        .await?;
    let upcoming = next.as_ref().map(|next| next.as_upcoming());

    match format {
        OutputFormat::Text => Ok(format_countdown_or_default(upcoming.as_ref())),
        OutputFormat::Json => {
            let json = upcoming.as_ref().map(JsonCountdown::from_upcoming);
            Ok(serde_json::to_string(&json)?)
        }
    }
}

/// `in-event` exit status when no event is in progress.
pub const EXIT_IDLE: u8 = 1;

/// Exit status for an `in-event` answer: 0 while busy, [`EXIT_IDLE`] otherwise.
pub fn in_event_status(busy: bool) -> u8 {
    if busy { 0 } else { EXIT_IDLE }
}

/// Whether an event of the selected calendar is in progress.
pub async fn in_event(
    registry: &CountdownRegistry,
    query: &QueryArgs,
    now: DateTime<Utc>,
) -> ClientResult<bool> {
    Ok(registry
        .in_event(&query.param(), query.channel.as_deref(), now)
        .await?)
}

/// Help lines for the query.
pub fn help(registry: &CountdownRegistry, query: &QueryArgs) -> ClientResult<Vec<String>> {
    Ok(registry.help(&query.param(), query.channel.as_deref())?)
}
