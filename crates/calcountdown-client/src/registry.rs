//! Lookup of calendars by identifier.
//!
//! A query names a calendar by starting with one of its identifiers
//! (`"lol lcs"` selects `lol` with the filter text `"lcs"`). Queries that
//! name no calendar fall back to the channel they were sent from, then to
//! the default calendar.

use std::sync::Arc;

use calcountdown_providers::HttpConfig;
use calcountdown_store::{EventStore, NextEvent, StoreError};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::config::CountdownConfig;
use crate::countdown::CalendarCountdown;

/// First help line, always present.
pub const BASE_HELP: &str = "Display time to next event in specified calendar";

const CHANNEL_SIGILS: [char; 4] = ['#', '&', '!', '+'];

/// Errors returned by registry queries.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No calendar matches the query and there is no default.
    #[error("Bad calendar countdown config: {message}")]
    Config { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// The calendar a query resolved to.
#[derive(Debug)]
pub struct Selection<'a> {
    /// The identifier that matched.
    pub id: &'a str,
    pub calendar: &'a CalendarCountdown,
    /// What is left of the query for the calendar's filters.
    pub rest: String,
}

/// Calendars keyed by lowercased identifier.
#[derive(Debug, Default)]
pub struct CountdownRegistry {
    /// Longest identifier first.
    calendars: Vec<(String, Arc<CalendarCountdown>)>,
    default_id: Option<String>,
}

impl CountdownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one lazily refreshed store per configured calendar.
    ///
    /// Nothing is fetched here; each feed is loaded on its first query.
    pub fn from_config(config: &CountdownConfig, http: &HttpConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for calendar in &config.calendars {
            let store =
                EventStore::for_url(&calendar.calendar_url, http, calendar.store_config())?;
            let countdown = CalendarCountdown::new(
                store,
                calendar.filters.clone(),
                calendar.descriptor.clone(),
            );
            registry.insert(&calendar.identifiers, countdown, calendar.default_id);
        }
        debug!(
            calendars = config.calendars.len(),
            identifiers = registry.calendars.len(),
            default = ?registry.default_id,
            "Registry built"
        );
        Ok(registry)
    }

    /// Registers a calendar under every identifier.
    ///
    /// An identifier already in use is reassigned. With `is_default`, the
    /// first identifier becomes the fallback.
    pub fn insert<I, S>(&mut self, identifiers: I, countdown: CalendarCountdown, is_default: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let countdown = Arc::new(countdown);
        let ids: Vec<String> = identifiers
            .into_iter()
            .map(|id| id.as_ref().trim().to_lowercase())
            .filter(|id| !id.is_empty())
            .collect();

        if is_default {
            if let Some(first) = ids.first() {
                self.default_id = Some(first.clone());
            }
        }

        for id in ids {
            self.calendars.retain(|(existing, _)| *existing != id);
            self.calendars.push((id, Arc::clone(&countdown)));
        }
        self.calendars.sort_by(|(a, _), (b, _)| {
            b.len().cmp(&a.len()).then_with(|| a.cmp(b))
        });
    }

    /// Identifiers in matching order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.calendars.iter().map(|(id, _)| id.as_str())
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    fn get(&self, id: &str) -> Option<(&str, &CalendarCountdown)> {
        self.calendars
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(id, calendar)| (id.as_str(), calendar.as_ref()))
    }

    /// Resolves the calendar for a query.
    ///
    /// Tried in order: an identifier prefixing `param`, the channel name
    /// without its sigil, the default calendar.
    pub fn choose(
        &self,
        param: &str,
        channel: Option<&str>,
    ) -> Result<Selection<'_>, RegistryError> {
        let param = param.to_lowercase();

        if let Some((id, calendar)) = self
            .calendars
            .iter()
            .find(|(id, _)| param.starts_with(id.as_str()))
        {
            return Ok(Selection {
                id,
                calendar,
                rest: param[id.len()..].trim_start().to_string(),
            });
        }

        let from_channel = channel
            .map(|chan| chan.strip_prefix(CHANNEL_SIGILS).unwrap_or(chan).to_lowercase())
            .and_then(|name| self.get(&name));
        if let Some((id, calendar)) = from_channel {
            return Ok(Selection { id, calendar, rest: param });
        }

        if let Some((id, calendar)) = self.default_id.as_deref().and_then(|id| self.get(id)) {
            return Ok(Selection { id, calendar, rest: param });
        }

        Err(RegistryError::config(format!(
            "no calendar matches '{}' and no default calendar is set",
            param
        )))
    }

    /// Help lines for a query.
    pub fn help(&self, param: &str, channel: Option<&str>) -> Result<Vec<String>, RegistryError> {
        if param.trim().is_empty() {
            let ids: Vec<&str> = self.identifiers().collect();
            return Ok(vec![BASE_HELP.to_string(), ids.join(", ")]);
        }

        let selection = self.choose(param, channel)?;
        let mut lines = vec![
            BASE_HELP.to_string(),
            format!("{} - {}", selection.id, selection.calendar.description()),
        ];
        lines.extend(selection.calendar.help(&selection.rest));
        Ok(lines)
    }

    /// The next event for a query.
    pub async fn next(
        &self,
        param: &str,
        channel: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<NextEvent>, RegistryError> {
        let selection = self.choose(param, channel)?;
        Ok(selection.calendar.next(&selection.rest, now).await?)
    }

    /// The countdown line for a query.
    pub async fn respond(
        &self,
        param: &str,
        channel: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, RegistryError> {
        let selection = self.choose(param, channel)?;
        debug!(id = selection.id, rest = %selection.rest, "Responding");
        Ok(selection.calendar.respond(&selection.rest, now).await?)
    }

    /// Whether an event of the selected calendar is in progress.
    pub async fn in_event(
        &self,
        param: &str,
        channel: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<bool, RegistryError> {
        let selection = self.choose(param, channel)?;
        Ok(selection.calendar.in_event(now).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarConfig;
    use crate::testing::{countdown, esports_feed, holiday_feed, now, store};
    use calcountdown_providers::ProviderErrorCode;

    fn registry() -> CountdownRegistry {
        let mut registry = CountdownRegistry::new();
        registry.insert(
            ["LoL", "esports"],
            countdown(
                esports_feed(),
                &[("lcs", "lcs"), ("sc", "starcraft")],
                "Esports schedule",
            ),
            true,
        );
        registry.insert(
            ["holiday", "hol"],
            countdown(holiday_feed(), &[], "Holidays"),
            false,
        );
        registry
    }

    #[test]
    fn identifiers_are_lowercased_and_sorted() {
        let registry = registry();
        let ids: Vec<&str> = registry.identifiers().collect();
        assert_eq!(ids, ["esports", "holiday", "hol", "lol"]);
        assert_eq!(registry.default_id(), Some("lol"));
    }

    #[test]
    fn choose_by_prefix() {
        let registry = registry();

        let selection = registry.choose("esports lcs", None).unwrap();
        assert_eq!(selection.id, "esports");
        assert_eq!(selection.rest, "lcs");

        let selection = registry.choose("Holiday", None).unwrap();
        assert_eq!(selection.id, "holiday");
        assert_eq!(selection.rest, "");

        let selection = registry.choose("hol xmas", None).unwrap();
        assert_eq!(selection.id, "hol");
        assert_eq!(selection.rest, "xmas");
    }

    #[test]
    fn identifiers_alias_one_calendar() {
        let registry = registry();
        let a = registry.choose("lol", None).unwrap().calendar;
        let b = registry.choose("esports", None).unwrap().calendar;
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn choose_by_channel_then_default() {
        let registry = registry();

        let selection = registry.choose("whenever", Some("#Holiday")).unwrap();
        assert_eq!(selection.id, "holiday");
        assert_eq!(selection.rest, "whenever");

        let selection = registry.choose("sc", Some("#random")).unwrap();
        assert_eq!(selection.id, "lol");
        assert_eq!(selection.rest, "sc");
    }

    #[test]
    fn no_match_without_default_is_a_config_error() {
        let mut registry = CountdownRegistry::new();
        registry.insert(["hol"], countdown(holiday_feed(), &[], "Holidays"), false);

        let err = registry.choose("lcs", Some("#general")).unwrap_err();
        assert!(matches!(err, RegistryError::Config { .. }));
        insta::assert_snapshot!(
            err.to_string(),
            @"Bad calendar countdown config: no calendar matches 'lcs' and no default calendar is set"
        );
    }

    #[test]
    fn help_lists_identifiers_for_blank_param() {
        insta::assert_debug_snapshot!(registry().help("  ", None).unwrap(), @r#"
        [
            "Display time to next event in specified calendar",
            "esports, holiday, hol, lol",
        ]
        "#);
    }

    #[test]
    fn help_for_calendar_and_filter() {
        let registry = registry();
        insta::assert_debug_snapshot!(registry.help("lol sc", None).unwrap(), @r#"
        [
            "Display time to next event in specified calendar",
            "lol - Esports schedule",
            "sc - starcraft",
        ]
        "#);
        insta::assert_debug_snapshot!(registry.help("esports", None).unwrap(), @r#"
        [
            "Display time to next event in specified calendar",
            "esports - Esports schedule",
            "lcs, sc",
        ]
        "#);
        insta::assert_debug_snapshot!(registry.help("hol", None).unwrap(), @r#"
        [
            "Display time to next event in specified calendar",
            "hol - Holidays",
        ]
        "#);
    }

    #[tokio::test]
    async fn respond_routes_to_calendar() {
        let registry = registry();
        assert_eq!(
            registry.respond("lol lcs", None, now()).await.unwrap(),
            "TL vs C9 - LCS starting in 1 day 00:00:42"
        );
        assert_eq!(
            registry.respond("lcs", None, now()).await.unwrap(),
            "TL vs C9 - LCS starting in 1 day 00:00:42"
        );
        assert_eq!(
            registry.respond("", Some("#hol"), now()).await.unwrap(),
            "Carnival starting in 3 days 06:00:00"
        );
    }

    #[tokio::test]
    async fn in_event_routes_to_calendar() {
        let registry = registry();
        assert!(registry.in_event("lol", None, now()).await.unwrap());
        assert!(!registry.in_event("holiday", None, now()).await.unwrap());
    }

    #[tokio::test]
    async fn refresh_failure_is_surfaced() {
        let mut registry = CountdownRegistry::new();
        registry.insert(
            ["down"],
            CalendarCountdown::new(store(None), Vec::new(), "Unreachable"),
            true,
        );

        let err = registry.respond("", None, now()).await.unwrap_err();
        match err {
            RegistryError::Store(e) => {
                assert_eq!(e.provider_error().code(), ProviderErrorCode::NetworkError)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn from_config_with_local_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esports.ics");
        std::fs::write(&path, esports_feed()).unwrap();
        let feed_url = url::Url::from_file_path(&path).unwrap();

        let config = CountdownConfig::new(vec![
            CalendarConfig::new(feed_url.as_str(), "Esports schedule", ["LoL"])
                .with_filter("LCS", "LCS")
                .with_default(),
        ]);
        let registry = CountdownRegistry::from_config(&config, &HttpConfig::default()).unwrap();

        assert_eq!(registry.default_id(), Some("lol"));
        let next = registry.next("lcs", None, now()).await.unwrap().unwrap();
        assert_eq!(next.event.summary, "TL vs C9 - LCS");
    }
}
