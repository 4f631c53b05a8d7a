//! A single calendar with its keyword filters.

use calcountdown_core::format_countdown_or_default;
use calcountdown_store::{EventStore, NextEvent, StoreResult};
use chrono::{DateTime, Utc};

/// A keyword the user types and the summary suffix it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub keyword: String,
    pub suffix: String,
}

impl Filter {
    pub fn new(keyword: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            suffix: suffix.into(),
        }
    }

    /// The filter used when no keyword matches. Selects every event.
    pub fn any() -> Self {
        Self::new("", "")
    }

    fn is_any(&self) -> bool {
        self.keyword.is_empty()
    }
}

/// A calendar store plus the filters that narrow it down.
#[derive(Debug)]
pub struct CalendarCountdown {
    store: EventStore,
    /// Longest keyword first, so `lcsacademy` wins over `lcs`.
    filters: Vec<Filter>,
    description: String,
}

impl CalendarCountdown {
    /// Creates a countdown. Keywords and suffixes are lowercased.
    pub fn new(
        store: EventStore,
        filters: impl IntoIterator<Item = (String, String)>,
        description: impl Into<String>,
    ) -> Self {
        let mut filters: Vec<Filter> = filters
            .into_iter()
            .map(|(keyword, suffix)| Filter::new(keyword.to_lowercase(), suffix.to_lowercase()))
            .collect();
        filters.sort_by(|a, b| {
            b.keyword
                .len()
                .cmp(&a.keyword.len())
                .then_with(|| a.keyword.cmp(&b.keyword))
        });

        Self {
            store,
            filters,
            description: description.into(),
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the first filter whose keyword starts `param`, or [`Filter::any`].
    pub fn select_filter(&self, param: &str) -> Filter {
        self.filters
            .iter()
            .find(|filter| param.starts_with(&filter.keyword))
            .cloned()
            .unwrap_or_else(Filter::any)
    }

    /// Help lines for the filters of this calendar.
    pub fn help(&self, param: &str) -> Vec<String> {
        if self.filters.is_empty() {
            return Vec::new();
        }

        let filter = self.select_filter(param);
        if filter.is_any() {
            let keywords: Vec<&str> = self.filters.iter().map(|f| f.keyword.as_str()).collect();
            return vec![keywords.join(", ")];
        }
        vec![format!("{} - {}", filter.keyword, filter.suffix)]
    }

    /// The next event selected by `param`.
    pub async fn next(&self, param: &str, now: DateTime<Utc>) -> StoreResult<Option<NextEvent>> {
        let filter = self.select_filter(param);
        self.store.closest_event(&filter.suffix, now).await
    }

    /// The countdown line for `param`.
    pub async fn respond(&self, param: &str, now: DateTime<Utc>) -> StoreResult<String> {
        let next = self.next(param, now).await?;
        Ok(format_countdown_or_default(
            next.as_ref().map(NextEvent::as_upcoming).as_ref(),
        ))
    }

    /// Whether an event of this calendar is in progress.
    pub async fn in_event(&self, now: DateTime<Utc>) -> StoreResult<bool> {
        self.store.in_event(now).await
    }
}
