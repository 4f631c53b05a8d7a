//! Calendar configuration.
//!
//! The configuration is a JSON array with one entry per calendar feed,
//! stored at `~/.config/calcountdown/calendars.json` by default:
//!
//! ```json
//! [{
//!   "calendar_url": "https://example.com/feed.ics",
//!   "descriptor": "Esports schedule",
//!   "identifiers": ["lol", "esports"],
//!   "filters": {"lcs": "lcs", "sc": "starcraft"},
//!   "default_id": true
//! }]
//! ```
//!
//! `filters` maps a keyword typed by the user to the summary suffix it
//! selects.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use calcountdown_store::StoreConfig;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "webcal", "file"];
const MAX_REFRESH_INTERVAL_SECS: u64 = 366 * 24 * 60 * 60;
const MAX_EVENT_DURATION_MINS: u64 = 7 * 24 * 60;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid calendar entry {index}: {message}")]
    Invalid { index: usize, message: String },
}

impl ConfigError {
    fn invalid(index: usize, message: impl Into<String>) -> Self {
        Self::Invalid {
            index,
            message: message.into(),
        }
    }
}

/// One calendar feed and how to address it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Feed URL (`http`, `https`, `webcal` or `file`).
    pub calendar_url: String,

    /// Human-readable description shown in help.
    pub descriptor: String,

    /// Names that select this calendar.
    pub identifiers: Vec<String>,

    /// Keyword to summary suffix.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,

    /// Use the first identifier when a query names no calendar.
    #[serde(default)]
    pub default_id: bool,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Duration assumed for events without an end.
    #[serde(default = "default_event_duration_mins")]
    pub default_event_duration_mins: u64,
}

fn default_refresh_interval_secs() -> u64 {
    StoreConfig::DEFAULT_REFRESH_INTERVAL.num_seconds().unsigned_abs()
}

fn default_event_duration_mins() -> u64 {
    calcountdown_core::DEFAULT_EVENT_DURATION
        .num_minutes()
        .unsigned_abs()
}

impl CalendarConfig {
    /// Creates an entry with default refresh settings.
    pub fn new(
        calendar_url: impl Into<String>,
        descriptor: impl Into<String>,
        identifiers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            calendar_url: calendar_url.into(),
            descriptor: descriptor.into(),
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            filters: BTreeMap::new(),
            default_id: false,
            refresh_interval_secs: default_refresh_interval_secs(),
            default_event_duration_mins: default_event_duration_mins(),
        }
    }

    /// Builder: add a filter.
    pub fn with_filter(mut self, keyword: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.filters.insert(keyword.into(), suffix.into());
        self
    }

    /// Builder: mark as the default calendar.
    pub fn with_default(mut self) -> Self {
        self.default_id = true;
        self
    }

    /// Store settings for this calendar. Only meaningful after validation.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_refresh_interval(TimeDelta::seconds(
                self.refresh_interval_secs.min(MAX_REFRESH_INTERVAL_SECS) as i64,
            ))
            .with_default_event_duration(TimeDelta::minutes(
                self.default_event_duration_mins.min(MAX_EVENT_DURATION_MINS) as i64,
            ))
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let url = Url::parse(&self.calendar_url).map_err(|e| {
            ConfigError::invalid(index, format!("bad calendar_url '{}': {}", self.calendar_url, e))
        })?;
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(ConfigError::invalid(
                index,
                format!("unsupported URL scheme '{}'", url.scheme()),
            ));
        }

        if self.identifiers.is_empty() {
            return Err(ConfigError::invalid(index, "no identifiers"));
        }
        if self.identifiers.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::invalid(index, "blank identifier"));
        }
        if self.filters.keys().any(|keyword| keyword.trim().is_empty()) {
            return Err(ConfigError::invalid(index, "blank filter keyword"));
        }

        if !(1..=MAX_REFRESH_INTERVAL_SECS).contains(&self.refresh_interval_secs) {
            return Err(ConfigError::invalid(
                index,
                format!(
                    "refresh_interval_secs must be between 1 and {}",
                    MAX_REFRESH_INTERVAL_SECS
                ),
            ));
        }
        if !(1..=MAX_EVENT_DURATION_MINS).contains(&self.default_event_duration_mins) {
            return Err(ConfigError::invalid(
                index,
                format!(
                    "default_event_duration_mins must be between 1 and {}",
                    MAX_EVENT_DURATION_MINS
                ),
            ));
        }
        Ok(())
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountdownConfig {
    pub calendars: Vec<CalendarConfig>,
}

impl CountdownConfig {
    pub fn new(calendars: Vec<CalendarConfig>) -> Self {
        Self { calendars }
    }

    /// Loads and validates the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path`, or from [`CountdownConfig::default_path`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Parses without validating.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks every entry, then the identifiers across entries.
    ///
    /// Identifiers are compared lowercased and must be unique. At most one
    /// entry may be the default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Lowercased identifier to the entry that claimed it.
        let mut owners: HashMap<String, usize> = HashMap::new();
        let mut default_index = None;

        for (index, calendar) in self.calendars.iter().enumerate() {
            calendar.validate(index)?;

            for id in &calendar.identifiers {
                match owners.insert(id.to_lowercase(), index) {
                    Some(owner) if owner == index => {
                        return Err(ConfigError::invalid(
                            index,
                            format!("identifier '{}' is listed more than once", id),
                        ));
                    }
                    Some(owner) => {
                        return Err(ConfigError::invalid(
                            index,
                            format!("identifier '{}' is already used by entry {}", id, owner),
                        ));
                    }
                    None => {}
                }
            }

            if calendar.default_id {
                if let Some(previous) = default_index {
                    return Err(ConfigError::invalid(
                        index,
                        format!("entry {} is already the default calendar", previous),
                    ));
                }
                default_index = Some(index);
            }
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("calendars.json")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calcountdown")
    }
}
