//! CLI, calendar configuration, countdown registry
//!
//! This crate provides the `calcountdown` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod countdown;
pub mod error;
pub mod registry;

#[cfg(test)]
mod testing;

pub use cli::Cli;
pub use config::{CalendarConfig, ConfigError, CountdownConfig};
pub use countdown::{CalendarCountdown, Filter};
pub use error::{ClientError, ClientResult};
pub use registry::{CountdownRegistry, RegistryError};
