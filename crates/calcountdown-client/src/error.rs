//! Client error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::registry::RegistryError;

/// Exit status for any failed command.
///
/// Distinct from the `1` that `in-event` uses for "no event in progress".
pub const EXIT_ERROR: u8 = 2;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Tracing(#[from] calcountdown_core::TracingError),
}

impl ClientError {
    pub fn exit_status(&self) -> u8 {
        EXIT_ERROR
    }
}
