//! Error types for the core library.

use thiserror::Error;

use crate::asset::PermissionState;
use crate::config::ConfigError;
use crate::provider::ProviderError;

/// Errors that can occur in core operations.
///
/// Ledger and session transitions are total and never produce one of these;
/// only the provider boundary and configuration loading can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Media store operation failed.
    #[error("Media provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Photo library access has not been granted.
    #[error("Photo library access not granted (status: {0})")]
    PermissionDenied(PermissionState),

    /// Configuration is invalid.
    #[error("Configuration error: {}", join_messages(.0))]
    Config(Vec<ConfigError>),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Whether retrying the same action may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_retryable(),
            Self::PermissionDenied(_) | Self::Config(_) | Self::Serde(_) => false,
        }
    }
}

fn join_messages(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ConfigError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
