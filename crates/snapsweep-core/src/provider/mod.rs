//! The device media store, seen from the triage core.
//!
//! The core never talks to the platform directly. Hosts implement
//! [`MediaProvider`] on top of their photo library API; [`MemoryProvider`]
//! is a complete in-process implementation for tests and previews.

mod memory;

pub use memory::MemoryProvider;

use crate::asset::{AssetId, MediaKind, PermissionState, PhotoAsset};

/// Errors reported by the media store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Library access was revoked or never granted.
    #[error("Photo library access was revoked")]
    PermissionRevoked,

    /// Some assets no longer exist in the store.
    #[error("{} asset(s) no longer exist", .0.len())]
    AssetsMissing(Vec<AssetId>),

    /// Platform I/O failure.
    #[error("Platform error: {0}")]
    Platform(String),
}

impl ProviderError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::PermissionRevoked)
    }

    /// Message suitable for an alert shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionRevoked => {
                "Photo access was turned off. Allow access in Settings and try again."
            }
            Self::AssetsMissing(_) | Self::Platform(_) => "Failed to delete some images",
        }
    }
}

/// Access to the device photo library.
///
/// Calls are awaited by the host's screen logic; the ledger and sessions
/// only ever see their resolved results.
#[allow(async_fn_in_trait)]
pub trait MediaProvider {
    /// Current access state, without prompting.
    async fn query_access(&self) -> PermissionState;

    /// Prompt the user for access if needed and return the outcome.
    async fn request_access(&self) -> PermissionState;

    /// List up to `limit` assets of `kind`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if access is missing or the store fails.
    async fn list_assets(
        &self,
        kind: MediaKind,
        limit: usize,
    ) -> Result<Vec<PhotoAsset>, ProviderError>;

    /// Permanently delete `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if any deletion fails. Callers must then treat none
    /// of the ids as deleted.
    async fn delete_assets(&self, ids: &[AssetId]) -> Result<(), ProviderError>;
}
