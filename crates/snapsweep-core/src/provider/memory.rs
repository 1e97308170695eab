//! In-memory media provider.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use tracing::{debug, warn};

use super::{MediaProvider, ProviderError};
use crate::asset::{AssetId, MediaKind, PermissionState, PhotoAsset};

/// A photo library held in memory.
///
/// Permission answers and delete failures can be scripted, which makes it
/// suitable for exercising the failure paths of the review screen.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    photos: RefCell<Vec<PhotoAsset>>,
    permission: Cell<PermissionState>,
    request_answer: Cell<PermissionState>,
    delete_failure: RefCell<Option<ProviderError>>,
    delete_calls: Cell<usize>,
}

impl MemoryProvider {
    /// Create a provider holding `photos`, with access already granted.
    #[must_use]
    pub fn new(photos: Vec<PhotoAsset>) -> Self {
        Self {
            photos: RefCell::new(photos),
            permission: Cell::new(PermissionState::Granted),
            request_answer: Cell::new(PermissionState::Granted),
            ..Self::default()
        }
    }

    /// Set the current permission state and the answer to the next request.
    #[must_use]
    pub fn with_permission(self, current: PermissionState, on_request: PermissionState) -> Self {
        self.permission.set(current);
        self.request_answer.set(on_request);
        self
    }

    /// Make the next delete call fail with `error`.
    pub fn fail_next_delete(&self, error: ProviderError) {
        self.delete_failure.replace(Some(error));
    }

    /// Revoke access, as if the user flipped the system setting.
    pub fn revoke_access(&self) {
        self.permission.set(PermissionState::Denied);
        self.request_answer.set(PermissionState::Denied);
    }

    /// Ids currently in the library.
    #[must_use]
    pub fn ids(&self) -> Vec<AssetId> {
        self.photos.borrow().iter().map(|p| p.id.clone()).collect()
    }

    /// Number of delete calls received, successful or not.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.get()
    }
}

impl MediaProvider for MemoryProvider {
    async fn query_access(&self) -> PermissionState {
        self.permission.get()
    }

    async fn request_access(&self) -> PermissionState {
        if !self.permission.get().is_granted() {
            self.permission.set(self.request_answer.get().after_request());
        }
        self.permission.get()
    }

    async fn list_assets(
        &self,
        kind: MediaKind,
        limit: usize,
    ) -> Result<Vec<PhotoAsset>, ProviderError> {
        if !self.permission.get().is_granted() {
            return Err(ProviderError::PermissionRevoked);
        }
        if kind != MediaKind::Photo {
            return Ok(Vec::new());
        }

        let mut photos = self.photos.borrow().clone();
        photos.sort_by(|a, b| b.creation_time.cmp(&a.creation_time));
        photos.truncate(limit);
        debug!(count = photos.len(), limit, "Listed photos");
        Ok(photos)
    }

    async fn delete_assets(&self, ids: &[AssetId]) -> Result<(), ProviderError> {
        self.delete_calls.set(self.delete_calls.get() + 1);

        if let Some(error) = self.delete_failure.take() {
            warn!(%error, "Scripted delete failure");
            return Err(error);
        }
        if !self.permission.get().is_granted() {
            return Err(ProviderError::PermissionRevoked);
        }

        let mut photos = self.photos.borrow_mut();
        let missing: Vec<AssetId> = {
            let present: HashSet<&AssetId> = photos.iter().map(|p| &p.id).collect();
            ids.iter()
                .filter(|id| !present.contains(id))
                .cloned()
                .collect()
        };
        if !missing.is_empty() {
            return Err(ProviderError::AssetsMissing(missing));
        }

        let targets: HashSet<&AssetId> = ids.iter().collect();
        photos.retain(|p| !targets.contains(&p.id));
        debug!(count = ids.len(), "Deleted photos");
        Ok(())
    }
}
