//! Ledger state and transitions.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::asset::{AssetId, PhotoAsset};

/// Photos staged for permanent deletion.
///
/// Three structures are kept in lock-step: the ordered id list, the asset
/// snapshots keyed by id and the stage history used by undo. After every
/// operation they hold exactly the same ids.
#[derive(Debug, Clone, Default)]
pub struct DeletionLedger {
    /// Staged ids in insertion order.
    staged_ids: Vec<AssetId>,
    /// Snapshot of every staged asset.
    staged_assets: HashMap<AssetId, PhotoAsset>,
    /// Stage events, oldest first.
    history: Vec<AssetId>,
    /// Ids permanently deleted from the media store during this process.
    purged: HashSet<AssetId>,
    /// Bumped once per effective mutation.
    revision: u64,
}

impl DeletionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an asset for deletion.
    ///
    /// Returns `false` if it was already staged, in which case nothing
    /// changes and no second history entry is recorded.
    pub fn stage(&mut self, asset: PhotoAsset) -> bool {
        if self.staged_assets.contains_key(&asset.id) {
            return false;
        }

        debug!(asset_id = %asset.id, "Staging asset for deletion");
        self.staged_ids.push(asset.id.clone());
        self.history.push(asset.id.clone());
        self.staged_assets.insert(asset.id.clone(), asset);
        self.bump();
        true
    }

    /// Restore a single staged asset.
    ///
    /// Returns the snapshot if the id was staged.
    pub fn unstage(&mut self, id: &AssetId) -> Option<PhotoAsset> {
        let asset = self.remove_entry(id)?;
        debug!(asset_id = %id, "Restored staged asset");
        self.bump();
        Some(asset)
    }

    /// Restore several staged assets as one transition.
    ///
    /// Ids that are not staged are ignored. Returns how many were restored.
    pub fn unstage_many(&mut self, ids: &[AssetId]) -> usize {
        let removed = self.remove_all(ids);
        if removed > 0 {
            debug!(count = removed, "Restored staged assets");
            self.bump();
        }
        removed
    }

    /// Undo the most recent stage that is still in effect.
    ///
    /// History entries whose asset has already left the ledger some other
    /// way are discarded on the way down. Returns the restored snapshot, or
    /// `None` once history is exhausted.
    pub fn undo_last(&mut self) -> Option<PhotoAsset> {
        while let Some(id) = self.history.pop() {
            if let Some(asset) = self.staged_assets.remove(&id) {
                self.staged_ids.retain(|staged| staged != &id);
                debug!(asset_id = %id, "Undid last stage");
                self.bump();
                return Some(asset);
            }
            warn!(asset_id = %id, "Discarding stale history entry");
        }
        None
    }

    /// Record that `ids` were deleted from the media store.
    ///
    /// Only call this after the provider confirmed the deletion. The ids
    /// leave the ledger and are remembered as purged so triage sessions
    /// never show them again. Returns how many staged entries were removed.
    pub fn commit_permanently(&mut self, ids: &[AssetId]) -> usize {
        if ids.is_empty() {
            return 0;
        }

        let removed = self.remove_all(ids);
        self.purged.extend(ids.iter().cloned());
        info!(
            requested = ids.len(),
            removed, "Committed permanent deletion"
        );
        self.bump();
        removed
    }

    /// Drop every staged entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.staged_ids.len();
        if count == 0 && self.history.is_empty() {
            return 0;
        }

        self.staged_ids.clear();
        self.staged_assets.clear();
        self.history.clear();
        debug!(count, "Cleared deletion ledger");
        self.bump();
        count
    }

    /// Check if an asset is staged.
    #[must_use]
    pub fn is_staged(&self, id: &AssetId) -> bool {
        self.staged_assets.contains_key(id)
    }

    /// Check if an asset was permanently deleted.
    #[must_use]
    pub fn is_purged(&self, id: &AssetId) -> bool {
        self.purged.contains(id)
    }

    /// Whether a triage pass should skip this asset.
    #[must_use]
    pub fn hides(&self, id: &AssetId) -> bool {
        self.is_staged(id) || self.is_purged(id)
    }

    /// Staged ids in insertion order.
    #[must_use]
    pub fn staged_ids(&self) -> &[AssetId] {
        &self.staged_ids
    }

    /// Staged asset snapshots in insertion order.
    pub fn staged_assets(&self) -> impl Iterator<Item = &PhotoAsset> {
        self.staged_ids
            .iter()
            .filter_map(|id| self.staged_assets.get(id))
    }

    /// Snapshot of a staged asset.
    #[must_use]
    pub fn get(&self, id: &AssetId) -> Option<&PhotoAsset> {
        self.staged_assets.get(id)
    }

    /// The id `undo_last` would restore next.
    #[must_use]
    pub fn last_staged(&self) -> Option<&AssetId> {
        self.history.iter().rev().find(|id| self.is_staged(id))
    }

    /// Number of staged assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged_ids.len()
    }

    /// Check if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged_ids.is_empty()
    }

    /// Number of history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Mutation counter; unchanged by no-op calls.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Check that ids, snapshots and history describe the same set.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        let ids: HashSet<&AssetId> = self.staged_ids.iter().collect();
        let history: HashSet<&AssetId> = self.history.iter().collect();

        ids.len() == self.staged_ids.len()
            && history.len() == self.history.len()
            && ids.len() == self.staged_assets.len()
            && ids.iter().all(|id| self.staged_assets.contains_key(*id))
            && ids == history
    }

    fn remove_entry(&mut self, id: &AssetId) -> Option<PhotoAsset> {
        let asset = self.staged_assets.remove(id)?;
        self.staged_ids.retain(|staged| staged != id);
        self.history.retain(|entry| entry != id);
        Some(asset)
    }

    fn remove_all(&mut self, ids: &[AssetId]) -> usize {
        let targets: HashSet<&AssetId> = ids.iter().collect();
        let before = self.staged_ids.len();

        self.staged_ids.retain(|id| !targets.contains(id));
        self.staged_assets.retain(|id, _| !targets.contains(id));
        self.history.retain(|id| !targets.contains(id));

        before - self.staged_ids.len()
    }

    fn bump(&mut self) {
        self.revision += 1;
        debug_assert!(self.check_invariants(), "deletion ledger diverged");
    }
}
