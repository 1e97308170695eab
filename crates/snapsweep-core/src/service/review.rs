//! The review screen: staged photos awaiting restore or permanent deletion.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::asset::{AssetId, PhotoAsset};
use crate::ledger::SharedLedger;
use crate::provider::MediaProvider;
use crate::Result;

/// What a review action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewOutcome {
    /// Number of photos restored or deleted.
    pub affected: usize,
    /// Whether nothing is staged any more; hosts navigate home on this.
    pub ledger_emptied: bool,
}

/// State of the review screen.
///
/// Holds the user's selection over the shared ledger. Restores apply to the
/// ledger immediately. Permanent deletes go to the provider first and touch
/// the ledger only once the provider reports success.
#[derive(Debug)]
pub struct ReviewScreen {
    ledger: SharedLedger,
    selection: HashSet<AssetId>,
}

impl ReviewScreen {
    /// Create a review screen over `ledger` with nothing selected.
    #[must_use]
    pub fn new(ledger: SharedLedger) -> Self {
        Self {
            ledger,
            selection: HashSet::new(),
        }
    }

    /// Staged photos in the order they were staged.
    #[must_use]
    pub fn staged(&self) -> Vec<PhotoAsset> {
        self.ledger.read().staged_assets().cloned().collect()
    }

    /// Number of staged photos.
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.ledger.read().len()
    }

    /// Flip the selection of a staged photo. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &AssetId) -> bool {
        if self.selection.remove(id) {
            false
        } else {
            self.select(id)
        }
    }

    /// Select a staged photo. Ids that are not staged are ignored.
    pub fn select(&mut self, id: &AssetId) -> bool {
        if !self.ledger.read().is_staged(id) {
            return false;
        }
        self.selection.insert(id.clone());
        true
    }

    /// Deselect a photo.
    pub fn deselect(&mut self, id: &AssetId) {
        self.selection.remove(id);
    }

    /// Select every staged photo.
    pub fn select_all(&mut self) {
        let ledger = self.ledger.read();
        self.selection = ledger.staged_ids().iter().cloned().collect();
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Check if a photo is selected.
    #[must_use]
    pub fn is_selected(&self, id: &AssetId) -> bool {
        self.selection.contains(id)
    }

    /// Number of selected photos.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Forget selected ids that are no longer staged.
    pub fn prune_selection(&mut self) {
        let ledger = self.ledger.read();
        self.selection.retain(|id| ledger.is_staged(id));
    }

    /// Selected ids that are still staged, in ledger order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<AssetId> {
        self.ledger
            .read()
            .staged_ids()
            .iter()
            .filter(|id| self.selection.contains(*id))
            .cloned()
            .collect()
    }

    /// Put the selected photos back into the library.
    pub fn restore_selected(&mut self) -> ReviewOutcome {
        let ids = self.selected_ids();
        let affected = self.ledger.write().unstage_many(&ids);
        self.selection.clear();

        debug!(count = affected, "Restored selected photos");
        self.outcome(affected)
    }

    /// Put every staged photo back into the library.
    pub fn restore_all(&mut self) -> ReviewOutcome {
        let affected = self.ledger.write().clear();
        self.selection.clear();

        debug!(count = affected, "Restored all photos");
        self.outcome(affected)
    }

    /// Permanently delete the selected photos.
    ///
    /// # Errors
    ///
    /// Returns the provider error if deletion fails; ledger and selection
    /// are left exactly as they were so the user can retry.
    pub async fn delete_selected<P: MediaProvider>(
        &mut self,
        provider: &P,
    ) -> Result<ReviewOutcome> {
        let ids = self.selected_ids();
        self.delete(provider, ids).await
    }

    /// Permanently delete every staged photo.
    ///
    /// # Errors
    ///
    /// Returns the provider error if deletion fails; the ledger is left
    /// untouched.
    pub async fn delete_all<P: MediaProvider>(
        &mut self,
        provider: &P,
    ) -> Result<ReviewOutcome> {
        let ids = self.ledger.read().staged_ids().to_vec();
        self.delete(provider, ids).await
    }

    async fn delete<P: MediaProvider>(
        &mut self,
        provider: &P,
        ids: Vec<AssetId>,
    ) -> Result<ReviewOutcome> {
        if ids.is_empty() {
            return Ok(self.outcome(0));
        }

        if let Err(error) = provider.delete_assets(&ids).await {
            warn!(%error, count = ids.len(), "Permanent delete failed");
            return Err(error.into());
        }

        // Only what was actually sent to the provider leaves the ledger;
        // anything staged while the call was in flight stays put.
        let affected = self.ledger.write().commit_permanently(&ids);
        self.selection.retain(|id| !ids.contains(id));
        info!(count = affected, "Permanently deleted photos");
        Ok(self.outcome(affected))
    }

    fn outcome(&self, affected: usize) -> ReviewOutcome {
        ReviewOutcome {
            affected,
            ledger_emptied: self.ledger.read().is_empty(),
        }
    }
}
