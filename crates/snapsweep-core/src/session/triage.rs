//! The triage session state machine.

use tracing::{debug, info};

use super::model::{Decision, PassSummary, Progress, SwipeCommit};
use crate::asset::{AssetId, PhotoAsset};
use crate::category::Category;
use crate::ledger::{DeletionLedger, SharedLedger};

/// One pass over a category's photos.
///
/// Besides the cursor the session tracks a frontier: the working-set index
/// of the next photo not yet decided on. The cursor is always the number of
/// visible photos in front of the frontier, which is what keeps it valid
/// when the review screen restores or purges photos behind the session's
/// back. A photo restored from behind the frontier reappears in its
/// original place but counts as already reviewed for this pass.
#[derive(Debug)]
pub struct TriageSession {
    ledger: SharedLedger,
    category: Option<Category>,
    working_set: Vec<PhotoAsset>,
    cursor: usize,
    frontier: usize,
    last_decision: Option<AssetId>,
    completed: bool,
}

impl TriageSession {
    /// Create an empty session bound to `ledger`.
    #[must_use]
    pub const fn new(ledger: SharedLedger) -> Self {
        Self {
            ledger,
            category: None,
            working_set: Vec::new(),
            cursor: 0,
            frontier: 0,
            last_decision: None,
            completed: false,
        }
    }

    /// Install the working set for `category`.
    ///
    /// Reopening the category that is already loaded keeps the cursor, so
    /// coming back from the review screen does not lose the user's place.
    /// Any other category starts a fresh pass.
    pub fn load(&mut self, assets: Vec<PhotoAsset>, category: Category) {
        let same_category = self.category == Some(category);
        self.working_set = assets;
        self.category = Some(category);

        if !same_category {
            self.cursor = 0;
            self.frontier = 0;
            self.last_decision = None;
            self.completed = false;
            debug!(%category, photos = self.working_set.len(), "Started triage pass");
            return;
        }

        let positions = self.visible_positions(&self.ledger.read());
        self.cursor = self.cursor.min(positions.len());
        self.frontier = positions
            .get(self.cursor)
            .copied()
            .unwrap_or(self.working_set.len());
        self.completed = self.completed && self.cursor >= positions.len();
        if self
            .last_decision
            .as_ref()
            .is_some_and(|id| !self.working_set.iter().any(|a| &a.id == id))
        {
            self.last_decision = None;
        }
        debug!(
            %category,
            photos = self.working_set.len(),
            cursor = self.cursor,
            "Reloaded triage pass"
        );
    }

    /// Apply a decision to the photo under the cursor.
    ///
    /// Returns the pass summary on the call that completes the pass, and
    /// `None` otherwise. Deciding on a complete pass does nothing.
    pub fn decide(&mut self, decision: Decision) -> Option<PassSummary> {
        let ledger = self.ledger.clone();
        let positions = self.visible_positions(&ledger.read());
        self.align_cursor(&positions);

        let &position = positions.get(self.cursor)?;
        let asset = &self.working_set[position];
        let visible_after = match decision {
            Decision::Keep => {
                debug!(asset_id = %asset.id, cursor = self.cursor, "Kept photo");
                self.cursor += 1;
                positions.len()
            }
            Decision::Delete => {
                debug!(asset_id = %asset.id, cursor = self.cursor, "Deleted photo");
                ledger.write().stage(asset.clone());
                self.last_decision = Some(asset.id.clone());
                positions.len() - 1
            }
        };
        self.frontier = position + 1;

        self.complete_if_done(visible_after)
    }

    /// Apply a committed swipe gesture.
    pub fn swipe(&mut self, commit: SwipeCommit) -> Option<PassSummary> {
        self.decide(commit.into())
    }

    /// Take back the most recent delete made in this session.
    ///
    /// The photo leaves the ledger and the cursor moves back onto it.
    /// Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(id) = self.last_decision.take() else {
            return false;
        };

        let restored = {
            let mut ledger = self.ledger.write();
            if ledger.last_staged() == Some(&id) {
                ledger.undo_last()
            } else {
                ledger.unstage(&id)
            }
        };
        if restored.is_none() {
            debug!(asset_id = %id, "Nothing to undo, photo already left the ledger");
            return false;
        }

        if let Some(position) = self.working_set.iter().position(|a| a.id == id) {
            self.frontier = position;
        }
        let positions = self.visible_positions(&self.ledger.read());
        self.align_cursor(&positions);
        self.completed = self.cursor >= positions.len();
        debug!(asset_id = %id, cursor = self.cursor, "Undid delete");
        true
    }

    /// Re-align the session with the ledger after it changed elsewhere.
    ///
    /// Call this whenever the triage screen regains focus. Returns the pass
    /// summary if the pass became complete because of outside changes, for
    /// example when the review screen purged every remaining photo. Calling
    /// it again without intervening changes does nothing.
    pub fn reconcile(&mut self) -> Option<PassSummary> {
        let positions = {
            let ledger = self.ledger.read();
            if self
                .last_decision
                .as_ref()
                .is_some_and(|id| !ledger.is_staged(id))
            {
                self.last_decision = None;
            }
            self.visible_positions(&ledger)
        };

        if positions.is_empty() {
            self.cursor = 0;
            self.frontier = self.working_set.len();
        } else {
            self.align_cursor(&positions);
        }

        self.complete_if_done(positions.len())
    }

    /// Discard the pass, e.g. when the user leaves the category screen.
    pub fn reset(&mut self) {
        self.category = None;
        self.working_set.clear();
        self.cursor = 0;
        self.frontier = 0;
        self.last_decision = None;
        self.completed = false;
    }

    /// The photo under the cursor, if the pass is not complete.
    #[must_use]
    pub fn current(&self) -> Option<&PhotoAsset> {
        let positions = self.visible_positions(&self.ledger.read());
        positions
            .get(self.cursor)
            .map(|&position| &self.working_set[position])
    }

    /// Photos of the pass not hidden by the ledger, in working-set order.
    #[must_use]
    pub fn visible(&self) -> Vec<&PhotoAsset> {
        let ledger = self.ledger.read();
        self.working_set
            .iter()
            .filter(|asset| !ledger.hides(&asset.id))
            .collect()
    }

    /// Number of visible photos.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        let ledger = self.ledger.read();
        self.working_set
            .iter()
            .filter(|asset| !ledger.hides(&asset.id))
            .count()
    }

    /// Index of the current photo within [`TriageSession::visible`].
    ///
    /// Reflects the ledger as of the last decision, undo or reconcile.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every visible photo has been reviewed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.visible_count()
    }

    /// The photo most recently deleted in this session, if undo is possible.
    #[must_use]
    pub const fn last_decision(&self) -> Option<&AssetId> {
        self.last_decision.as_ref()
    }

    /// Whether [`TriageSession::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.last_decision
            .as_ref()
            .is_some_and(|id| self.ledger.read().is_staged(id))
    }

    /// The loaded category.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// The full working set, including photos the ledger hides.
    #[must_use]
    pub fn working_set(&self) -> &[PhotoAsset] {
        &self.working_set
    }

    /// Handle to the ledger this session stages into.
    #[must_use]
    pub const fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// Position indicator for the current photo.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            reviewed: self.cursor,
            total: self.visible_count(),
        }
    }

    /// Tally of the pass as it stands.
    #[must_use]
    pub fn summary(&self) -> PassSummary {
        let ledger = self.ledger.read();
        let staged = self
            .working_set
            .iter()
            .filter(|asset| ledger.is_staged(&asset.id))
            .count();
        let kept = self.working_set[..self.frontier.min(self.working_set.len())]
            .iter()
            .filter(|asset| !ledger.hides(&asset.id))
            .count();

        PassSummary {
            total: self.working_set.len(),
            kept,
            staged,
        }
    }

    fn visible_positions(&self, ledger: &DeletionLedger) -> Vec<usize> {
        self.working_set
            .iter()
            .enumerate()
            .filter(|(_, asset)| !ledger.hides(&asset.id))
            .map(|(position, _)| position)
            .collect()
    }

    // Never yields more than `positions.len()`, so the cursor needs no
    // separate clamp after outside changes.
    fn align_cursor(&mut self, positions: &[usize]) {
        self.cursor = positions.partition_point(|&position| position < self.frontier);
    }

    fn complete_if_done(&mut self, visible_count: usize) -> Option<PassSummary> {
        if self.working_set.is_empty() || self.cursor < visible_count {
            self.completed = false;
            return None;
        }
        if self.completed {
            return None;
        }

        self.completed = true;
        let summary = self.summary();
        info!(
            category = ?self.category,
            total = summary.total,
            kept = summary.kept,
            staged = summary.staged,
            "Triage pass complete"
        );
        Some(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::similar_names)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;

    fn photos(names: &[&str]) -> Vec<PhotoAsset> {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        names
            .iter()
            .zip(0..)
            .map(|(name, i)| {
                PhotoAsset::new(*name, base + Duration::minutes(i), format!("file:///{name}.jpg"))
            })
            .collect()
    }

    fn session_with(names: &[&str]) -> (TriageSession, SharedLedger) {
        let ledger = SharedLedger::new();
        let mut session = TriageSession::new(ledger.clone());
        session.load(photos(names), Category::All);
        (session, ledger)
    }

    fn visible_ids(session: &TriageSession) -> Vec<&str> {
        session.visible().iter().map(|a| a.id.as_str()).collect()
    }

    fn current_id(session: &TriageSession) -> Option<&str> {
        session.current().map(|a| a.id.as_str())
    }

    #[test]
    fn test_keep_advances_cursor() {
        let (mut session, _) = session_with(&["a", "b", "c"]);

        assert_eq!(current_id(&session), Some("a"));
        assert!(session.decide(Decision::Keep).is_none());
        assert_eq!(session.cursor(), 1);
        assert_eq!(current_id(&session), Some("b"));
    }

    #[test]
    fn test_delete_slides_next_photo_under_cursor() {
        let (mut session, ledger) = session_with(&["a", "b", "c"]);

        session.decide(Decision::Delete);

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.visible_count(), 2);
        assert_eq!(current_id(&session), Some("b"));
        assert!(ledger.read().is_staged(&AssetId::from("a")));
        assert_eq!(session.last_decision(), Some(&AssetId::from("a")));
    }

    #[test]
    fn test_completion_is_edge_triggered() {
        let (mut session, _) = session_with(&["a", "b", "c"]);

        assert!(session.decide(Decision::Keep).is_none());
        assert!(session.decide(Decision::Keep).is_none());
        let summary = session.decide(Decision::Keep).unwrap();

        assert_eq!(
            summary,
            PassSummary {
                total: 3,
                kept: 3,
                staged: 0
            }
        );
        assert!(summary.kept_everything());
        assert!(session.is_complete());
        assert!(session.reconcile().is_none());
        assert!(session.decide(Decision::Keep).is_none());
        assert_eq!(session.cursor(), 3);
    }

    #[test]
    fn test_completion_by_deleting_last_photo() {
        let (mut session, _) = session_with(&["a", "b"]);

        session.decide(Decision::Keep);
        let summary = session.decide(Decision::Delete).unwrap();

        assert_eq!(summary.kept, 1);
        assert_eq!(summary.staged, 1);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.visible_count(), 1);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_decide_on_empty_session_is_noop() {
        let (mut session, ledger) = session_with(&[]);

        assert_eq!(session.visible_count(), 0);
        assert!(session.decide(Decision::Delete).is_none());
        assert!(session.reconcile().is_none());
        assert!(ledger.read().is_empty());
        assert!(session.is_complete());
    }

    #[test]
    fn test_delete_then_undo_is_identity() {
        let (mut session, ledger) = session_with(&["a", "b", "c", "d"]);
        session.decide(Decision::Keep);

        let cursor = session.cursor();
        let visible = session.visible_count();
        session.decide(Decision::Delete);
        assert!(session.can_undo());
        assert!(session.undo());

        assert_eq!(session.cursor(), cursor);
        assert_eq!(session.visible_count(), visible);
        assert!(ledger.read().is_empty());
        assert_eq!(current_id(&session), Some("b"));
        assert!(session.last_decision().is_none());
    }

    #[test]
    fn test_undo_without_delete_is_noop() {
        let (mut session, _) = session_with(&["a", "b"]);
        session.decide(Decision::Keep);

        assert!(!session.can_undo());
        assert!(!session.undo());
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_undo_after_keep_returns_to_deleted_photo() {
        let (mut session, ledger) = session_with(&["a", "b", "c"]);
        session.decide(Decision::Delete);
        session.decide(Decision::Keep);

        assert!(session.undo());

        assert_eq!(current_id(&session), Some("a"));
        assert_eq!(session.cursor(), 0);
        assert!(ledger.read().is_empty());
    }

    #[test]
    fn test_undo_reopens_completed_pass() {
        let (mut session, _) = session_with(&["a"]);
        assert!(session.decide(Decision::Delete).is_some());

        assert!(session.undo());
        assert!(!session.is_complete());
        assert!(session.decide(Decision::Keep).is_some());
    }

    #[test]
    fn test_undo_targets_session_delete_not_ledger_top() {
        let ledger = SharedLedger::new();
        let mut session = TriageSession::new(ledger.clone());
        session.load(photos(&["a", "b"]), Category::All);
        session.decide(Decision::Delete);

        // Another pass staged something afterwards.
        ledger.write().stage(photos(&["z"]).remove(0));

        assert!(session.undo());
        assert!(!ledger.read().is_staged(&AssetId::from("a")));
        assert!(ledger.read().is_staged(&AssetId::from("z")));
        assert!(ledger.read().check_invariants());
    }

    #[test]
    fn test_restore_behind_cursor_is_not_reoffered() {
        let (mut session, ledger) = session_with(&["a", "b", "c"]);
        session.decide(Decision::Delete);
        session.decide(Decision::Keep);
        assert_eq!(current_id(&session), Some("c"));

        ledger.write().unstage(&AssetId::from("a"));
        assert!(session.reconcile().is_none());

        assert_eq!(visible_ids(&session), vec!["a", "b", "c"]);
        assert_eq!(session.cursor(), 2);
        assert_eq!(current_id(&session), Some("c"));
        assert!(!session.can_undo());
        assert!(session.last_decision().is_none());

        let summary = session.decide(Decision::Keep).unwrap();
        assert_eq!(summary.kept, 3);
    }

    #[test]
    fn test_purging_everything_completes_pass() {
        let (mut session, ledger) = session_with(&["a", "b"]);
        session.decide(Decision::Delete);
        session.decide(Decision::Delete);
        assert!(session.is_complete());

        // Completion already signalled by the last delete.
        let ids: Vec<AssetId> = ledger.read().staged_ids().to_vec();
        ledger.write().commit_permanently(&ids);
        assert!(session.reconcile().is_none());
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.visible_count(), 0);
    }

    #[test]
    fn test_reconcile_signals_completion_when_remaining_vanish() {
        let ledger = SharedLedger::new();
        let mut first = TriageSession::new(ledger.clone());
        let mut second = TriageSession::new(ledger.clone());
        first.load(photos(&["a", "b"]), Category::All);
        second.load(photos(&["a", "b"]), Category::Month { year: 2026, month: 3 });

        second.decide(Decision::Delete);
        second.decide(Decision::Delete);
        let ids: Vec<AssetId> = ledger.read().staged_ids().to_vec();
        ledger.write().commit_permanently(&ids);

        let summary = first.reconcile().unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(first.cursor(), 0);
        assert!(first.reconcile().is_none());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let (mut session, ledger) = session_with(&["a", "b", "c", "d"]);
        session.decide(Decision::Delete);
        session.decide(Decision::Keep);
        ledger.write().unstage(&AssetId::from("a"));

        session.reconcile();
        let cursor = session.cursor();
        let revision = ledger.read().revision();
        assert!(session.reconcile().is_none());
        assert_eq!(session.cursor(), cursor);
        assert_eq!(ledger.read().revision(), revision);
    }

    #[test]
    fn test_reconcile_after_tail_purged_stays_at_end() {
        let (mut session, ledger) = session_with(&["a", "b", "c"]);
        session.decide(Decision::Keep);
        session.decide(Decision::Keep);
        assert!(session.decide(Decision::Keep).is_some());

        {
            let mut ledger = ledger.write();
            ledger.stage(photos(&["c"]).remove(0));
            ledger.commit_permanently(&[AssetId::from("c")]);
        }

        assert!(session.reconcile().is_none());
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.visible_count(), 2);
        assert!(session.is_complete());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_load_same_category_keeps_cursor() {
        let (mut session, _) = session_with(&["a", "b", "c"]);
        session.decide(Decision::Keep);
        session.decide(Decision::Keep);

        session.load(photos(&["a", "b", "c"]), Category::All);
        assert_eq!(session.cursor(), 2);
        assert_eq!(current_id(&session), Some("c"));

        session.load(photos(&["a", "b", "c"]), Category::OnThisDay);
        assert_eq!(session.cursor(), 0);
        assert_eq!(current_id(&session), Some("a"));
    }

    #[test]
    fn test_load_same_category_clamps_to_shorter_set() {
        let (mut session, _) = session_with(&["a", "b", "c"]);
        session.decide(Decision::Keep);
        session.decide(Decision::Keep);

        session.load(photos(&["a"]), Category::All);
        assert_eq!(session.cursor(), 1);
        assert!(session.is_complete());
    }

    #[test]
    fn test_visible_excludes_photos_staged_elsewhere() {
        let ledger = SharedLedger::new();
        ledger.write().stage(photos(&["b"]).remove(0));
        let mut session = TriageSession::new(ledger);
        session.load(photos(&["a", "b", "c"]), Category::All);

        assert_eq!(visible_ids(&session), vec!["a", "c"]);
        session.decide(Decision::Keep);
        assert_eq!(current_id(&session), Some("c"));
    }

    #[test]
    fn test_swipe_maps_to_decisions() {
        let (mut session, ledger) = session_with(&["a", "b"]);
        session.swipe(SwipeCommit::Left);
        session.swipe(SwipeCommit::Right);

        assert!(ledger.read().is_staged(&AssetId::from("a")));
        assert!(session.is_complete());
    }

    #[test]
    fn test_progress_tracks_cursor() {
        let (mut session, _) = session_with(&["a", "b", "c"]);
        session.decide(Decision::Keep);
        session.decide(Decision::Delete);

        let progress = session.progress();
        assert_eq!(progress.reviewed, 1);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.to_string(), "2/2");
    }

    #[test]
    fn test_reset_discards_pass() {
        let (mut session, ledger) = session_with(&["a", "b"]);
        session.decide(Decision::Delete);

        session.reset();
        assert!(session.category().is_none());
        assert!(session.working_set().is_empty());
        assert!(session.last_decision().is_none());
        // Staged photos outlive the session.
        assert_eq!(ledger.read().len(), 1);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Decide(bool),
        Undo,
        Reconcile,
        Restore(u8),
        RestoreAll,
        Purge(u8),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            5 => any::<bool>().prop_map(Step::Decide),
            2 => Just(Step::Undo),
            2 => Just(Step::Reconcile),
            2 => (0u8..8).prop_map(Step::Restore),
            1 => Just(Step::RestoreAll),
            1 => (0u8..8).prop_map(Step::Purge),
        ]
    }

    const NAMES: [&str; 8] = ["p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7"];

    proptest! {
        #[test]
        fn prop_cursor_never_exceeds_visible_count(
            len in 0usize..8,
            steps in prop::collection::vec(step(), 0..48),
        ) {
            let (mut session, ledger) = session_with(&NAMES[..len]);

            for step in steps {
                match step {
                    Step::Decide(keep) => {
                        let decision = if keep { Decision::Keep } else { Decision::Delete };
                        session.decide(decision);
                    }
                    Step::Undo => {
                        session.undo();
                    }
                    Step::Reconcile => {
                        session.reconcile();
                    }
                    Step::Restore(k) => {
                        ledger.write().unstage(&AssetId::from(NAMES[usize::from(k)]));
                        session.reconcile();
                    }
                    Step::RestoreAll => {
                        ledger.write().clear();
                        session.reconcile();
                    }
                    Step::Purge(k) => {
                        let id = AssetId::from(NAMES[usize::from(k)]);
                        if ledger.read().is_staged(&id) {
                            ledger.write().commit_permanently(&[id]);
                        }
                        session.reconcile();
                    }
                }
                prop_assert!(session.cursor() <= session.visible_count());
                prop_assert!(ledger.read().check_invariants());
            }
        }

        #[test]
        fn prop_delete_then_undo_restores_state(
            len in 1usize..8,
            keeps in 0usize..8,
        ) {
            let (mut session, ledger) = session_with(&NAMES[..len]);
            for _ in 0..keeps.min(len - 1) {
                session.decide(Decision::Keep);
            }
            let cursor = session.cursor();
            let visible = session.visible_count();
            let staged = ledger.read().staged_ids().to_vec();

            session.decide(Decision::Delete);
            prop_assert!(session.undo());

            prop_assert_eq!(session.cursor(), cursor);
            prop_assert_eq!(session.visible_count(), visible);
            let guard = ledger.read();
            prop_assert_eq!(guard.staged_ids(), staged.as_slice());
        }

        #[test]
        fn prop_reconcile_twice_changes_nothing(
            steps in prop::collection::vec(step(), 0..32),
        ) {
            let (mut session, ledger) = session_with(&NAMES);
            for step in steps {
                match step {
                    Step::Decide(keep) => {
                        session.decide(if keep { Decision::Keep } else { Decision::Delete });
                    }
                    Step::Undo => {
                        session.undo();
                    }
                    Step::Restore(k) => {
                        ledger.write().unstage(&AssetId::from(NAMES[usize::from(k)]));
                    }
                    Step::RestoreAll => {
                        ledger.write().clear();
                    }
                    Step::Purge(k) => {
                        let id = AssetId::from(NAMES[usize::from(k)]);
                        if ledger.read().is_staged(&id) {
                            ledger.write().commit_permanently(&[id]);
                        }
                    }
                    Step::Reconcile => {}
                }
            }

            session.reconcile();
            let cursor = session.cursor();
            let last = session.last_decision().cloned();
            let complete = session.is_complete();

            prop_assert!(session.reconcile().is_none());
            prop_assert_eq!(session.cursor(), cursor);
            prop_assert_eq!(session.last_decision().cloned(), last);
            prop_assert_eq!(session.is_complete(), complete);
        }
    }
}
