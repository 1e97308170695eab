//! Triage sessions: one swipe-through pass over a category.
//!
//! The session never keeps its own shrinking copy of the photos. The list the
//! user sees is recomputed from the fixed working set minus whatever the
//! [`DeletionLedger`](crate::ledger::DeletionLedger) currently hides, and the
//! cursor is an index into that recomputed list. Deleting the photo under the
//! cursor therefore does not move the cursor: the next photo slides into
//! place.
//!
//! # Example
//!
//! ```ignore
//! use snapsweep_core::{Category, Decision, SharedLedger, TriageSession};
//!
//! let ledger = SharedLedger::new();
//! let mut session = TriageSession::new(ledger.clone());
//! session.load(photos, Category::All);
//!
//! session.decide(Decision::Delete);
//! if let Some(summary) = session.decide(Decision::Keep) {
//!     // Pass complete - show the summary screen
//! }
//!
//! // Back from the review screen
//! session.reconcile();
//! ```

mod model;
mod triage;

pub use model::{Decision, PassSummary, Progress, SwipeCommit};
pub use triage::TriageSession;
