//! Screen-level workflows.
//!
//! This is the layer that awaits the media provider and then applies the
//! resolved result to the ledger or a session. The ledger itself is never
//! touched before a provider call has succeeded.

pub mod library;
pub mod review;

pub use library::{ensure_access, load_categories, open_category};
pub use review::{ReviewOutcome, ReviewScreen};
