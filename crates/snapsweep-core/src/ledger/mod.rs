//! The staged-deletion ledger.
//!
//! Photos swiped away during triage are not deleted right away. They are
//! staged here, where the review screen can restore them or hand them to the
//! media provider for permanent deletion. One ledger lives for the whole
//! process and is shared by every triage session and the review screen
//! through a [`SharedLedger`] handle.
//!
//! Every operation is a synchronous, total state transition: there is no
//! error path, and asking for something that is not there is a no-op.

mod shared;
mod store;

pub use shared::SharedLedger;
pub use store::DeletionLedger;
