//! Photo assets as reported by the device media store.
//!
//! Assets are value types: the core never mutates them, it only copies ids
//! and snapshots between the triage session and the deletion ledger.

mod model;

pub use model::{AssetId, MediaKind, PermissionState, PhotoAsset};
