//! # snapsweep-core
//!
//! Core state machines for `SnapSweep`, a swipe-to-clean photo triage app.
//!
//! This crate provides:
//! - **Triage sessions** - one pass over a category, keep or delete per photo
//! - **Deletion ledger** - the shared staging area with restore and undo
//! - **Categories** - slicing the library by recency, month or random sample
//! - **Review workflows** - restoring or purging staged photos through the
//!   media provider
//!
//! The crate is synchronous at its core and single-threaded by design: the
//! host's event loop serializes every call. The only asynchronous boundary
//! is the [`MediaProvider`] the host implements.
//!
//! ## Example
//!
//! ```ignore
//! use snapsweep_core::{Category, Decision, ReviewScreen, SharedLedger, TriageSession};
//!
//! let ledger = SharedLedger::new();
//! let mut session = TriageSession::new(ledger.clone());
//! let mut review = ReviewScreen::new(ledger);
//!
//! open_category(&provider, &mut session, Category::parse("recent-7days"), &config).await?;
//! session.decide(Decision::Delete);
//!
//! review.select_all();
//! review.delete_selected(&provider).await?;
//! session.reconcile();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod asset;
pub mod category;
pub mod config;
mod error;
pub mod ledger;
pub mod provider;
pub mod service;
pub mod session;

pub use asset::{AssetId, MediaKind, PermissionState, PhotoAsset};
pub use category::{Category, CategorySummary, enumerate_categories, enumerate_categories_at};
pub use config::{ConfigError, TriageConfig};
pub use error::{Error, Result};
pub use ledger::{DeletionLedger, SharedLedger};
pub use provider::{MediaProvider, MemoryProvider, ProviderError};
pub use service::{ReviewOutcome, ReviewScreen, ensure_access, load_categories, open_category};
pub use session::{Decision, PassSummary, Progress, SwipeCommit, TriageSession};
