//! Photo categories: how the library is sliced into triage passes.
//!
//! A category id such as `month-2025-3` is parsed once, at selection time,
//! into a [`Category`] variant. Filtering and enumeration work on the
//! variant and never look at the string again.

mod enumerate;
mod filter;
mod model;

pub use enumerate::{CategorySummary, enumerate_categories, enumerate_categories_at};
pub use model::Category;
