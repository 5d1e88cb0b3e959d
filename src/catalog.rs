//! Persisted catalog tables and the diff-then-commit cycle around them.
//!
//! A scan never patches a table: it is compared as a whole against what is on
//! disk and, when allowed, replaces it as a whole.

mod reconcile;
mod table;

pub use reconcile::{CatalogDelta, ChangeSummary, Confirm, Decision, Outcome, Verdict, reconcile};
pub use table::{CatalogRow, CatalogStore};
pub(crate) use table::write_replacing;
