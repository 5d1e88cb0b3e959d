//! Folder-name driven classification of a music library.
//!
//! `names` holds the string heuristics, `classify` walks one artist folder and
//! `summary` walks the cross-artist collection.

mod classify;
mod model;
pub mod names;
mod summary;

pub use classify::{Classifier, children, folder_role};
pub use model::*;
pub use summary::scan_summary;
