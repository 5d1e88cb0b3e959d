//! Configuration loader and schema types.
//!
//! Folder names, extension allow-lists and output locations all come from
//! here; nothing is resolved against the process working directory.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
