//! Markdown indexes derived from committed catalog tables.

mod artist;
mod summary;

use std::path::Path;

use crate::catalog::write_replacing;
use crate::error::Result;

pub use artist::render_artist;
pub use summary::{heading_anchor, render_summary};

/// Write a rendered document next to its table, replacing any previous one.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    write_replacing(path, text.as_bytes())
}

fn track_count(n: usize) -> String {
    if n == 1 {
        "1 track".to_string()
    } else {
        format!("{n} tracks")
    }
}

/// Join blocks of lines with one blank line between blocks and a single
/// newline at the very end.
fn join_blocks(blocks: Vec<Vec<String>>) -> String {
    let mut out = blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .map(|b| b.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}
