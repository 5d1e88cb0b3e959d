use std::path::Path;

use crate::config::ScanSettings;
use crate::error::Result;

use super::classify::children;
use super::model::SummaryRecord;
use super::names::{has_extension, parse_summary_file_name};

/// Collect summary rows from files one level inside each subfolder of `root`.
///
/// Files that are not named `Singer-TrackName_Source` are skipped silently.
pub fn scan_summary(root: &Path, scan: &ScanSettings) -> Result<Vec<SummaryRecord>> {
    let mut records = Vec::new();
    for folder in children(root, scan)? {
        if !folder.file_type().is_dir() {
            continue;
        }
        for entry in children(folder.path(), scan)? {
            let path = entry.path();
            if !entry.file_type().is_file() || !has_extension(path, &scan.summary_extensions) {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
                continue;
            };
            match parse_summary_file_name(&stem) {
                Some(record) => records.push(record),
                None => tracing::debug!(file = %path.display(), "skipping unrecognised summary file"),
            }
        }
    }
    Ok(records)
}
