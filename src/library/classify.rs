use std::fs;
use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::config::{LayoutSettings, ScanSettings};
use crate::error::{CatalogError, Result};

use super::model::{ReleaseKind, TrackRecord};
use super::names::{
    has_extension, is_excluded, parse_album_folder_name, parse_live_file_name,
    parse_single_folder_name, parse_track_file_name,
};

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate children of `dir`, in filesystem order.
///
/// A missing or unreadable `dir` is an error. A child that cannot be read,
/// such as a dangling symlink, is logged and skipped.
pub fn children(dir: &Path, scan: &ScanSettings) -> Result<Vec<DirEntry>> {
    let meta = fs::metadata(dir).map_err(|e| CatalogError::io(dir, e))?;
    if !meta.is_dir() {
        return Err(CatalogError::io(dir, io::Error::other("not a directory")));
    }

    let walker = WalkDir::new(dir)
        .follow_links(scan.follow_links)
        .min_depth(1)
        .max_depth(1);

    let mut out = Vec::new();
    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !scan.include_hidden && is_hidden(entry.path()) {
            continue;
        }
        out.push(entry);
    }
    Ok(out)
}

/// Which section of an artist folder a subfolder belongs to.
pub fn folder_role(name: &str, layout: &LayoutSettings) -> ReleaseKind {
    if name == layout.singles_folder {
        ReleaseKind::Single
    } else if name == layout.live_folder {
        ReleaseKind::Live
    } else {
        ReleaseKind::Album
    }
}

/// Turns one artist's folder tree into catalog records.
pub struct Classifier<'a> {
    layout: &'a LayoutSettings,
    scan: &'a ScanSettings,
}

impl<'a> Classifier<'a> {
    pub fn new(layout: &'a LayoutSettings, scan: &'a ScanSettings) -> Self {
        Self { layout, scan }
    }

    /// Classify every release under `artist_dir`.
    ///
    /// Records come out in directory iteration order; files directly in
    /// `artist_dir` are ignored.
    pub fn classify_artist(&self, artist_dir: &Path) -> Result<Vec<TrackRecord>> {
        let mut records = Vec::new();
        for entry in children(artist_dir, self.scan)? {
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry_name(&entry);
            let found = match folder_role(&name, self.layout) {
                ReleaseKind::Album => self.classify_album(entry.path())?,
                ReleaseKind::Single => self.classify_singles(entry.path())?,
                ReleaseKind::Live => self.classify_live(entry.path())?,
            };
            tracing::debug!(folder = %name, records = found.len(), "classified folder");
            records.extend(found);
        }
        Ok(records)
    }

    /// One album or EP folder: the folder name dates and titles every track.
    pub fn classify_album(&self, album_dir: &Path) -> Result<Vec<TrackRecord>> {
        let folder_name = album_dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (date, album) = parse_album_folder_name(&folder_name);

        let mut records = Vec::new();
        for entry in children(album_dir, self.scan)? {
            let path = entry.path();
            if !entry.file_type().is_file() || !has_extension(path, &self.scan.audio_extensions) {
                continue;
            }
            let stem = file_stem(path);
            if is_excluded(&stem, &self.scan.exclude_marker) {
                continue;
            }
            let (no, name) = parse_track_file_name(&stem);
            records.push(TrackRecord::album(&date, &album, &no, &name));
        }
        Ok(records)
    }

    /// The singles container: each subfolder is read like an album, then every
    /// track is re-filed as a single dated by that subfolder's own name.
    pub fn classify_singles(&self, singles_dir: &Path) -> Result<Vec<TrackRecord>> {
        let mut records = Vec::new();
        for entry in children(singles_dir, self.scan)? {
            if !entry.file_type().is_dir() {
                continue;
            }
            let date = parse_single_folder_name(&entry_name(&entry));
            records.extend(
                self.classify_album(entry.path())?
                    .into_iter()
                    .map(|record| record.into_single(&date)),
            );
        }
        Ok(records)
    }

    /// The live container: one record per video file.
    pub fn classify_live(&self, live_dir: &Path) -> Result<Vec<TrackRecord>> {
        let mut records = Vec::new();
        for entry in children(live_dir, self.scan)? {
            let path = entry.path();
            if !entry.file_type().is_file() || !has_extension(path, &self.scan.video_extensions) {
                continue;
            }
            let stem = file_stem(path);
            if is_excluded(&stem, &self.scan.exclude_marker) {
                continue;
            }
            let (date, name) = parse_live_file_name(&stem);
            records.push(TrackRecord::live(&date, &name));
        }
        Ok(records)
    }
}
