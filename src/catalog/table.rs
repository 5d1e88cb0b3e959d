use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::config::UpdateMode;
use crate::error::{CatalogError, Result};
use crate::library::{SummaryRecord, TrackRecord};

use super::reconcile::{Confirm, Outcome, Verdict, reconcile};

const BOM: &[u8] = b"\xEF\xBB\xBF";
const CRLF: &[u8] = b"\r\n";

/// A record type that can live in a persisted catalog table.
pub trait CatalogRow: Serialize + DeserializeOwned + Ord + Clone + fmt::Display {
    /// Expected header row, in column order.
    const HEADER: &'static [&'static str];
}

impl CatalogRow for TrackRecord {
    const HEADER: &'static [&'static str] = &["Type", "Date", "Album", "No", "Name"];
}

impl CatalogRow for SummaryRecord {
    const HEADER: &'static [&'static str] = &["Singer", "Name", "From"];
}

/// One CSV table on disk: UTF-8 with BOM, comma separated, header first,
/// CRLF between rows and nothing after the last one.
pub struct CatalogStore<R> {
    path: PathBuf,
    rows: PhantomData<R>,
}

impl<R: CatalogRow> CatalogStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted records; a table that does not exist yet is empty.
    pub fn load(&self) -> Result<Vec<R>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CatalogError::io(&self.path, e)),
        };
        self.decode(&bytes)
    }

    /// Replace the whole table with `records`.
    ///
    /// The new content is written to a temporary file beside the table and
    /// renamed over it, so readers see either the old table or the new one.
    pub fn commit(&self, records: &[R]) -> Result<()> {
        let bytes = self.encode(records)?;
        write_replacing(&self.path, &bytes)
    }

    /// Diff `fresh` against the persisted table and commit it when allowed.
    pub fn reconcile(
        &self,
        label: &str,
        fresh: &[R],
        mode: UpdateMode,
        confirm: &mut dyn Confirm,
    ) -> Result<Outcome> {
        let existing = self.load()?;
        match reconcile(label, fresh, &existing, mode, confirm)? {
            Verdict::Unchanged => Ok(Outcome::Unchanged),
            Verdict::Skip(_) => Ok(Outcome::Skipped),
            Verdict::Commit(delta) => {
                self.commit(fresh)?;
                Ok(Outcome::Committed {
                    added: delta.added.len(),
                    removed: delta.removed.len(),
                })
            }
        }
    }

    fn encode(&self, records: &[R]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(BOM.to_vec());
        writer.write_record(R::HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        let mut bytes = writer
            .into_inner()
            .map_err(|e| CatalogError::io(&self.path, e.into_error()))?;
        if bytes.ends_with(CRLF) {
            bytes.truncate(bytes.len() - CRLF.len());
        }
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<R>> {
        let body = bytes.strip_prefix(BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(body);

        let header = reader.headers().map_err(|e| self.malformed(e))?;
        if !header.iter().eq(R::HEADER.iter().copied()) {
            return Err(self.malformed(format!(
                "expected header {:?}, found {:?}",
                R::HEADER.join(","),
                header.iter().collect::<Vec<_>>().join(",")
            )));
        }

        reader
            .deserialize()
            .map(|row| row.map_err(|e| self.malformed(e)))
            .collect()
    }

    fn malformed(&self, reason: impl ToString) -> CatalogError {
        CatalogError::MalformedTable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Write `bytes` to `path` through a sibling temporary file and a rename.
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| CatalogError::io(&dir, e))?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| CatalogError::io(&dir, e))?;
    if let Some(perms) = replacement_permissions(path) {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| CatalogError::io(tmp.path(), e))?;
    }
    tmp.write_all(bytes).map_err(|e| CatalogError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CatalogError::io(tmp.path(), e))?;
    tmp.persist(path)?;
    Ok(())
}

/// Permissions the replacement should carry: the current file's, or
/// `0644` for a new file (temporary files start out owner-only).
fn replacement_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(meta) = fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}
