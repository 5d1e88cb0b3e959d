use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::{CatalogStore, Confirm, Outcome};
use crate::config::Settings;
use crate::error::{CatalogError, Result};
use crate::library::{Classifier, SummaryRecord, TrackRecord, children, scan_summary};
use crate::render::{render_artist, render_summary, write_document};

/// Answer to "process this artist?" during a batch run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArtistChoice {
    Process,
    Skip,
    /// Process this one and every remaining artist without asking again.
    ProcessAll,
}

pub trait ArtistGate {
    fn choose(&mut self, artist: &str) -> Result<ArtistChoice>;
}

impl<F> ArtistGate for F
where
    F: FnMut(&str) -> ArtistChoice,
{
    fn choose(&mut self, artist: &str) -> Result<ArtistChoice> {
        Ok(self(artist))
    }
}

/// Per-artist result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistStatus {
    Done(Outcome),
    NotSelected,
    Failed(String),
}

/// Where tables go and how they are updated.
pub struct Catalogs<'a> {
    settings: &'a Settings,
    catalog_root: PathBuf,
}

/// Name of the folder `dir` refers to, resolving `.`, `..` and symlinks first.
fn folder_name(dir: &Path) -> Result<String> {
    let resolved = fs::canonicalize(dir).map_err(|e| CatalogError::io(dir, e))?;
    resolved
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| CatalogError::io(dir, io::Error::other("path has no folder name")))
}

impl<'a> Catalogs<'a> {
    pub fn new(settings: &'a Settings, catalog_root: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            catalog_root: catalog_root.into(),
        }
    }

    /// `<catalog_root>/<artist>/<artist>.csv`
    pub fn artist_table(&self, artist: &str) -> PathBuf {
        self.catalog_root
            .join(artist)
            .join(format!("{artist}.csv"))
    }

    /// `<catalog_root>/<summary_name>.csv`
    pub fn summary_table(&self) -> PathBuf {
        self.catalog_root
            .join(format!("{}.csv", self.settings.layout.summary_name))
    }

    fn index_beside(&self, table: &Path) -> PathBuf {
        table.with_file_name(&self.settings.layout.index_file)
    }

    /// Scan one artist folder, reconcile its table and, if the table was
    /// rewritten, regenerate its index.
    pub fn process_artist(&self, artist_dir: &Path, confirm: &mut dyn Confirm) -> Result<Outcome> {
        let artist = folder_name(artist_dir)?;
        info!(%artist, path = %artist_dir.display(), "scanning artist");

        let records = Classifier::new(&self.settings.layout, &self.settings.scan)
            .classify_artist(artist_dir)?;

        let store = CatalogStore::<TrackRecord>::new(self.artist_table(&artist));
        let outcome = store.reconcile(&artist, &records, self.settings.update.mode, confirm)?;
        log_outcome(&artist, store.path(), outcome);

        if let Outcome::Committed { .. } = outcome {
            let index = self.index_beside(store.path());
            write_document(&index, &render_artist(&artist, &records))?;
            info!(%artist, index = %index.display(), "index written");
        }
        Ok(outcome)
    }

    /// Offer every artist folder under `root` in turn.
    ///
    /// A failing artist is recorded and the run moves on; only an unreadable
    /// `root` or a failed prompt ends the run early.
    pub fn process_all(
        &self,
        root: &Path,
        gate: &mut dyn ArtistGate,
        confirm: &mut dyn Confirm,
    ) -> Result<Vec<(String, ArtistStatus)>> {
        let mut report = Vec::new();
        let mut ask = true;

        for entry in children(root, &self.settings.scan)? {
            if !entry.file_type().is_dir() {
                continue;
            }
            let artist = entry.file_name().to_string_lossy().into_owned();

            if ask {
                match gate.choose(&artist)? {
                    ArtistChoice::Skip => {
                        info!(%artist, "skipped by operator");
                        report.push((artist, ArtistStatus::NotSelected));
                        continue;
                    }
                    ArtistChoice::ProcessAll => {
                        info!("processing all remaining artists without asking");
                        ask = false;
                    }
                    ArtistChoice::Process => {}
                }
            }

            let status = match self.process_artist(entry.path(), confirm) {
                Ok(outcome) => ArtistStatus::Done(outcome),
                Err(CatalogError::Prompt(e)) => return Err(CatalogError::Prompt(e)),
                Err(e) => {
                    warn!(%artist, error = %e, "artist failed");
                    ArtistStatus::Failed(e.to_string())
                }
            };
            report.push((artist, status));
        }
        Ok(report)
    }

    /// Scan `<root>/<summary_folder>`, reconcile the summary table and, if it
    /// was rewritten, regenerate the summary index.
    pub fn process_summary(&self, root: &Path, confirm: &mut dyn Confirm) -> Result<Outcome> {
        let source = root.join(&self.settings.layout.summary_folder);
        info!(path = %source.display(), "scanning summary collection");

        let records: Vec<SummaryRecord> = scan_summary(&source, &self.settings.scan)?;

        let label = &self.settings.layout.summary_name;
        let store = CatalogStore::<SummaryRecord>::new(self.summary_table());
        let outcome = store.reconcile(label, &records, self.settings.update.mode, confirm)?;
        log_outcome(label, store.path(), outcome);

        if let Outcome::Committed { .. } = outcome {
            let index = self.index_beside(store.path());
            write_document(&index, &render_summary(&records))?;
            info!(index = %index.display(), "summary index written");
        }
        Ok(outcome)
    }
}

fn log_outcome(label: &str, table: &Path, outcome: Outcome) {
    match outcome {
        Outcome::Unchanged => info!(%label, "no changes detected"),
        Outcome::Skipped => info!(%label, "update declined, table left as is"),
        Outcome::Committed { added, removed } => {
            info!(%label, added, removed, table = %table.display(), "table written")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::catalog::{ChangeSummary, Decision};
    use crate::config::UpdateMode;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn settings(mode: UpdateMode) -> Settings {
        let mut s = Settings::default();
        s.update.mode = mode;
        s
    }

    fn approve() -> impl FnMut(&ChangeSummary) -> Decision {
        |_: &ChangeSummary| Decision::Approve
    }

    #[test]
    fn artist_run_writes_table_and_index_then_is_unchanged() {
        let music = tempdir().unwrap();
        let out = tempdir().unwrap();
        let artist = music.path().join("Aimer");
        touch(&artist.join("2021.05.14_XYZ_Album_Sunrise[FLAC]").join("01.First Light.flac"));

        let s = settings(UpdateMode::All);
        let catalogs = Catalogs::new(&s, out.path());
        let outcome = catalogs.process_artist(&artist, &mut approve()).unwrap();
        assert_eq!(outcome, Outcome::Committed { added: 1, removed: 0 });

        let table = out.path().join("Aimer").join("Aimer.csv");
        let index = out.path().join("Aimer").join("README.md");
        assert!(table.exists());
        let doc = fs::read_to_string(&index).unwrap();
        assert!(doc.contains("### 📁 (2021.05.14) Sunrise"));
        assert!(doc.contains("- **[001]** First Light"));

        fs::remove_file(&index).unwrap();
        let outcome = catalogs.process_artist(&artist, &mut approve()).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(!index.exists(), "unchanged runs must not re-render");
    }

    #[test]
    fn declined_change_skips_table_and_index() {
        let music = tempdir().unwrap();
        let out = tempdir().unwrap();
        let artist = music.path().join("Milet");
        touch(&artist.join("演唱会").join("2019.08.10-Summer Tour.mp4"));

        let s = settings(UpdateMode::Partial);
        let catalogs = Catalogs::new(&s, out.path());
        let mut reject = |_: &ChangeSummary| Decision::Reject;
        let outcome = catalogs.process_artist(&artist, &mut reject).unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert!(!out.path().join("Milet").exists());
    }

    #[test]
    fn batch_run_records_failures_and_continues() {
        let music = tempdir().unwrap();
        let out = tempdir().unwrap();
        touch(&music.path().join("A").join("Album").join("01.a.flac"));
        touch(&music.path().join("B").join("Album").join("01.b.flac"));
        touch(&music.path().join("C").join("Album").join("01.c.flac"));
        touch(&music.path().join("loose.txt"));
        // B's existing table is corrupt.
        fs::create_dir_all(out.path().join("B")).unwrap();
        fs::write(out.path().join("B").join("B.csv"), "garbage,header\r\n1,2").unwrap();

        let s = settings(UpdateMode::All);
        let catalogs = Catalogs::new(&s, out.path());
        let mut answers = vec![ArtistChoice::ProcessAll];
        let mut asked = Vec::new();
        let mut gate = |artist: &str| {
            asked.push(artist.to_string());
            answers.pop().unwrap_or(ArtistChoice::Skip)
        };
        let mut report = catalogs
            .process_all(music.path(), &mut gate, &mut approve())
            .unwrap();
        report.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(asked.len(), 1, "all-remaining answer stops further prompts");
        assert_eq!(report.len(), 3);
        let statuses: Vec<_> = report.iter().map(|(name, s)| (name.as_str(), s)).collect();
        assert!(matches!(
            statuses[0],
            ("A", ArtistStatus::Done(Outcome::Committed { .. }))
        ));
        assert!(matches!(statuses[1], ("B", ArtistStatus::Failed(_))));
        assert!(matches!(
            statuses[2],
            ("C", ArtistStatus::Done(Outcome::Committed { .. }))
        ));
        assert!(out.path().join("C").join("README.md").exists());
    }

    #[test]
    fn batch_skip_leaves_artist_alone() {
        let music = tempdir().unwrap();
        let out = tempdir().unwrap();
        touch(&music.path().join("Only").join("Album").join("01.a.flac"));

        let s = settings(UpdateMode::All);
        let catalogs = Catalogs::new(&s, out.path());
        let mut gate = |_: &str| ArtistChoice::Skip;
        let report = catalogs
            .process_all(music.path(), &mut gate, &mut approve())
            .unwrap();
        assert_eq!(report, vec![("Only".to_string(), ArtistStatus::NotSelected)]);
        assert!(!out.path().join("Only").exists());
    }

    #[test]
    fn artist_name_comes_from_the_resolved_path() {
        let music = tempdir().unwrap();
        let out = tempdir().unwrap();
        let artist = music.path().join("Aimer");
        touch(&artist.join("Album").join("01.a.flac"));

        assert_eq!(folder_name(&artist.join(".")).unwrap(), "Aimer");
        assert_eq!(
            folder_name(&artist.join("Album").join("..")).unwrap(),
            "Aimer"
        );

        let s = settings(UpdateMode::All);
        let catalogs = Catalogs::new(&s, out.path());
        catalogs
            .process_artist(&artist.join("."), &mut approve())
            .unwrap();
        assert!(out.path().join("Aimer").join("Aimer.csv").exists());
    }

    #[test]
    fn missing_artist_is_fatal_in_single_mode() {
        let out = tempdir().unwrap();
        let s = settings(UpdateMode::All);
        let catalogs = Catalogs::new(&s, out.path());
        let err = catalogs
            .process_artist(&out.path().join("ghost"), &mut approve())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn summary_run_writes_summary_table_and_index() {
        let music = tempdir().unwrap();
        let out = tempdir().unwrap();
        let cloud = music.path().join("CloudMusic");
        touch(&cloud.join("Daily").join("Milet-Inside You_OST.mp3"));
        touch(&cloud.join("Daily").join("NoDelimiter.mp3"));

        let s = settings(UpdateMode::All);
        let catalogs = Catalogs::new(&s, out.path());
        let outcome = catalogs.process_summary(music.path(), &mut approve()).unwrap();
        assert_eq!(outcome, Outcome::Committed { added: 1, removed: 0 });

        let table = fs::read_to_string(out.path().join("Summary.csv")).unwrap();
        assert_eq!(table, "\u{feff}Singer,Name,From\r\nMilet,Inside You,OST");
        let doc = fs::read_to_string(out.path().join("README.md")).unwrap();
        assert!(doc.contains("- [Milet](#milet-1-track) : 1 track"));
    }
}
