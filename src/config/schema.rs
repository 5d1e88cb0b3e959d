use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tracklist/config.toml` or `~/.config/tracklist/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `TRACKLIST__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub layout: LayoutSettings,
    pub scan: ScanSettings,
    pub update: UpdateSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory receiving one folder per artist plus the summary table.
    pub catalog_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Artist subfolder holding one folder per single release.
    pub singles_folder: String,
    /// Artist subfolder holding live performance videos.
    pub live_folder: String,
    /// Folder under the scan root holding the cross-artist collection.
    pub summary_folder: String,
    /// Stem of the cross-artist table (`<summary_name>.csv`).
    pub summary_name: String,
    /// File name of the Markdown index written next to each table.
    pub index_file: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            singles_folder: "单曲".to_string(),
            live_folder: "演唱会".to_string(),
            summary_folder: "CloudMusic".to_string(),
            summary_name: "Summary".to_string(),
            index_file: "README.md".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Album and single track extensions (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// Live performance extensions (case-insensitive, without dot).
    pub video_extensions: Vec<String>,
    /// Extensions considered by the cross-artist summary scan.
    pub summary_extensions: Vec<String>,
    /// Files whose name contains this (case-insensitive) are skipped.
    pub exclude_marker: String,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            audio_extensions: vec!["flac".into(), "mp3".into(), "wav".into()],
            video_extensions: vec!["mp4".into(), "mkv".into(), "avi".into()],
            summary_extensions: vec!["mp3".into()],
            exclude_marker: "cover".to_string(),
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdateSettings {
    pub mode: UpdateMode,
}

/// How a detected change to a persisted table is handled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateMode {
    /// Overwrite without asking.
    #[serde(alias = "overwrite", alias = "force")]
    All,
    /// Show the difference and ask before overwriting.
    #[default]
    #[serde(alias = "diff", alias = "confirm", alias = "interactive")]
    Partial,
}
