use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Settings, UpdateMode};

/// Which part of the library a run catalogs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// PATH is one artist folder.
    Artist,
    /// PATH holds artist folders; each one is offered in turn.
    All,
    /// PATH holds the cross-artist collection folder.
    Summary,
}

/// Command-line arguments for tracklist
#[derive(Parser, Debug)]
#[command(name = "tracklist")]
#[command(about = "Catalog a folder-organised music library into CSV tables and Markdown indexes")]
#[command(version)]
pub struct Args {
    /// Artist folder, or library root for `all` and `summary`
    pub path: PathBuf,

    /// What PATH points at
    #[arg(short, long, value_enum, default_value_t = RunMode::Artist)]
    pub mode: RunMode,

    /// How changed tables are written (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub update: Option<UpdateMode>,

    /// Directory receiving the generated tables
    #[arg(short, long, env = "TRACKLIST_CATALOG_ROOT")]
    pub catalog_root: Option<PathBuf>,

    /// Config file to use instead of the default lookup
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Args {
    /// Command-line values win over configured ones.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(mode) = self.update {
            settings.update.mode = mode;
        }
        if let Some(root) = &self.catalog_root {
            settings.paths.catalog_root = Some(root.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_artist_mode_and_configured_update() {
        let args = Args::try_parse_from(["tracklist", "/music/Aimer"]).unwrap();
        assert_eq!(args.mode, RunMode::Artist);
        assert_eq!(args.update, None);

        let mut settings = Settings::default();
        settings.update.mode = UpdateMode::All;
        args.apply(&mut settings);
        assert_eq!(settings.update.mode, UpdateMode::All);
    }

    #[test]
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "tracklist",
            "/music",
            "--mode",
            "all",
            "--update",
            "all",
            "--catalog-root",
            "/srv/list",
        ])
        .unwrap();
        assert_eq!(args.mode, RunMode::All);

        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings.update.mode, UpdateMode::All);
        assert_eq!(settings.paths.catalog_root, Some(PathBuf::from("/srv/list")));
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(Args::try_parse_from(["tracklist", "/music", "--mode", "everything"]).is_err());
        assert!(Args::try_parse_from(["tracklist", "/music", "--update", "some"]).is_err());
    }
}
