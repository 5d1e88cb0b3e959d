use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `TRACKLIST__`) override it, and falls back to struct
/// defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::build(resolve_config_path(), false)
    }

    /// Load settings from a config file the user named; it must exist.
    pub fn load_from(config_path: PathBuf) -> Result<Self, ::config::ConfigError> {
        Self::build(Some(config_path), true)
    }

    fn build(config_path: Option<PathBuf>, required: bool) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(required));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TRACKLIST")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("scan.audio_extensions")
                .with_list_parse_key("scan.video_extensions")
                .with_list_parse_key("scan.summary_extensions"),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let scan = &self.scan;
        if scan.audio_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("scan.audio_extensions must not be empty".to_string());
        }
        if scan.video_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("scan.video_extensions must not be empty".to_string());
        }
        if scan.summary_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("scan.summary_extensions must not be empty".to_string());
        }
        if scan.exclude_marker.trim().is_empty() {
            return Err("scan.exclude_marker must not be empty".to_string());
        }
        let layout = &self.layout;
        if layout.singles_folder == layout.live_folder {
            return Err("layout.singles_folder and layout.live_folder must differ".to_string());
        }
        if layout.summary_name.trim().is_empty() || layout.index_file.trim().is_empty() {
            return Err("layout.summary_name and layout.index_file must be set".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `TRACKLIST_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TRACKLIST_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/tracklist/config.toml`
/// or `~/.config/tracklist/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("tracklist").join("config.toml"))
}
