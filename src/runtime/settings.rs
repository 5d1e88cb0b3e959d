use std::path::PathBuf;

use crate::config;

/// Load settings for a run.
///
/// With an explicit `config_path` the file must exist and be valid. Otherwise
/// the `TRACKLIST_CONFIG_PATH`/XDG file is optional and an unusable one falls
/// back to defaults.
pub fn load_settings(config_path: Option<PathBuf>) -> Result<config::Settings, ::config::ConfigError> {
    if let Some(path) = config_path {
        let s = config::Settings::load_from(path)?;
        s.validate().map_err(::config::ConfigError::Message)?;
        return Ok(s);
    }

    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!(%msg, "invalid config, using defaults");
                Ok(config::Settings::default())
            } else {
                Ok(s)
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent a run.
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Ok(config::Settings::default())
        }
    }
}
