//! Where `settings.toml` lives, and writing the first one.

use keycap_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "keycap";
const SETTINGS_FILE: &str = "settings.toml";

/// `<config dir>/keycap/settings.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
        .ok_or_else(|| ConfigError::ParseError("no per-user config directory on this platform".into()))
}

/// Write the commented default settings to `path`, creating parent
/// directories. An existing file is left untouched.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| ConfigError::ParseError(format!("cannot create {}: {e}", dir.display())))?;
    }

    std::fs::write(path, default_config_toml())
        .map_err(|e| ConfigError::ParseError(format!("cannot write {}: {e}", path.display())))?;

    info!(path = %path.display(), "wrote default settings");
    Ok(())
}
