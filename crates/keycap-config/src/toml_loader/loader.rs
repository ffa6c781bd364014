//! Core TOML config loading: read from path or platform default.

use crate::schema::KeycapConfig;
use crate::validation;
use keycap_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A dropped primary binding is
/// restored. Validation problems are logged and the parsed config is
/// returned as-is.
pub fn load_from_path(path: &Path) -> Result<KeycapConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let mut config: KeycapConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if config.ensure_primary_binding() {
        warn!("settings had no primary binding, restored the default");
    }

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load `settings.toml` from [`default_config_path`], writing the commented
/// default first when there is none.
pub fn load_default() -> Result<KeycapConfig, ConfigError> {
    let path = default_config_path()?;
    if !path.exists() {
        info!(path = %path.display(), "no settings yet");
        create_default_config(&path)?;
    }
    load_from_path(&path)
}
