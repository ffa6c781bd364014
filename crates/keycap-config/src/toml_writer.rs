//! Write `KeycapConfig` to TOML on disk.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so a crash
//! mid-write never leaves a truncated settings file.

use std::path::Path;

use keycap_common::ConfigError;

use crate::schema::KeycapConfig;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Write config to a specific path, creating parent directories as needed.
pub fn save_config_to_path(config: &KeycapConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config to TOML: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &toml_str).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Windows refuses to rename over an open file
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, &toml_str).map_err(|e2| {
            ConfigError::ParseError(format!(
                "failed to write config to {}: {e2}",
                path.display()
            ))
        })?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    tracing::debug!(path = %path.display(), "settings saved to disk");
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
