//! Durable get/set access to the binding set.
//!
//! `SettingsStore` owns a loaded `KeycapConfig` and, when opened from a
//! file, writes every mutation straight back to it.

use std::path::{Path, PathBuf};

use keycap_common::ConfigError;
use tracing::info;

use crate::schema::{KeycapConfig, ShortcutBinding};
use crate::toml_loader::{create_default_config, default_config_path, load_default, load_from_path};
use crate::toml_writer::save_config_to_path;

pub struct SettingsStore {
    config: KeycapConfig,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Open the store at `path`, creating a default settings file if missing.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let config = match load_from_path(path) {
            Ok(config) => config,
            Err(ConfigError::FileNotFound(_)) => {
                create_default_config(path)?;
                load_from_path(path)?
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open the store at the platform default path.
    pub fn open_default() -> Result<Self, ConfigError> {
        let path = default_config_path()?;
        let config = load_default()?;
        Ok(Self {
            config,
            path: Some(path),
        })
    }

    /// A store that never touches disk.
    pub fn in_memory(config: KeycapConfig) -> Self {
        Self { config, path: None }
    }

    pub fn config(&self) -> &KeycapConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn binding(&self, id: &str) -> Option<&ShortcutBinding> {
        self.config.bindings.get(id)
    }

    /// All bindings, primary first.
    pub fn bindings(&self) -> Vec<ShortcutBinding> {
        self.config.sorted_bindings()
    }

    /// Set `current_binding` for an existing binding and persist.
    ///
    /// Returns `Ok(None)` when no binding has that id. Memory is left
    /// unchanged when the write fails.
    pub fn set_current_binding(
        &mut self,
        id: &str,
        combination: &str,
    ) -> Result<Option<ShortcutBinding>, ConfigError> {
        let mut next = self.config.clone();
        let Some(binding) = next.bindings.get_mut(id) else {
            return Ok(None);
        };
        binding.current_binding = combination.to_string();
        let updated = binding.clone();
        self.replace(next)?;
        Ok(Some(updated))
    }

    pub fn insert_binding(&mut self, binding: ShortcutBinding) -> Result<(), ConfigError> {
        info!(id = %binding.id, "adding binding");
        let mut next = self.config.clone();
        next.bindings.insert(binding.id.clone(), binding);
        self.replace(next)
    }

    pub fn remove_binding(&mut self, id: &str) -> Result<Option<ShortcutBinding>, ConfigError> {
        let mut next = self.config.clone();
        let removed = next.bindings.remove(id);
        if removed.is_some() {
            info!(id, "removed binding");
            self.replace(next)?;
        }
        Ok(removed)
    }

    /// Write `next` and adopt it only once it is on disk.
    fn replace(&mut self, next: KeycapConfig) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            save_config_to_path(&next, path)?;
        }
        self.config = next;
        Ok(())
    }

    /// Write the current state to disk; a no-op for in-memory stores.
    pub fn save(&self) -> Result<(), ConfigError> {
        match &self.path {
            Some(path) => save_config_to_path(&self.config, path),
            None => Ok(()),
        }
    }
}
