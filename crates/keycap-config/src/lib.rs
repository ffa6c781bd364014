//! Keycap configuration: the binding set plus capture, external-shortcut
//! and logging settings, stored as TOML.
//!
//! All sections use `serde(default)` so a partial file loads cleanly.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use keycap_config::toml_loader::default_config_path;
//! use keycap_config::SettingsStore;
//!
//! let path = default_config_path().expect("no config directory");
//! let store = SettingsStore::open(&path).expect("failed to load settings");
//! for binding in store.bindings() {
//!     println!("{} = {}", binding.id, binding.current_binding);
//! }
//! ```

pub mod bindings;
pub mod schema;
pub mod store;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

pub use schema::{KeycapConfig, ShortcutBinding, CONFIG_SCHEMA_VERSION};
pub use store::SettingsStore;
pub use toml_writer::save_config_to_path;

/// Serialize a config to pretty-printed JSON (used by `keycap config`).
pub fn config_to_json(config: &KeycapConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
