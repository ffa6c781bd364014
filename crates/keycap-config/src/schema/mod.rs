//! Configuration schema types for Keycap.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod binding;
mod capture;
mod system;

pub use binding::*;
pub use capture::*;
pub use system::*;

use std::collections::BTreeMap;

use keycap_common::{OsType, PRIMARY_BINDING_ID};
use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Keycap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeycapConfig {
    pub capture: CaptureConfig,
    pub external: ExternalShortcutConfig,
    pub logging: LoggingConfig,
    /// Binding set keyed by binding id.
    pub bindings: BTreeMap<String, ShortcutBinding>,
}

impl Default for KeycapConfig {
    fn default() -> Self {
        let primary = ShortcutBinding::primary(OsType::current());
        let mut bindings = BTreeMap::new();
        bindings.insert(primary.id.clone(), primary);
        Self {
            capture: CaptureConfig::default(),
            external: ExternalShortcutConfig::default(),
            logging: LoggingConfig::default(),
            bindings,
        }
    }
}

impl KeycapConfig {
    /// Bindings in display order: primary first, then by id.
    pub fn sorted_bindings(&self) -> Vec<ShortcutBinding> {
        let mut list: Vec<ShortcutBinding> = self.bindings.values().cloned().collect();
        sort_bindings(&mut list);
        list
    }

    /// Re-adds the primary binding if a hand-edited file dropped it.
    ///
    /// Returns `true` when the binding had to be restored.
    pub fn ensure_primary_binding(&mut self) -> bool {
        if self.bindings.contains_key(PRIMARY_BINDING_ID) {
            return false;
        }
        let primary = ShortcutBinding::primary(self.capture.os_type());
        self.bindings.insert(primary.id.clone(), primary);
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
