//! Capture and external-shortcut configuration types.

use keycap_common::OsType;
use serde::{Deserialize, Serialize};

/// How key capture detects its environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Force the OS used for key names and labels. Unset = build target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OsType>,
    /// Force the constrained (no native global hotkey) path. Unset = probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constrained: Option<bool>,
}

impl CaptureConfig {
    pub fn os_type(&self) -> OsType {
        self.os.unwrap_or_else(OsType::current)
    }
}

/// The GNOME custom keybinding used when native hotkeys are unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalShortcutConfig {
    /// Label shown in the desktop's keyboard settings.
    pub name: String,
    /// Command the desktop runs when the shortcut fires.
    pub command: String,
    /// Path segment under `custom-keybindings/`.
    pub slot: String,
}

impl Default for ExternalShortcutConfig {
    fn default() -> Self {
        Self {
            name: "Keycap Transcribe".into(),
            command: "pkill -USR2 -n keycap".into(),
            slot: "keycap-transcribe".into(),
        }
    }
}
