//! Shortcut binding types.

use keycap_common::{OsType, PRIMARY_BINDING_ID};
use serde::{Deserialize, Serialize};

/// One user-assignable action and the key combination that triggers it.
///
/// Combinations are canonical tokens joined by `+`, e.g. `"ctrl+shift+space"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutBinding {
    pub id: String,
    pub name: String,
    pub description: String,
    pub default_binding: String,
    pub current_binding: String,
    /// Per-binding transcription language; carried, never edited here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ShortcutBinding {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        default_binding: impl Into<String>,
    ) -> Self {
        let default_binding = default_binding.into();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            current_binding: default_binding.clone(),
            default_binding,
            language: None,
        }
    }

    /// The reserved binding every settings file starts with.
    pub fn primary(os: OsType) -> Self {
        Self::new(
            PRIMARY_BINDING_ID,
            "Transcribe",
            "Converts your speech into text.",
            default_shortcut(os),
        )
    }

    pub fn is_primary(&self) -> bool {
        self.id == PRIMARY_BINDING_ID
    }

    pub fn is_default(&self) -> bool {
        self.current_binding == self.default_binding
    }
}

/// Default combination for the primary binding on each OS.
pub fn default_shortcut(os: OsType) -> &'static str {
    match os {
        OsType::MacOs => "option+space",
        OsType::Windows | OsType::Linux => "ctrl+space",
        OsType::Unknown => "alt+space",
    }
}

/// Orders bindings the way the settings UI lists them: primary first, then by id.
pub fn sort_bindings(bindings: &mut [ShortcutBinding]) {
    bindings.sort_by(|a, b| {
        b.is_primary()
            .cmp(&a.is_primary())
            .then_with(|| a.id.cmp(&b.id))
    });
}
