//! GNOME custom keybinding client (`gsettings`).

use std::process::Command;

use keycap_common::PlatformError;
use tracing::{debug, info};

const MEDIA_KEYS_SCHEMA: &str = "org.gnome.settings-daemon.plugins.media-keys";
const CUSTOM_KEYBINDING_SCHEMA: &str = "org.gnome.settings-daemon.plugins.media-keys.custom-keybinding";
const CUSTOM_KEYBINDINGS_KEY: &str = "custom-keybindings";
const CUSTOM_KEYBINDINGS_DIR: &str = "/org/gnome/settings-daemon/plugins/media-keys/custom-keybindings";

/// Registers one custom keybinding slot with gnome-settings-daemon.
#[derive(Debug, Clone)]
pub struct GnomeShortcutClient {
    name: String,
    command: String,
    slot: String,
    program: String,
}

impl GnomeShortcutClient {
    pub fn new(name: impl Into<String>, command: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            slot: slot.into(),
            program: "gsettings".into(),
        }
    }

    /// Use a different executable in place of `gsettings`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// dconf path of this client's slot, with trailing slash.
    pub fn slot_path(&self) -> String {
        format!("{CUSTOM_KEYBINDINGS_DIR}/{}/", self.slot)
    }

    fn relocatable_schema(&self) -> String {
        format!("{CUSTOM_KEYBINDING_SCHEMA}:{}", self.slot_path())
    }

    /// Point the slot at `accelerator` (bracket syntax), creating it if needed.
    pub fn configure(&self, accelerator: &str) -> Result<(), PlatformError> {
        let existing = self.run(&["get", MEDIA_KEYS_SCHEMA, CUSTOM_KEYBINDINGS_KEY])?;
        let paths = merge_keybinding_paths(&parse_string_list(&existing), &self.slot_path());
        self.run(&[
            "set",
            MEDIA_KEYS_SCHEMA,
            CUSTOM_KEYBINDINGS_KEY,
            &format_string_list(&paths),
        ])?;

        let schema = self.relocatable_schema();
        self.run(&["set", &schema, "name", &quote(&self.name)])?;
        self.run(&["set", &schema, "command", &quote(&self.command)])?;
        self.run(&["set", &schema, "binding", &quote(accelerator)])?;

        info!(slot = %self.slot, accelerator, "external shortcut configured");
        Ok(())
    }

    /// The accelerator currently stored in the slot, if any.
    pub fn current_binding(&self) -> Result<Option<String>, PlatformError> {
        let raw = self.run(&["get", &self.relocatable_schema(), "binding"])?;
        let binding = unquote(&raw);
        Ok((!binding.is_empty()).then_some(binding))
    }

    fn run(&self, args: &[&str]) -> Result<String, PlatformError> {
        debug!(program = %self.program, ?args, "running");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                PlatformError::ExternalCommand(format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PlatformError::ExternalCommand(format!(
                "{} {} failed: {}",
                self.program,
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Append `path` to the custom keybinding list unless it is already there.
pub fn merge_keybinding_paths(existing: &[String], path: &str) -> Vec<String> {
    let mut paths = existing.to_vec();
    if !paths.iter().any(|p| p == path) {
        paths.push(path.to_string());
    }
    paths
}

/// Parse a GVariant string array as printed by `gsettings get`
/// (`['a', 'b']` or `@as []`).
pub fn parse_string_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("@as").unwrap_or(raw).trim();
    let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) else {
        return Vec::new();
    };
    inner
        .split(',')
        .map(unquote)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn format_string_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Quote a value as a GVariant string literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix('\'')
        .and_then(|r| r.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')))
        .unwrap_or(raw);
    inner.replace("\\'", "'").replace("\\\\", "\\")
}
