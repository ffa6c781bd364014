//! Default TOML config template with inline documentation comments.

use keycap_common::OsType;

use crate::schema::default_shortcut;

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    let shortcut = default_shortcut(OsType::current());
    format!(
        r##"# Keycap Settings
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[capture]
# os = "linux"           # macos | windows | linux | unknown (default: build target)
# constrained = false    # force the desktop-shell shortcut path (default: probe session)

[external]
# Used on Wayland sessions where global hotkeys cannot be registered directly.
# name = "Keycap Transcribe"
# command = "pkill -USR2 -n keycap"
# slot = "keycap-transcribe"

[logging]
# level = "INFO"         # DEBUG | INFO | WARNING | ERROR

# Shortcuts are canonical key names joined with '+', e.g. "ctrl+shift+space".
[bindings.transcribe]
id = "transcribe"
name = "Transcribe"
description = "Converts your speech into text."
default_binding = "{shortcut}"
current_binding = "{shortcut}"
"##
    )
}
