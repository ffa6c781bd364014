//! Desktop-shell keybindings for sessions without native global hotkeys.

mod bracket;
mod gnome;

pub use bracket::{format_external_label, parse_external_syntax, to_external_syntax};
pub use gnome::{
    format_string_list, merge_keybinding_paths, parse_string_list, quote, GnomeShortcutClient,
};
