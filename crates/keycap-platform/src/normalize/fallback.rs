//! Logical-key fallback for events whose physical code is missing or unknown.

use keycap_common::OsType;

use super::codes::{alt_token, meta_token};

/// Derive a token from the logical key value (`KeyboardEvent.key`).
///
/// Returns `None` when the key carries no usable name, e.g. an empty string
/// or `Unidentified`.
pub(super) fn from_logical_key(key: &str, os: OsType) -> Option<String> {
    let token = match key {
        "" | "Unidentified" | "Dead" | "Process" => return None,
        "Control" => "ctrl",
        "Alt" | "AltGraph" => alt_token(os),
        "Shift" => "shift",
        "Meta" | "OS" | "Super" | "Hyper" | "Win" => meta_token(os),
        "CapsLock" => "caps lock",
        "ArrowUp" | "Up" => "up",
        "ArrowDown" | "Down" => "down",
        "ArrowLeft" | "Left" => "left",
        "ArrowRight" | "Right" => "right",
        "Escape" | "Esc" => "esc",
        " " | "Spacebar" => "space",
        "+" => "plus",
        other => {
            let lower = other.to_lowercase();
            if lower.trim().is_empty() {
                return None;
            }
            return Some(lower.replace('+', "plus"));
        }
    };
    Some(token.to_string())
}

/// Token for an event nothing else could name, so it is never dropped.
pub(super) fn placeholder(key_code: u32) -> String {
    format!("unknown-{key_code}")
}
