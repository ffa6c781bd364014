//! The closed set of canonical key tokens.

use regex::Regex;
use std::sync::LazyLock;

/// `f1` through `f24`.
static FUNCTION_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f([1-9]|1[0-9]|2[0-4])$").unwrap());

/// `numpad 0`..`numpad 9` and the keypad operators.
static NUMPAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^numpad ([0-9]|plus|-|\*|/|\.|=|,|enter)$").unwrap());

pub(crate) const MODIFIER_TOKENS: &[&str] =
    &["ctrl", "shift", "alt", "option", "command", "super", "win"];

pub(crate) const NAMED_TOKENS: &[&str] = &[
    "enter",
    "esc",
    "up",
    "down",
    "left",
    "right",
    "tab",
    "space",
    "backspace",
    "delete",
    "home",
    "end",
    "page up",
    "page down",
    "insert",
    "caps lock",
    "print screen",
    "scroll lock",
    "pause",
    "menu",
    "num lock",
    "fn",
    "plus",
];

pub(crate) const PUNCTUATION_TOKENS: &[&str] =
    &[";", "=", ",", "-", ".", "/", "`", "[", "\\", "]", "'"];

/// Splits `shift_left` into `("shift", Some("left"))`.
///
/// Only modifier tokens carry a side; anything else is returned unchanged.
pub fn strip_side(token: &str) -> (&str, Option<&'static str>) {
    for (suffix, side) in [("_left", "left"), ("_right", "right")] {
        if let Some(base) = token.strip_suffix(suffix) {
            if MODIFIER_TOKENS.contains(&base) {
                return (base, Some(side));
            }
        }
    }
    (token, None)
}

pub fn is_function_key(token: &str) -> bool {
    FUNCTION_KEY_RE.is_match(token)
}

pub fn is_modifier_token(token: &str) -> bool {
    MODIFIER_TOKENS.contains(&strip_side(token).0)
}

/// Whether `token` belongs to the canonical vocabulary.
///
/// Single characters outside ASCII are accepted: the logical-key fallback
/// produces them for layout-specific keys.
pub fn is_canonical_token(token: &str) -> bool {
    if token.is_empty() || token != token.to_lowercase() {
        return false;
    }
    if is_modifier_token(token) {
        return true;
    }

    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || PUNCTUATION_TOKENS.contains(&token)
            || (!c.is_ascii() && !c.is_whitespace());
    }

    NAMED_TOKENS.contains(&token) || is_function_key(token) || NUMPAD_RE.is_match(token)
}
