//! Raw key event normalization.
//!
//! Converts a [`RawKeyEvent`] into the canonical token used by combinations
//! and the recording state machine. The physical code is tried first, then
//! the logical key, then a numeric placeholder.

mod codes;
mod fallback;

use keycap_common::{OsType, RawKeyEvent};

/// Normalize a raw key event into a canonical key token.
///
/// Resolution order, first match wins: function keys, letters and digits,
/// numpad, modifiers, named keys, punctuation, logical-key fallback and
/// finally `unknown-<key_code>`.
pub fn normalize(event: &RawKeyEvent, os: OsType) -> String {
    let code = event.code.as_str();

    if let Some(token) = codes::function_key(code)
        .or_else(|| codes::letter_or_digit(code))
        .or_else(|| codes::numpad(code))
    {
        return token;
    }

    if let Some(token) = codes::modifier(code, os)
        .or_else(|| codes::named(code))
        .or_else(|| codes::punctuation(code))
    {
        return token.to_string();
    }

    fallback::from_logical_key(&event.key, os)
        .unwrap_or_else(|| fallback::placeholder(event.key_code))
}
