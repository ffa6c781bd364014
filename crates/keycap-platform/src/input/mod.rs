//! Hotkey registration: chord identity, the ownership registry and the
//! native shortcut rules.

mod chord;
mod registry;

pub use chord::Chord;
pub use registry::HotkeyRegistry;

use keycap_common::BindingError;

use crate::keymap::Combination;

/// Checks the rules the native global-shortcut layer enforces.
///
/// A shortcut needs at least one non-modifier key, and `fn` never reaches the
/// OS hotkey APIs.
pub fn validate_native(combination: &Combination) -> Result<(), BindingError> {
    if combination.contains("fn") {
        return Err(BindingError::invalid(
            combination.to_string(),
            "the fn key cannot be used in global shortcuts",
        ));
    }
    if !combination.has_main_key() {
        return Err(BindingError::invalid(
            combination.to_string(),
            "must contain at least one non-modifier key",
        ));
    }
    Ok(())
}
