use crate::keymap::{Combination, Modifier};

pub(super) const MOD_CTRL: u8 = 0b0001;
pub(super) const MOD_ALT: u8 = 0b0010;
pub(super) const MOD_SHIFT: u8 = 0b0100;
pub(super) const MOD_SUPER: u8 = 0b1000;

/// Order-independent identity of a combination, used for conflict checks.
///
/// Modifiers are stored as a bitmask so `option+shift+k` and
/// `shift_left+alt+k` collide, the same way the OS would treat them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    /// Bitmask: Ctrl=1, Alt=2, Shift=4, Super=8.
    pub mods: u8,
    /// Non-modifier tokens, sorted.
    pub keys: Vec<String>,
}

impl Chord {
    pub fn from_combination(combination: &Combination) -> Self {
        let mut mods = 0u8;
        for m in combination.modifiers() {
            mods |= match m {
                Modifier::Ctrl => MOD_CTRL,
                Modifier::Alt => MOD_ALT,
                Modifier::Shift => MOD_SHIFT,
                Modifier::Super => MOD_SUPER,
            };
        }
        let mut keys: Vec<String> = combination.keys().into_iter().map(String::from).collect();
        keys.sort();
        Self { mods, keys }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        let bit = match modifier {
            Modifier::Ctrl => MOD_CTRL,
            Modifier::Alt => MOD_ALT,
            Modifier::Shift => MOD_SHIFT,
            Modifier::Super => MOD_SUPER,
        };
        self.mods & bit != 0
    }
}
