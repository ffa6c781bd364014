use serde::{Deserialize, Serialize};
use std::fmt;

use super::vocabulary::strip_side;

/// A keyboard modifier, independent of the OS-specific token used for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// `ctrl` on all platforms.
    Ctrl,
    /// `alt`, spelled `option` on macOS.
    Alt,
    /// `shift`.
    Shift,
    /// `command` on macOS, `super` (or `win`) elsewhere.
    Super,
}

impl Modifier {
    /// Maps a canonical token (side suffix allowed) to its modifier.
    pub fn from_token(token: &str) -> Option<Self> {
        match strip_side(token).0 {
            "ctrl" => Some(Self::Ctrl),
            "alt" | "option" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "super" | "command" | "win" => Some(Self::Super),
            _ => None,
        }
    }
}

/// A validated key combination: canonical tokens in first-pressed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub(super) tokens: Vec<String>,
}

impl Combination {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn modifiers(&self) -> Vec<Modifier> {
        self.tokens
            .iter()
            .filter_map(|t| Modifier::from_token(t))
            .collect()
    }

    /// Tokens that are not modifiers, in order.
    pub fn keys(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| Modifier::from_token(t).is_none())
            .map(String::as_str)
            .collect()
    }

    pub fn has_main_key(&self) -> bool {
        !self.keys().is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join("+"))
    }
}
