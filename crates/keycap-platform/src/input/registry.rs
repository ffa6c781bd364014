use std::collections::HashMap;

use keycap_common::BindingError;

use crate::keymap::Combination;

use super::chord::Chord;

/// In-process stand-in for the OS global-shortcut table.
///
/// Tracks which binding owns which chord so a second binding cannot grab a
/// chord that is already registered.
#[derive(Debug, Default)]
pub struct HotkeyRegistry {
    owners: HashMap<Chord, String>,
    by_id: HashMap<String, (Chord, String)>,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `combination` for binding `id`.
    ///
    /// Re-registering the same chord for the same id is a no-op. Any chord
    /// previously held by `id` is released first.
    pub fn register(&mut self, id: &str, combination: &Combination) -> Result<(), BindingError> {
        let chord = Chord::from_combination(combination);

        if let Some(owner) = self.owners.get(&chord) {
            if owner == id {
                return Ok(());
            }
            return Err(BindingError::AlreadyInUse(combination.to_string()));
        }

        self.unregister(id);
        self.owners.insert(chord.clone(), id.to_string());
        self.by_id
            .insert(id.to_string(), (chord, combination.to_string()));
        tracing::debug!(id, combination = %combination, "hotkey registered");
        Ok(())
    }

    /// Release whatever chord `id` holds. Returns whether anything was held.
    pub fn unregister(&mut self, id: &str) -> bool {
        match self.by_id.remove(id) {
            Some((chord, combination)) => {
                self.owners.remove(&chord);
                tracing::debug!(id, combination = %combination, "hotkey unregistered");
                true
            }
            None => false,
        }
    }

    /// Which binding owns `combination`, if any.
    pub fn lookup(&self, combination: &Combination) -> Option<&str> {
        self.owners
            .get(&Chord::from_combination(combination))
            .map(String::as_str)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// The combination string currently registered for `id`.
    pub fn binding_for(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(|(_, c)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
