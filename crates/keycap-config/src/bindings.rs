//! Binding-set validation utilities.

use crate::schema::ShortcutBinding;
use keycap_common::{ConfigError, PRIMARY_BINDING_ID};
use std::collections::{BTreeMap, HashMap};

/// Order-independent key for a combination string: `shift+ctrl+a` and
/// `ctrl+shift+a` collide.
pub fn chord_key(combination: &str) -> String {
    let mut tokens: Vec<String> = combination
        .split('+')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens.join("+")
}

/// Returns all bindings as `(id, current_binding)` pairs.
pub fn all_bindings(bindings: &BTreeMap<String, ShortcutBinding>) -> Vec<(&str, &str)> {
    bindings
        .iter()
        .map(|(id, b)| (id.as_str(), b.current_binding.as_str()))
        .collect()
}

/// Validate that no two bindings share a key combination.
pub fn validate_no_duplicates(
    bindings: &BTreeMap<String, ShortcutBinding>,
) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (id, combination) in all_bindings(bindings) {
        let key = chord_key(combination);
        if key.is_empty() {
            continue;
        }
        if let Some(existing) = seen.get(&key) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate shortcut '{combination}': assigned to both '{existing}' and '{id}'"
            )));
        }
        seen.insert(key, id);
    }

    Ok(())
}

/// Validate the shape of the binding map itself.
pub(crate) fn validate_entries(
    errors: &mut Vec<String>,
    bindings: &BTreeMap<String, ShortcutBinding>,
) {
    if !bindings.contains_key(PRIMARY_BINDING_ID) {
        errors.push(format!("bindings.{PRIMARY_BINDING_ID} is missing"));
    }

    for (key, binding) in bindings {
        if key != &binding.id {
            errors.push(format!(
                "bindings.{key}.id = '{}' does not match its table name",
                binding.id
            ));
        }
        if chord_key(&binding.current_binding).is_empty() {
            errors.push(format!("bindings.{key}.current_binding is empty"));
        }
        if chord_key(&binding.default_binding).is_empty() {
            errors.push(format!("bindings.{key}.default_binding is empty"));
        }
    }
}
