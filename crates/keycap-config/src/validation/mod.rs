//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError` so the loader can log
//! them together.


use crate::bindings;
use crate::schema::KeycapConfig;
use keycap_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KeycapConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = bindings::validate_no_duplicates(&config.bindings) {
        errors.push(e.to_string());
    }
    bindings::validate_entries(&mut errors, &config.bindings);
    validate_external(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_external(errors: &mut Vec<String>, config: &KeycapConfig) {
    let slot = &config.external.slot;
    if slot.is_empty() {
        errors.push("external.slot is empty".into());
    } else if slot.contains('/') || slot.contains(char::is_whitespace) {
        errors.push(format!(
            "external.slot = '{slot}' must not contain '/' or whitespace"
        ));
    }
    if config.external.command.trim().is_empty() {
        errors.push("external.command is empty".into());
    }
}
