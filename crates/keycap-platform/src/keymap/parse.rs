use keycap_common::PlatformError;

use super::types::Combination;
use super::vocabulary::is_canonical_token;

/// Parses a stored combination such as `"ctrl+shift+space"` into a
/// [`Combination`].
///
/// Tokens are trimmed and must already be canonical (lowercase, from the
/// vocabulary); nothing is renamed here, so `"Ctrl+A"` and `"control+a"` are
/// rejected. Duplicate tokens are an error rather than being merged, since a
/// duplicate means whatever produced the string was broken.
pub fn parse_combination(s: &str) -> Result<Combination, PlatformError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PlatformError::InvalidCombination(
            "empty key combination".into(),
        ));
    }

    let mut tokens: Vec<String> = Vec::new();
    for raw in trimmed.split('+') {
        let token = raw.trim();
        if token.is_empty() {
            return Err(PlatformError::InvalidCombination(format!(
                "empty token in '{trimmed}'"
            )));
        }
        if !is_canonical_token(token) {
            return Err(PlatformError::InvalidCombination(format!(
                "unrecognized key '{token}'"
            )));
        }
        if tokens.iter().any(|t| t == token) {
            return Err(PlatformError::InvalidCombination(format!(
                "duplicate key '{token}'"
            )));
        }
        tokens.push(token.to_string());
    }

    Ok(Combination { tokens })
}
