use keycap_common::OsType;

use super::vocabulary::{is_function_key, strip_side};

/// Converts a stored combination into the label shown in settings.
///
/// `option_left+shift+space` becomes `"Left Option + Shift + Space"`. The
/// label only depends on the string and `os`; live keyboard layouts are never
/// consulted. Input with no tokens (e.g. `"+"`) is returned unchanged so a
/// non-empty input never yields an empty label.
pub fn format_combination(combination: &str, os: OsType) -> String {
    let parts: Vec<String> = combination
        .split('+')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| display_token(t, os))
        .collect();

    if parts.is_empty() {
        return combination.to_string();
    }
    parts.join(" + ")
}

fn display_token(token: &str, os: OsType) -> String {
    match strip_side(token) {
        (base, Some("left")) => format!("Left {}", display_base(base, os)),
        (base, Some(_)) => format!("Right {}", display_base(base, os)),
        (base, None) => display_base(base, os),
    }
}

fn display_base(token: &str, os: OsType) -> String {
    match token {
        "fn" => "fn".into(),
        "super" if os == OsType::Windows => "Win".into(),
        _ if is_function_key(token) => token.to_uppercase(),
        _ => capitalize(token),
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            format!("{upper}{}", chars.as_str())
        }
        None => String::new(),
    }
}
