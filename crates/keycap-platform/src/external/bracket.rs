//! GNOME accelerator syntax (`<Control><Alt>t`).

use keycap_common::OsType;

use crate::keymap::{format_combination, Modifier};

/// Canonical token → X keysym name, for keys whose keysym is not simply the
/// token itself.
const KEYSYMS: &[(&str, &str)] = &[
    ("enter", "Return"),
    ("esc", "Escape"),
    ("up", "Up"),
    ("down", "Down"),
    ("left", "Left"),
    ("right", "Right"),
    ("tab", "Tab"),
    ("space", "space"),
    ("backspace", "BackSpace"),
    ("delete", "Delete"),
    ("home", "Home"),
    ("end", "End"),
    ("page up", "Page_Up"),
    ("page down", "Page_Down"),
    ("insert", "Insert"),
    ("caps lock", "Caps_Lock"),
    ("print screen", "Print"),
    ("scroll lock", "Scroll_Lock"),
    ("pause", "Pause"),
    ("menu", "Menu"),
    ("num lock", "Num_Lock"),
    (";", "semicolon"),
    ("=", "equal"),
    (",", "comma"),
    ("-", "minus"),
    (".", "period"),
    ("/", "slash"),
    ("`", "grave"),
    ("[", "bracketleft"),
    ("\\", "backslash"),
    ("]", "bracketright"),
    ("'", "apostrophe"),
    ("plus", "plus"),
    ("numpad plus", "KP_Add"),
    ("numpad -", "KP_Subtract"),
    ("numpad *", "KP_Multiply"),
    ("numpad /", "KP_Divide"),
    ("numpad .", "KP_Decimal"),
    ("numpad =", "KP_Equal"),
    ("numpad ,", "KP_Separator"),
    ("numpad enter", "KP_Enter"),
];

/// Keysym name for a non-modifier token, lowercased. The shell looks
/// keysym names up case-insensitively.
fn keysym(token: &str) -> String {
    if let Some((_, sym)) = KEYSYMS.iter().find(|(t, _)| *t == token) {
        return sym.to_lowercase();
    }
    if let Some(digit) = token.strip_prefix("numpad ") {
        return format!("kp_{digit}");
    }
    token.to_lowercase().replace(' ', "_")
}

fn token_for_keysym(sym: &str) -> String {
    if let Some((token, _)) = KEYSYMS.iter().find(|(_, s)| s.eq_ignore_ascii_case(sym)) {
        return token.to_string();
    }
    let lower = sym.to_ascii_lowercase();
    if let Some(digit) = lower.strip_prefix("kp_").filter(|d| d.len() == 1) {
        return format!("numpad {digit}");
    }
    sym.to_lowercase().replace('_', " ")
}

/// Translate canonical tokens into bracket syntax, keeping their order.
///
/// Modifiers become `<Control>`, `<Alt>`, `<Shift>` or `<Super>`; other keys
/// use their lowercased X keysym name (`;` → `semicolon`, `numpad 3` →
/// `kp_3`, `enter` → `return`).
pub fn to_external_syntax(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| match Modifier::from_token(token) {
            Some(Modifier::Ctrl) => "<Control>".to_string(),
            Some(Modifier::Alt) => "<Alt>".to_string(),
            Some(Modifier::Shift) => "<Shift>".to_string(),
            Some(Modifier::Super) => "<Super>".to_string(),
            None => keysym(token),
        })
        .collect()
}

/// Split a bracket accelerator back into canonical tokens.
pub fn parse_external_syntax(accelerator: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = accelerator.trim();

    while let Some(after) = rest.strip_prefix('<') {
        let Some(end) = after.find('>') else {
            break;
        };
        let token = match after[..end].to_ascii_lowercase().as_str() {
            "control" | "ctrl" | "primary" => "ctrl".to_string(),
            "alt" | "mod1" => "alt".to_string(),
            "shift" => "shift".to_string(),
            "super" | "meta" | "hyper" | "mod4" => "super".to_string(),
            other => other.to_string(),
        };
        if !token.is_empty() {
            tokens.push(token);
        }
        rest = &after[end + 1..];
    }

    let key = rest.trim();
    if !key.is_empty() {
        tokens.push(token_for_keysym(key));
    }
    tokens
}

/// Render a bracket accelerator as a settings label, e.g.
/// `<Control><Alt>t` → `Ctrl + Alt + T`.
pub fn format_external_label(accelerator: &str, os: OsType) -> String {
    let tokens = parse_external_syntax(accelerator);
    if tokens.is_empty() {
        return accelerator.to_string();
    }
    format_combination(&tokens.join("+"), os)
}
