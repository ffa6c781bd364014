//! Physical key code tables (`KeyboardEvent.code` naming).
//!
//! Physical codes are layout independent, so modifiers and function keys
//! resolve the same way on every keyboard.

use keycap_common::OsType;

/// `F1`..`F24` → `f1`..`f24`.
pub(super) fn function_key(code: &str) -> Option<String> {
    let n: u8 = code.strip_prefix('F')?.parse().ok()?;
    (1..=24).contains(&n).then(|| format!("f{n}"))
}

/// `KeyA` → `a`, `Digit7` → `7`.
pub(super) fn letter_or_digit(code: &str) -> Option<String> {
    let rest = code
        .strip_prefix("Key")
        .filter(|r| r.len() == 1 && r.chars().all(|c| c.is_ascii_uppercase()))
        .or_else(|| {
            code.strip_prefix("Digit")
                .filter(|r| r.len() == 1 && r.chars().all(|c| c.is_ascii_digit()))
        })?;
    Some(rest.to_ascii_lowercase())
}

/// `Numpad3` → `numpad 3`, `NumpadAdd` → `numpad plus`.
///
/// `+` separates tokens in a stored combination, so the add key is spelled out.
pub(super) fn numpad(code: &str) -> Option<String> {
    let rest = code.strip_prefix("Numpad")?;
    let symbol = match rest {
        d if d.len() == 1 && d.chars().all(|c| c.is_ascii_digit()) => d,
        "Add" => "plus",
        "Subtract" => "-",
        "Multiply" => "*",
        "Divide" => "/",
        "Decimal" => ".",
        "Comma" => ",",
        "Equal" => "=",
        "Enter" => "enter",
        _ => return None,
    };
    Some(format!("numpad {symbol}"))
}

/// Modifier codes. Left and right variants share one token.
pub(super) fn modifier(code: &str, os: OsType) -> Option<&'static str> {
    let base = code
        .strip_suffix("Left")
        .or_else(|| code.strip_suffix("Right"))
        .unwrap_or(code);
    match base {
        "Shift" => Some("shift"),
        "Control" => Some("ctrl"),
        "Alt" => Some(alt_token(os)),
        "Meta" | "OS" => Some(meta_token(os)),
        _ => None,
    }
}

pub(super) fn alt_token(os: OsType) -> &'static str {
    if os.is_macos() {
        "option"
    } else {
        "alt"
    }
}

pub(super) fn meta_token(os: OsType) -> &'static str {
    if os.is_macos() {
        "command"
    } else {
        "super"
    }
}

/// Editing, navigation and lock keys.
pub(super) fn named(code: &str) -> Option<&'static str> {
    let token = match code {
        "Enter" => "enter",
        "Escape" => "esc",
        "ArrowUp" => "up",
        "ArrowDown" => "down",
        "ArrowLeft" => "left",
        "ArrowRight" => "right",
        "Tab" => "tab",
        "Space" => "space",
        "Backspace" => "backspace",
        "Delete" => "delete",
        "Home" => "home",
        "End" => "end",
        "PageUp" => "page up",
        "PageDown" => "page down",
        "Insert" => "insert",
        "CapsLock" => "caps lock",
        "PrintScreen" => "print screen",
        "ScrollLock" => "scroll lock",
        "Pause" => "pause",
        "ContextMenu" => "menu",
        "NumLock" => "num lock",
        "Fn" => "fn",
        _ => return None,
    };
    Some(token)
}

pub(super) fn punctuation(code: &str) -> Option<&'static str> {
    let token = match code {
        "Semicolon" => ";",
        "Equal" => "=",
        "Comma" => ",",
        "Minus" => "-",
        "Period" => ".",
        "Slash" => "/",
        "Backquote" => "`",
        "BracketLeft" => "[",
        "Backslash" => "\\",
        "BracketRight" => "]",
        "Quote" => "'",
        _ => return None,
    };
    Some(token)
}

/// Every physical code the tables above resolve.
#[cfg(test)]
pub(super) fn supported_codes() -> Vec<String> {
    let mut codes: Vec<String> = (1..=24).map(|n| format!("F{n}")).collect();
    codes.extend(('A'..='Z').map(|c| format!("Key{c}")));
    codes.extend(('0'..='9').map(|c| format!("Digit{c}")));
    codes.extend(('0'..='9').map(|c| format!("Numpad{c}")));
    for op in ["Add", "Subtract", "Multiply", "Divide", "Decimal", "Comma", "Equal", "Enter"] {
        codes.push(format!("Numpad{op}"));
    }
    for m in ["Shift", "Control", "Alt", "Meta", "OS"] {
        codes.push(format!("{m}Left"));
        codes.push(format!("{m}Right"));
    }
    for named in [
        "Enter", "Escape", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "Tab", "Space",
        "Backspace", "Delete", "Home", "End", "PageUp", "PageDown", "Insert", "CapsLock",
        "PrintScreen", "ScrollLock", "Pause", "ContextMenu", "NumLock", "Fn",
    ] {
        codes.push(named.to_string());
    }
    for p in [
        "Semicolon", "Equal", "Comma", "Minus", "Period", "Slash", "Backquote", "BracketLeft",
        "Backslash", "BracketRight", "Quote",
    ] {
        codes.push(p.to_string());
    }
    codes
}
