//! Canonical key combinations: vocabulary, parsing and display labels.

mod display;
mod parse;
mod types;
mod vocabulary;

pub use display::format_combination;
pub use parse::parse_combination;
pub use types::{Combination, Modifier};
pub use vocabulary::{is_canonical_token, is_function_key, is_modifier_token, strip_side};

#[cfg(test)]
mod tests {
    use super::*;
    use keycap_common::OsType;

    #[test]
    fn parse_simple_combination() {
        let combo = parse_combination("ctrl+g").unwrap();
        assert_eq!(combo.tokens(), ["ctrl", "g"]);
        assert_eq!(combo.modifiers(), vec![Modifier::Ctrl]);
        assert_eq!(combo.keys(), vec!["g"]);
    }

    #[test]
    fn parse_keeps_recorded_order() {
        let combo = parse_combination("space+shift+ctrl").unwrap();
        assert_eq!(combo.to_string(), "space+shift+ctrl");
        assert_eq!(
            combo.modifiers(),
            vec![Modifier::Shift, Modifier::Ctrl]
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        let combo = parse_combination(" ctrl + page up ").unwrap();
        assert_eq!(combo.tokens(), ["ctrl", "page up"]);
    }

    #[test]
    fn parse_option_and_command_are_modifiers() {
        let combo = parse_combination("option+command+k").unwrap();
        assert_eq!(combo.modifiers(), vec![Modifier::Alt, Modifier::Super]);
    }

    #[test]
    fn parse_side_suffixed_modifier() {
        let combo = parse_combination("option_left+shift+space").unwrap();
        assert_eq!(combo.modifiers(), vec![Modifier::Alt, Modifier::Shift]);
        assert!(combo.has_main_key());
    }

    #[test]
    fn parse_modifier_only() {
        let combo = parse_combination("ctrl+shift").unwrap();
        assert!(!combo.has_main_key());
    }

    #[test]
    fn parse_empty_string_fails() {
        assert!(parse_combination("").is_err());
        assert!(parse_combination("   ").is_err());
    }

    #[test]
    fn parse_empty_token_fails() {
        assert!(parse_combination("ctrl++a").is_err());
        assert!(parse_combination("ctrl+").is_err());
    }

    #[test]
    fn parse_duplicate_fails() {
        let err = parse_combination("ctrl+ctrl+a").unwrap_err().to_string();
        assert!(err.contains("duplicate key 'ctrl'"));
    }

    #[test]
    fn parse_rejects_non_canonical() {
        assert!(parse_combination("Ctrl+A").is_err());
        assert!(parse_combination("control+a").is_err());
        assert!(parse_combination("ctrl+unknown-255").is_err());
    }

    #[test]
    fn display_ctrl_shift_space() {
        assert_eq!(
            format_combination("ctrl+shift+space", OsType::Windows),
            "Ctrl + Shift + Space"
        );
        assert_eq!(
            format_combination("ctrl+shift+space", OsType::Linux),
            "Ctrl + Shift + Space"
        );
    }

    #[test]
    fn display_option_f5() {
        assert_eq!(format_combination("option+f5", OsType::MacOs), "Option + F5");
    }

    #[test]
    fn display_side_suffix() {
        assert_eq!(
            format_combination("option_left+shift+space", OsType::MacOs),
            "Left Option + Shift + Space"
        );
        assert_eq!(
            format_combination("ctrl_right+a", OsType::Linux),
            "Right Ctrl + A"
        );
    }

    #[test]
    fn display_super_depends_on_os() {
        assert_eq!(format_combination("super+l", OsType::Windows), "Win + L");
        assert_eq!(format_combination("super+l", OsType::Linux), "Super + L");
        assert_eq!(format_combination("command+q", OsType::MacOs), "Command + Q");
    }

    #[test]
    fn display_fn_stays_lowercase() {
        assert_eq!(format_combination("fn+f12", OsType::MacOs), "fn + F12");
    }

    #[test]
    fn display_multiword_and_numpad() {
        assert_eq!(format_combination("caps lock", OsType::Linux), "Caps lock");
        assert_eq!(format_combination("ctrl+numpad 3", OsType::Linux), "Ctrl + Numpad 3");
    }

    #[test]
    fn display_never_empty_for_non_empty_input() {
        for input in ["+", "a", " ", "ctrl+", "++", "x+y+z", "é"] {
            let label = format_combination(input, OsType::Unknown);
            assert!(!label.is_empty(), "label for {input:?} was empty");
        }
    }

    #[test]
    fn display_is_deterministic() {
        let a = format_combination("ctrl+alt+delete", OsType::Windows);
        let b = format_combination("ctrl+alt+delete", OsType::Windows);
        assert_eq!(a, b);
        assert_eq!(a, "Ctrl + Alt + Delete");
    }

    #[test]
    fn modifier_from_token() {
        assert_eq!(Modifier::from_token("win"), Some(Modifier::Super));
        assert_eq!(Modifier::from_token("shift_left"), Some(Modifier::Shift));
        assert_eq!(Modifier::from_token("fn"), None);
        assert_eq!(Modifier::from_token("a"), None);
    }

    #[test]
    fn combination_serialization_roundtrip() {
        let combo = parse_combination("ctrl+shift+t").unwrap();
        let json = serde_json::to_string(&combo).unwrap();
        let back: Combination = serde_json::from_str(&json).unwrap();
        assert_eq!(combo, back);
    }
}
