pub mod external;
pub mod input;
pub mod keymap;
pub mod normalize;
pub mod session;

pub use external::{format_external_label, to_external_syntax, GnomeShortcutClient};
pub use input::{validate_native, Chord, HotkeyRegistry};
pub use keymap::{format_combination, is_canonical_token, parse_combination, Combination, Modifier};
pub use normalize::normalize;
pub use session::{current_session, DesktopEnvironment, SessionInfo, SessionKind};
