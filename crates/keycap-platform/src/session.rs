//! Desktop session probe.
//!
//! Decides whether native global hotkeys can be registered or whether the
//! desktop shell's own keybinding mechanism has to be used instead.

use std::env;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

const XDG_SESSION_TYPE: &str = "XDG_SESSION_TYPE";
const WAYLAND_DISPLAY: &str = "WAYLAND_DISPLAY";
const XDG_CURRENT_DESKTOP: &str = "XDG_CURRENT_DESKTOP";
const DESKTOP_SESSION: &str = "DESKTOP_SESSION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    X11,
    Wayland,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopEnvironment {
    Gnome,
    Kde,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub kind: SessionKind,
    pub desktop: DesktopEnvironment,
}

impl SessionInfo {
    /// Build from raw environment values. Pure, used by [`detect`](Self::detect).
    pub fn from_vars(
        session_type: Option<&str>,
        wayland_display: Option<&str>,
        current_desktop: Option<&str>,
        desktop_session: Option<&str>,
    ) -> Self {
        Self {
            kind: parse_session_kind(session_type, wayland_display),
            desktop: parse_desktop(current_desktop, desktop_session),
        }
    }

    /// Read the current process environment.
    pub fn detect() -> Self {
        let session_type = env::var(XDG_SESSION_TYPE).ok();
        let wayland_display = env::var(WAYLAND_DISPLAY).ok();
        let current_desktop = env::var(XDG_CURRENT_DESKTOP).ok();
        let desktop_session = env::var(DESKTOP_SESSION).ok();
        Self::from_vars(
            session_type.as_deref(),
            wayland_display.as_deref(),
            current_desktop.as_deref(),
            desktop_session.as_deref(),
        )
    }

    /// Wayland sessions cannot register global hotkeys natively.
    pub fn is_constrained(&self) -> bool {
        self.kind == SessionKind::Wayland
    }
}

impl fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.kind, self.desktop)
    }
}

/// The probe result for this process, computed on first use.
pub fn current_session() -> SessionInfo {
    static SESSION: OnceLock<SessionInfo> = OnceLock::new();
    *SESSION.get_or_init(|| {
        let info = SessionInfo::detect();
        tracing::info!(
            kind = ?info.kind,
            desktop = ?info.desktop,
            constrained = info.is_constrained(),
            "desktop session detected"
        );
        info
    })
}

fn parse_session_kind(session_type: Option<&str>, wayland_display: Option<&str>) -> SessionKind {
    let session = session_type.map(str::trim).unwrap_or_default();
    if session.eq_ignore_ascii_case("wayland") {
        SessionKind::Wayland
    } else if session.eq_ignore_ascii_case("x11") {
        SessionKind::X11
    } else if wayland_display.is_some_and(|d| !d.trim().is_empty()) {
        SessionKind::Wayland
    } else {
        SessionKind::Unknown
    }
}

fn parse_desktop(current_desktop: Option<&str>, desktop_session: Option<&str>) -> DesktopEnvironment {
    let desktop = current_desktop
        .filter(|d| !d.trim().is_empty())
        .or(desktop_session)
        .unwrap_or_default()
        .to_ascii_uppercase();

    if desktop.contains("KDE") || desktop.contains("PLASMA") {
        DesktopEnvironment::Kde
    } else if desktop.contains("GNOME") || desktop.contains("UBUNTU") {
        DesktopEnvironment::Gnome
    } else {
        DesktopEnvironment::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wayland_from_session_type() {
        let info = SessionInfo::from_vars(Some("wayland"), None, Some("GNOME"), None);
        assert_eq!(info.kind, SessionKind::Wayland);
        assert_eq!(info.desktop, DesktopEnvironment::Gnome);
        assert!(info.is_constrained());
    }

    #[test]
    fn x11_is_not_constrained() {
        let info = SessionInfo::from_vars(Some("X11"), None, Some("KDE"), None);
        assert_eq!(info.kind, SessionKind::X11);
        assert_eq!(info.desktop, DesktopEnvironment::Kde);
        assert!(!info.is_constrained());
    }

    #[test]
    fn session_type_wins_over_wayland_display() {
        let info = SessionInfo::from_vars(Some("x11"), Some("wayland-0"), None, None);
        assert_eq!(info.kind, SessionKind::X11);
    }

    #[test]
    fn wayland_display_fallback() {
        let info = SessionInfo::from_vars(None, Some("wayland-0"), None, None);
        assert_eq!(info.kind, SessionKind::Wayland);

        let info = SessionInfo::from_vars(Some(""), Some("  "), None, None);
        assert_eq!(info.kind, SessionKind::Unknown);
    }

    #[test]
    fn desktop_session_fallback() {
        let info = SessionInfo::from_vars(None, None, None, Some("ubuntu"));
        assert_eq!(info.desktop, DesktopEnvironment::Gnome);

        let info = SessionInfo::from_vars(None, None, Some(""), Some("plasma"));
        assert_eq!(info.desktop, DesktopEnvironment::Kde);

        let info = SessionInfo::from_vars(None, None, Some("sway"), None);
        assert_eq!(info.desktop, DesktopEnvironment::Other);
    }

    #[test]
    fn current_session_is_stable() {
        assert_eq!(current_session(), current_session());
    }
}
