use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    Down,
    Up,
}

/// A raw keyboard event as delivered by the windowing layer.
///
/// `code` is the layout-independent physical key (`KeyA`, `ControlLeft`,
/// `Numpad3`), `key` is the logical value (`a`, `Control`, `3`) and
/// `key_code` is the legacy numeric code, kept for the last-resort token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKeyEvent {
    pub kind: KeyEventKind,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub key_code: u32,
    #[serde(default)]
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn down(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: KeyEventKind::Down,
            code: code.into(),
            key: key.into(),
            key_code: 0,
            repeat: false,
        }
    }

    pub fn up(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: KeyEventKind::Up,
            ..Self::down(code, key)
        }
    }

    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = key_code;
        self
    }

    /// Marks the event as an auto-repeat of a held key.
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn is_down(&self) -> bool {
        self.kind == KeyEventKind::Down
    }
}

/// Everything the capture controllers listen to while a session is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    Key(RawKeyEvent),
    /// A pointer press landed outside the shortcut's anchor element.
    ClickOutside,
    /// The window lost focus.
    FocusLost,
}

/// Default number of events an [`InputBus`] buffers per listener.
pub const INPUT_BUS_CAPACITY: usize = 64;

/// Broadcast channel carrying raw input to whichever controller is listening.
///
/// Listeners come and go with recording sessions; `listener_count` lets
/// callers check that nothing stayed subscribed after a session ended.
pub struct InputBus {
    sender: broadcast::Sender<InputEvent>,
}

impl InputBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InputEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event and returns how many listeners received it.
    pub fn publish(&self, event: InputEvent) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(_) => {
                tracing::trace!("input event dropped: no listeners");
                0
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new(INPUT_BUS_CAPACITY)
    }
}
