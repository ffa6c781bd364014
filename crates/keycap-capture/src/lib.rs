//! Shortcut capture: the recording state machine, the constrained-session
//! controller and the coordinator between them and the hotkey backend.

pub mod backend;
pub mod coordinator;
pub mod external;
pub mod recorder;
pub mod settings_backend;
pub mod subscription;

#[cfg(test)]
mod testing;

pub use backend::HotkeyBackend;
pub use coordinator::BindingCoordinator;
pub use external::{ExternalOutcome, ExternalShortcutController, ExternalState};
pub use recorder::{BindingView, RecordOutcome, RecorderState, ShortcutRecorder};
pub use settings_backend::SettingsBackend;
pub use subscription::{InputSubscription, StreamEnd};
