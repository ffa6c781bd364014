//! Shortcut recording state machine.
//!
//! `Idle → Recording → {Committing, Cancelled} → Idle`. Only one binding can
//! be recording at a time; [`ShortcutRecorder`] owns that slot and
//! [`finish_session`](ShortcutRecorder::finish_session) is the only place
//! that clears it.

mod session;
#[cfg(test)]
mod tests;

use keycap_common::{
    BindingError, InputBus, InputEvent, Notification, NotificationQueue, OsType, RawKeyEvent,
};
use keycap_config::ShortcutBinding;
use keycap_platform::{format_combination, normalize};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::coordinator::BindingCoordinator;
use crate::subscription::{InputSubscription, StreamEnd};

use session::RecordingSession;

pub const SET_FAILED_TITLE: &str = "Failed to set shortcut";
pub const RESET_FAILED_TITLE: &str = "Failed to reset shortcut to original value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Committing,
}

/// What a single input event did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// No session is active.
    Idle,
    /// Repeats, stray releases and other events with no effect.
    Ignored,
    /// The live chord changed.
    Updated(String),
    Committed(ShortcutBinding),
    /// The new chord was rejected; `rolled_back` tells whether the original
    /// value could be restored.
    Failed {
        error: BindingError,
        rolled_back: bool,
    },
    Cancelled,
}

impl RecordOutcome {
    /// Whether the session is over.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Committed(_) | Self::Failed { .. } | Self::Cancelled
        )
    }
}

/// A binding as the settings list renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Live partial chord while this binding is recording.
    pub current_binding: String,
    pub label: String,
    pub recording: bool,
}

pub struct ShortcutRecorder {
    coordinator: BindingCoordinator,
    os: OsType,
    state: RecorderState,
    session: Option<RecordingSession>,
    /// UI model; may hold a transient preview for the recording binding.
    bindings: Vec<ShortcutBinding>,
    notifications: NotificationQueue,
}

impl ShortcutRecorder {
    pub fn new(coordinator: BindingCoordinator, os: OsType) -> Self {
        Self {
            coordinator,
            os,
            state: RecorderState::Idle,
            session: None,
            bindings: Vec::new(),
            notifications: NotificationQueue::default(),
        }
    }

    /// Refresh the binding list from the backend.
    pub async fn load_bindings(&mut self) -> Result<(), BindingError> {
        self.bindings = self.coordinator.bindings().await?;
        Ok(())
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    pub fn recording_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.binding_id.as_str())
    }

    pub fn os(&self) -> OsType {
        self.os
    }

    pub fn bindings(&self) -> &[ShortcutBinding] {
        &self.bindings
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub fn binding_views(&self) -> Vec<BindingView> {
        let recording = self.recording_id();
        self.bindings
            .iter()
            .map(|b| BindingView {
                id: b.id.clone(),
                name: b.name.clone(),
                description: b.description.clone(),
                current_binding: b.current_binding.clone(),
                label: format_combination(&b.current_binding, self.os),
                recording: recording == Some(b.id.as_str()),
            })
            .collect()
    }

    pub fn label_for(&self, id: &str) -> Option<String> {
        self.bindings
            .iter()
            .find(|b| b.id == id)
            .map(|b| format_combination(&b.current_binding, self.os))
    }

    /// Begin recording a new chord for `id`.
    ///
    /// Returns `false` without touching anything when a session is already
    /// active or the binding does not exist.
    pub async fn start_recording(&mut self, id: &str, bus: &InputBus) -> bool {
        if let Some(active) = self.recording_id() {
            debug!(active, requested = id, "recording already active, ignoring start");
            return false;
        }

        let original = match self.cached(id) {
            Some(b) => b.current_binding.clone(),
            None => match self.coordinator.binding(id).await {
                Ok(b) => {
                    let current = b.current_binding.clone();
                    self.bindings.push(b);
                    current
                }
                Err(e) => {
                    warn!(id, "cannot record: {e}");
                    return false;
                }
            },
        };

        self.coordinator.suspend(id).await;
        let subscription = InputSubscription::new(bus);
        self.session = Some(RecordingSession::new(id, original, subscription));
        self.state = RecorderState::Recording;
        info!(id, "recording started");
        true
    }

    /// Feed one event into the active session.
    pub async fn handle_input(&mut self, event: InputEvent) -> RecordOutcome {
        if self.session.is_none() {
            return RecordOutcome::Idle;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(&key).await,
            other => {
                debug!(event = ?other, "recording interrupted");
                self.cancel().await
            }
        }
    }

    /// Pump the session's subscription until the session ends.
    pub async fn run(&mut self) -> RecordOutcome {
        loop {
            let next = match self.session.as_mut() {
                Some(session) => match session.subscription.as_mut() {
                    Some(sub) => sub.next().await,
                    None => Err(StreamEnd::Closed),
                },
                None => return RecordOutcome::Idle,
            };
            // after a lag the pressed set may be missing keys; never commit it
            let outcome = match next {
                Ok(event) => self.handle_input(event).await,
                Err(_) => self.cancel().await,
            };
            if outcome.is_final() {
                return outcome;
            }
        }
    }

    /// Abort the active session and restore the original binding preview.
    pub async fn cancel(&mut self) -> RecordOutcome {
        let Some(session) = self.session.as_mut() else {
            return RecordOutcome::Idle;
        };
        session.unsubscribe();
        let id = session.binding_id.clone();
        let original = session.original_binding.clone();

        self.set_preview(&id, &original);
        info!(id = %id, "recording cancelled");
        self.finish_session().await;
        RecordOutcome::Cancelled
    }

    /// Reset `id` to its default and refresh the list.
    pub async fn reset_binding(&mut self, id: &str) -> Result<(), BindingError> {
        self.bindings = self.coordinator.reset_to_default(id).await?;
        Ok(())
    }

    pub async fn add_binding(&mut self) -> Result<ShortcutBinding, BindingError> {
        let binding = self.coordinator.add_binding().await?;
        self.load_bindings().await?;
        Ok(binding)
    }

    pub async fn remove_binding(&mut self, id: &str) -> Result<(), BindingError> {
        if self.recording_id() == Some(id) {
            self.cancel().await;
        }
        self.coordinator.remove_binding(id).await?;
        self.load_bindings().await
    }

    async fn handle_key(&mut self, key: &RawKeyEvent) -> RecordOutcome {
        if key.repeat {
            return RecordOutcome::Ignored;
        }
        let token = normalize(key, self.os);
        let Some(session) = self.session.as_mut() else {
            return RecordOutcome::Idle;
        };

        if key.is_down() {
            if token == "esc" {
                return self.cancel().await;
            }
            session.press(token);
            let id = session.binding_id.clone();
            let chord = session.chord();
            self.set_preview(&id, &chord);
            RecordOutcome::Updated(chord)
        } else if session.release(&token) {
            self.commit().await
        } else {
            RecordOutcome::Ignored
        }
    }

    async fn commit(&mut self) -> RecordOutcome {
        let Some(session) = self.session.as_mut() else {
            return RecordOutcome::Idle;
        };
        self.state = RecorderState::Committing;
        session.unsubscribe();
        let id = session.binding_id.clone();
        let original = session.original_binding.clone();
        let chord = session.chord();

        let outcome = match self.coordinator.persist(&id, &chord).await {
            Ok(binding) => {
                info!(id = %id, combination = %binding.current_binding, "shortcut recorded");
                self.replace_cached(binding.clone());
                RecordOutcome::Committed(binding)
            }
            Err(e) => {
                warn!(id = %id, combination = %chord, "failed to set shortcut: {e}");
                self.notifications
                    .push(Notification::error(SET_FAILED_TITLE, e.to_string()));
                let rolled_back = self.rollback(&id, &original).await;
                RecordOutcome::Failed {
                    error: e,
                    rolled_back,
                }
            }
        };

        self.finish_session().await;
        outcome
    }

    async fn rollback(&mut self, id: &str, original: &str) -> bool {
        match self.coordinator.persist(id, original).await {
            Ok(binding) => {
                self.replace_cached(binding);
                true
            }
            Err(e) => {
                error!(id, original, "failed to restore original shortcut: {e}");
                self.notifications
                    .push(Notification::error(RESET_FAILED_TITLE, e.to_string()));
                self.set_preview(id, original);
                false
            }
        }
    }

    /// Clear the recording slot and resume the hotkey, once.
    async fn finish_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.unsubscribe();
            if session.suspended {
                session.suspended = false;
                self.coordinator.resume(&session.binding_id).await;
            }
        }
        self.state = RecorderState::Idle;
    }

    fn cached(&self, id: &str) -> Option<&ShortcutBinding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    fn set_preview(&mut self, id: &str, combination: &str) {
        if let Some(b) = self.bindings.iter_mut().find(|b| b.id == id) {
            if b.current_binding != combination {
                b.current_binding = combination.to_string();
            }
        }
    }

    fn replace_cached(&mut self, binding: ShortcutBinding) {
        match self.bindings.iter_mut().find(|b| b.id == binding.id) {
            Some(slot) => *slot = binding,
            None => self.bindings.push(binding),
        }
    }
}
