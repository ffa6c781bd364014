use std::collections::HashSet;

use crate::subscription::InputSubscription;

/// The one in-flight recording.
pub(crate) struct RecordingSession {
    pub binding_id: String,
    /// Keys currently held.
    pub pressed: HashSet<String>,
    /// Every key seen this session, first-pressed order, no duplicates.
    pub recorded: Vec<String>,
    /// `current_binding` at start, restored on cancel or failed commit.
    pub original_binding: String,
    pub subscription: Option<InputSubscription>,
    /// Set while the backend owes us exactly one resume.
    pub suspended: bool,
}

impl RecordingSession {
    pub fn new(binding_id: &str, original_binding: String, subscription: InputSubscription) -> Self {
        Self {
            binding_id: binding_id.to_string(),
            pressed: HashSet::new(),
            recorded: Vec::new(),
            original_binding,
            subscription: Some(subscription),
            suspended: true,
        }
    }

    pub fn press(&mut self, token: String) {
        if !self.recorded.contains(&token) {
            self.recorded.push(token.clone());
        }
        self.pressed.insert(token);
    }

    /// Returns `true` once the last held key is released.
    pub fn release(&mut self, token: &str) -> bool {
        self.pressed.remove(token);
        self.pressed.is_empty() && !self.recorded.is_empty()
    }

    pub fn chord(&self) -> String {
        self.recorded.join("+")
    }

    /// Drop the input listener; later events are never seen.
    pub fn unsubscribe(&mut self) {
        self.subscription.take();
    }
}
