//! Shortcut capture for constrained sessions.
//!
//! When native global hotkeys are unavailable the chord is handed to the
//! desktop shell instead, in bracket syntax. There is no local binding to
//! suspend or roll back.

use std::collections::HashSet;

use keycap_common::{InputBus, InputEvent, Notification, NotificationQueue, OsType, RawKeyEvent};
use keycap_platform::{format_external_label, normalize};
use tracing::{debug, info, warn};

use crate::coordinator::BindingCoordinator;
use crate::subscription::InputSubscription;

pub const EXTERNAL_FAILED_TITLE: &str = "Failed to configure system shortcut";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalState {
    Idle,
    ConfiguringExternal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalOutcome {
    Idle,
    Ignored,
    Updated(Vec<String>),
    /// The accelerator the desktop shell accepted.
    Configured(String),
    Failed(String),
    Cancelled,
}

impl ExternalOutcome {
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Configured(_) | Self::Failed(_) | Self::Cancelled
        )
    }
}

pub struct ExternalShortcutController {
    coordinator: BindingCoordinator,
    os: OsType,
    state: ExternalState,
    tokens: Vec<String>,
    pressed: HashSet<String>,
    subscription: Option<InputSubscription>,
    label: Option<String>,
    notifications: NotificationQueue,
}

impl ExternalShortcutController {
    pub fn new(coordinator: BindingCoordinator, os: OsType) -> Self {
        Self {
            coordinator,
            os,
            state: ExternalState::Idle,
            tokens: Vec::new(),
            pressed: HashSet::new(),
            subscription: None,
            label: None,
            notifications: NotificationQueue::default(),
        }
    }

    pub fn state(&self) -> ExternalState {
        self.state
    }

    /// Display label of the shortcut the desktop shell holds.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Re-read the registered accelerator from the desktop shell.
    pub async fn refresh_label(&mut self) {
        match self.coordinator.external_shortcut().await {
            Ok(accelerator) => {
                self.label = accelerator.map(|a| format_external_label(&a, self.os));
            }
            Err(e) => warn!("failed to read external shortcut: {e}"),
        }
    }

    /// Start capturing. Returns `false` if already capturing or the session
    /// supports native hotkeys.
    pub async fn start(&mut self, bus: &InputBus) -> bool {
        if self.state != ExternalState::Idle {
            debug!("external capture already active, ignoring start");
            return false;
        }
        if !self.coordinator.is_constrained_session().await {
            debug!("native hotkeys available, external capture not used");
            return false;
        }
        self.tokens.clear();
        self.pressed.clear();
        self.subscription = Some(InputSubscription::new(bus));
        self.state = ExternalState::ConfiguringExternal;
        info!("external shortcut capture started");
        true
    }

    pub async fn handle_input(&mut self, event: InputEvent) -> ExternalOutcome {
        if self.state != ExternalState::ConfiguringExternal {
            return ExternalOutcome::Idle;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(&key).await,
            InputEvent::ClickOutside | InputEvent::FocusLost => self.cancel(),
        }
    }

    /// Pump the subscription until capture ends.
    pub async fn run(&mut self) -> ExternalOutcome {
        loop {
            let next = match self.subscription.as_mut() {
                Some(sub) => sub.next().await,
                None => return ExternalOutcome::Idle,
            };
            // a lagged stream has lost key-ups, so the tokens are unreliable
            let outcome = match next {
                Ok(event) => self.handle_input(event).await,
                Err(_) => self.cancel(),
            };
            if outcome.is_final() {
                return outcome;
            }
        }
    }

    /// Back to Idle with no side effects.
    pub fn cancel(&mut self) -> ExternalOutcome {
        if self.state == ExternalState::Idle {
            return ExternalOutcome::Idle;
        }
        self.finish();
        info!("external shortcut capture cancelled");
        ExternalOutcome::Cancelled
    }

    async fn handle_key(&mut self, key: &RawKeyEvent) -> ExternalOutcome {
        if key.repeat {
            return ExternalOutcome::Ignored;
        }
        let token = normalize(key, self.os);

        if key.is_down() {
            if token == "esc" {
                return self.cancel();
            }
            if !self.tokens.contains(&token) {
                self.tokens.push(token.clone());
            }
            self.pressed.insert(token);
            return ExternalOutcome::Updated(self.tokens.clone());
        }

        self.pressed.remove(&token);
        if self.pressed.is_empty() && !self.tokens.is_empty() {
            self.commit().await
        } else {
            ExternalOutcome::Ignored
        }
    }

    async fn commit(&mut self) -> ExternalOutcome {
        self.subscription.take();
        let tokens = std::mem::take(&mut self.tokens);

        let outcome = match self.coordinator.configure_external(&tokens).await {
            Ok(accelerator) => {
                info!(accelerator = %accelerator, "external shortcut set");
                self.refresh_label().await;
                ExternalOutcome::Configured(accelerator)
            }
            Err(e) => {
                warn!("failed to configure external shortcut: {e}");
                self.notifications
                    .push(Notification::error(EXTERNAL_FAILED_TITLE, e.to_string()));
                ExternalOutcome::Failed(e.to_string())
            }
        };
        self.finish();
        outcome
    }

    fn finish(&mut self) {
        self.subscription.take();
        self.tokens.clear();
        self.pressed.clear();
        self.state = ExternalState::Idle;
    }
}
