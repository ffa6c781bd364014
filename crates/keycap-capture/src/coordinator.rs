//! Mediates between the capture state machines and the hotkey backend.

use std::sync::Arc;

use keycap_common::{BindingError, PRIMARY_BINDING_ID};
use keycap_config::ShortcutBinding;
use keycap_platform::{parse_combination, to_external_syntax};
use tracing::{info, warn};

use crate::backend::HotkeyBackend;

#[derive(Clone)]
pub struct BindingCoordinator {
    backend: Arc<dyn HotkeyBackend>,
}

impl BindingCoordinator {
    pub fn new(backend: Arc<dyn HotkeyBackend>) -> Self {
        Self { backend }
    }

    /// Best effort: a failure is logged and recording continues.
    pub async fn suspend(&self, id: &str) {
        if let Err(e) = self.backend.suspend_binding(id).await {
            warn!(id, "failed to suspend binding: {e}");
        }
    }

    /// Best effort, like [`suspend`](Self::suspend).
    pub async fn resume(&self, id: &str) {
        if let Err(e) = self.backend.resume_binding(id).await {
            warn!(id, "failed to resume binding: {e}");
        }
    }

    /// Check that `combination` is well formed, then hand it to the backend.
    pub async fn persist(
        &self,
        id: &str,
        combination: &str,
    ) -> Result<ShortcutBinding, BindingError> {
        let combo = parse_combination(combination)
            .map_err(|e| BindingError::invalid(combination, e.to_string()))?;
        self.backend.change_binding(id, &combo.to_string()).await
    }

    /// Restore the default and return the refreshed binding list.
    pub async fn reset_to_default(&self, id: &str) -> Result<Vec<ShortcutBinding>, BindingError> {
        let binding = self.backend.reset_binding(id).await?;
        info!(id, combination = %binding.current_binding, "binding reset to default");
        self.backend.bindings().await
    }

    pub async fn add_binding(&self) -> Result<ShortcutBinding, BindingError> {
        let binding = self.backend.add_shortcut_binding().await?;
        info!(id = %binding.id, combination = %binding.current_binding, "binding added");
        Ok(binding)
    }

    pub async fn remove_binding(&self, id: &str) -> Result<(), BindingError> {
        if id == PRIMARY_BINDING_ID {
            return Err(BindingError::Reserved(id.to_string()));
        }
        self.backend.remove_shortcut_binding(id).await?;
        info!(id, "binding removed");
        Ok(())
    }

    pub async fn bindings(&self) -> Result<Vec<ShortcutBinding>, BindingError> {
        self.backend.bindings().await
    }

    pub async fn binding(&self, id: &str) -> Result<ShortcutBinding, BindingError> {
        self.bindings()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| BindingError::NotFound(id.to_string()))
    }

    pub async fn is_constrained_session(&self) -> bool {
        self.backend.is_constrained_session().await
    }

    /// Translate `tokens` to bracket syntax and register it with the desktop
    /// shell. Returns the accelerator that was sent.
    pub async fn configure_external(&self, tokens: &[String]) -> Result<String, BindingError> {
        let accelerator = to_external_syntax(tokens);
        self.backend.configure_external_shortcut(&accelerator).await?;
        Ok(accelerator)
    }

    pub async fn external_shortcut(&self) -> Result<Option<String>, BindingError> {
        self.backend.get_external_shortcut().await
    }
}
