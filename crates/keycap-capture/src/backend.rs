//! The hotkey backend seam.
//!
//! Everything that touches the global-shortcut engine, durable settings or
//! the desktop shell goes through [`HotkeyBackend`], so the capture state
//! machines can be driven against a scripted backend in tests.

use async_trait::async_trait;
use keycap_common::BindingError;
use keycap_config::ShortcutBinding;

#[async_trait]
pub trait HotkeyBackend: Send + Sync {
    /// Stop the live hotkey for `id` from firing. Unknown ids are a no-op.
    async fn suspend_binding(&self, id: &str) -> Result<(), BindingError>;

    /// Undo [`suspend_binding`](Self::suspend_binding). Resuming a binding
    /// that is not suspended is a no-op.
    async fn resume_binding(&self, id: &str) -> Result<(), BindingError>;

    /// Validate, register and persist `combination` for `id`.
    ///
    /// Applying the value a binding already has succeeds without change.
    async fn change_binding(
        &self,
        id: &str,
        combination: &str,
    ) -> Result<ShortcutBinding, BindingError>;

    /// Put `id` back on its `default_binding`.
    async fn reset_binding(&self, id: &str) -> Result<ShortcutBinding, BindingError>;

    /// Create a user binding with a fresh id and a free default shortcut.
    async fn add_shortcut_binding(&self) -> Result<ShortcutBinding, BindingError>;

    async fn remove_shortcut_binding(&self, id: &str) -> Result<(), BindingError>;

    /// Every binding, primary first then by id.
    async fn bindings(&self) -> Result<Vec<ShortcutBinding>, BindingError>;

    /// Whether native global hotkeys are unavailable in this session.
    async fn is_constrained_session(&self) -> bool;

    /// Register `accelerator` (bracket syntax) with the desktop shell.
    async fn configure_external_shortcut(&self, accelerator: &str) -> Result<(), BindingError>;

    /// The accelerator the desktop shell currently holds, if any.
    async fn get_external_shortcut(&self) -> Result<Option<String>, BindingError>;
}
