//! [`HotkeyBackend`] over the TOML settings store and the in-process
//! hotkey registry.

use std::collections::HashSet;

use async_trait::async_trait;
use keycap_common::{new_binding_id, BindingError, ConfigError, OsType, PRIMARY_BINDING_ID};
use keycap_config::{KeycapConfig, SettingsStore, ShortcutBinding};
use keycap_platform::{
    current_session, parse_combination, validate_native, Chord, Combination,
    GnomeShortcutClient, HotkeyRegistry,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::backend::HotkeyBackend;

struct BackendState {
    store: SettingsStore,
    registry: HotkeyRegistry,
    suspended: HashSet<String>,
}

pub struct SettingsBackend {
    state: Mutex<BackendState>,
    os: OsType,
    constrained: bool,
    external: GnomeShortcutClient,
}

impl SettingsBackend {
    /// Build the backend and register every stored binding.
    ///
    /// Bindings that fail to register are logged and left unregistered.
    pub fn new(store: SettingsStore) -> Self {
        let config = store.config();
        let os = config.capture.os_type();
        let constrained = config
            .capture
            .constrained
            .unwrap_or_else(|| current_session().is_constrained());
        let external = GnomeShortcutClient::new(
            &config.external.name,
            &config.external.command,
            &config.external.slot,
        );

        let mut registry = HotkeyRegistry::new();
        for binding in store.bindings() {
            let registered = parse_combination(&binding.current_binding)
                .map_err(|e| BindingError::invalid(&binding.current_binding, e.to_string()))
                .and_then(|combo| {
                    validate_native(&combo)?;
                    registry.register(&binding.id, &combo)
                });
            if let Err(e) = registered {
                warn!(id = %binding.id, "binding not registered: {e}");
            }
        }
        info!(
            registered = registry.len(),
            constrained,
            "hotkey backend ready"
        );

        Self {
            state: Mutex::new(BackendState {
                store,
                registry,
                suspended: HashSet::new(),
            }),
            os,
            constrained,
            external,
        }
    }

    /// In-memory backend, used by tests and dry runs.
    pub fn in_memory(config: KeycapConfig) -> Self {
        Self::new(SettingsStore::in_memory(config))
    }

    /// Override the session probe.
    pub fn with_constrained(mut self, constrained: bool) -> Self {
        self.constrained = constrained;
        self
    }

    pub fn with_external_client(mut self, client: GnomeShortcutClient) -> Self {
        self.external = client;
        self
    }

    pub fn os(&self) -> OsType {
        self.os
    }

    /// The combination the registry currently holds for `id`.
    pub async fn registered_binding(&self, id: &str) -> Option<String> {
        let state = self.state.lock().await;
        state.registry.binding_for(id).map(str::to_string)
    }

    pub async fn is_suspended(&self, id: &str) -> bool {
        self.state.lock().await.suspended.contains(id)
    }
}

impl BackendState {
    fn apply_binding(
        &mut self,
        id: &str,
        combination: &str,
    ) -> Result<ShortcutBinding, BindingError> {
        if self.store.binding(id).is_none() {
            return Err(BindingError::NotFound(id.to_string()));
        }

        let combo = parse_combination(combination)
            .map_err(|e| BindingError::invalid(combination, e.to_string()))?;
        validate_native(&combo)?;
        self.check_conflict(id, &combo)?;

        let updated = self
            .store
            .set_current_binding(id, &combo.to_string())
            .map_err(persistence)?
            .ok_or_else(|| BindingError::NotFound(id.to_string()))?;

        // a suspended binding is registered again on resume
        if !self.suspended.contains(id) {
            self.registry.register(id, &combo)?;
        }
        info!(id, combination = %combo, "binding changed");
        Ok(updated)
    }

    /// Suspended bindings are not in the registry, so stored values are
    /// checked as well.
    fn check_conflict(&self, id: &str, combo: &Combination) -> Result<(), BindingError> {
        if let Some(owner) = self.registry.lookup(combo) {
            if owner != id {
                return Err(BindingError::AlreadyInUse(combo.to_string()));
            }
        }
        let chord = Chord::from_combination(combo);
        let taken = self.store.bindings().into_iter().any(|b| {
            b.id != id
                && parse_combination(&b.current_binding)
                    .map(|other| Chord::from_combination(&other) == chord)
                    .unwrap_or(false)
        });
        if taken {
            return Err(BindingError::AlreadyInUse(combo.to_string()));
        }
        Ok(())
    }

    fn free_default_shortcut(&self, os: OsType) -> Option<String> {
        let primary = if os.is_macos() { "command" } else { "ctrl" };
        (1..=9)
            .map(|n| format!("{primary}+shift+{n}"))
            .find(|candidate| {
                parse_combination(candidate)
                    .map(|combo| self.check_conflict("", &combo).is_ok())
                    .unwrap_or(false)
            })
    }
}

fn persistence(e: ConfigError) -> BindingError {
    BindingError::Persistence(e.to_string())
}

#[async_trait]
impl HotkeyBackend for SettingsBackend {
    async fn suspend_binding(&self, id: &str) -> Result<(), BindingError> {
        let mut state = self.state.lock().await;
        if state.store.binding(id).is_none() {
            debug!(id, "suspend ignored: unknown binding");
            return Ok(());
        }
        state.registry.unregister(id);
        state.suspended.insert(id.to_string());
        info!(id, "binding suspended");
        Ok(())
    }

    async fn resume_binding(&self, id: &str) -> Result<(), BindingError> {
        let mut state = self.state.lock().await;
        if !state.suspended.remove(id) {
            debug!(id, "resume ignored: not suspended");
            return Ok(());
        }
        let Some(binding) = state.store.binding(id).cloned() else {
            return Ok(());
        };
        let combo = parse_combination(&binding.current_binding)
            .map_err(|e| BindingError::invalid(&binding.current_binding, e.to_string()))?;
        state.registry.register(id, &combo)?;
        info!(id, combination = %combo, "binding resumed");
        Ok(())
    }

    async fn change_binding(
        &self,
        id: &str,
        combination: &str,
    ) -> Result<ShortcutBinding, BindingError> {
        let mut state = self.state.lock().await;
        state.apply_binding(id, combination)
    }

    async fn reset_binding(&self, id: &str) -> Result<ShortcutBinding, BindingError> {
        let mut state = self.state.lock().await;
        let default = state
            .store
            .binding(id)
            .map(|b| b.default_binding.clone())
            .ok_or_else(|| BindingError::NotFound(id.to_string()))?;
        state.apply_binding(id, &default)
    }

    async fn add_shortcut_binding(&self) -> Result<ShortcutBinding, BindingError> {
        let mut state = self.state.lock().await;
        let default = state.free_default_shortcut(self.os).ok_or_else(|| {
            BindingError::invalid("", "no free default shortcut for a new binding")
        })?;
        let binding = ShortcutBinding::new(
            new_binding_id(),
            "Custom Shortcut",
            "A shortcut you defined.",
            default,
        );

        let combo = parse_combination(&binding.default_binding)
            .map_err(|e| BindingError::invalid(&binding.default_binding, e.to_string()))?;
        state.store.insert_binding(binding.clone()).map_err(persistence)?;
        state.registry.register(&binding.id, &combo)?;
        Ok(binding)
    }

    async fn remove_shortcut_binding(&self, id: &str) -> Result<(), BindingError> {
        if id == PRIMARY_BINDING_ID {
            return Err(BindingError::Reserved(id.to_string()));
        }
        let mut state = self.state.lock().await;
        if state.store.binding(id).is_none() {
            return Err(BindingError::NotFound(id.to_string()));
        }
        state.registry.unregister(id);
        state.suspended.remove(id);
        state.store.remove_binding(id).map_err(persistence)?;
        Ok(())
    }

    async fn bindings(&self) -> Result<Vec<ShortcutBinding>, BindingError> {
        Ok(self.state.lock().await.store.bindings())
    }

    async fn is_constrained_session(&self) -> bool {
        self.constrained
    }

    async fn configure_external_shortcut(&self, accelerator: &str) -> Result<(), BindingError> {
        if accelerator.trim().is_empty() {
            return Err(BindingError::invalid(accelerator, "empty accelerator"));
        }
        let client = self.external.clone();
        let accelerator = accelerator.to_string();
        tokio::task::spawn_blocking(move || client.configure(&accelerator))
            .await
            .map_err(|e| BindingError::External(e.to_string()))?
            .map_err(|e| BindingError::External(e.to_string()))
    }

    async fn get_external_shortcut(&self) -> Result<Option<String>, BindingError> {
        let client = self.external.clone();
        tokio::task::spawn_blocking(move || client.current_binding())
            .await
            .map_err(|e| BindingError::External(e.to_string()))?
            .map_err(|e| BindingError::External(e.to_string()))
    }
}
