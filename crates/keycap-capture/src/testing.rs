//! Scripted backend for state machine tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use keycap_common::{BindingError, PRIMARY_BINDING_ID};
use keycap_config::schema::sort_bindings;
use keycap_config::ShortcutBinding;

use crate::backend::HotkeyBackend;

#[derive(Default)]
struct MockState {
    bindings: BTreeMap<String, ShortcutBinding>,
    suspends: Vec<String>,
    resumes: Vec<String>,
    changes: Vec<String>,
    external_calls: Vec<String>,
    external: Option<String>,
    added: usize,
}

#[derive(Default)]
pub(crate) struct MockBackend {
    state: Mutex<MockState>,
    fail_suspend: bool,
    fail_all_changes: bool,
    failing_combinations: HashSet<String>,
    fail_external: bool,
    constrained: bool,
}

impl MockBackend {
    /// One primary binding on `ctrl+space`.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.insert(ShortcutBinding::new(
            PRIMARY_BINDING_ID,
            "Transcribe",
            "",
            "ctrl+space",
        ));
        mock
    }

    pub fn insert(&self, binding: ShortcutBinding) {
        let mut state = self.state.lock().unwrap();
        state.bindings.insert(binding.id.clone(), binding);
    }

    pub fn failing_suspend(mut self) -> Self {
        self.fail_suspend = true;
        self
    }

    /// `change_binding` fails for this combination only.
    pub fn failing_change(mut self, combination: &str) -> Self {
        self.failing_combinations.insert(combination.to_string());
        self
    }

    /// Every `change_binding` fails, rollbacks included.
    pub fn failing_all_changes(mut self) -> Self {
        self.fail_all_changes = true;
        self
    }

    pub fn constrained(mut self) -> Self {
        self.constrained = true;
        self
    }

    pub fn failing_external(mut self) -> Self {
        self.fail_external = true;
        self
    }

    pub fn with_external(self, accelerator: &str) -> Self {
        self.state.lock().unwrap().external = Some(accelerator.to_string());
        self
    }

    pub fn suspend_count(&self) -> usize {
        self.state.lock().unwrap().suspends.len()
    }

    pub fn resume_count(&self) -> usize {
        self.state.lock().unwrap().resumes.len()
    }

    pub fn change_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().changes.clone()
    }

    pub fn external_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().external_calls.clone()
    }

    pub fn current(&self, id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.bindings.get(id).map(|b| b.current_binding.clone())
    }
}

#[async_trait]
impl HotkeyBackend for MockBackend {
    async fn suspend_binding(&self, id: &str) -> Result<(), BindingError> {
        self.state.lock().unwrap().suspends.push(id.to_string());
        if self.fail_suspend {
            return Err(BindingError::External("scripted suspend failure".into()));
        }
        Ok(())
    }

    async fn resume_binding(&self, id: &str) -> Result<(), BindingError> {
        self.state.lock().unwrap().resumes.push(id.to_string());
        Ok(())
    }

    async fn change_binding(
        &self,
        id: &str,
        combination: &str,
    ) -> Result<ShortcutBinding, BindingError> {
        let mut state = self.state.lock().unwrap();
        state.changes.push(combination.to_string());
        if self.fail_all_changes || self.failing_combinations.contains(combination) {
            return Err(BindingError::Persistence("scripted change failure".into()));
        }
        let binding = state
            .bindings
            .get_mut(id)
            .ok_or_else(|| BindingError::NotFound(id.to_string()))?;
        binding.current_binding = combination.to_string();
        Ok(binding.clone())
    }

    async fn reset_binding(&self, id: &str) -> Result<ShortcutBinding, BindingError> {
        let mut state = self.state.lock().unwrap();
        let binding = state
            .bindings
            .get_mut(id)
            .ok_or_else(|| BindingError::NotFound(id.to_string()))?;
        binding.current_binding = binding.default_binding.clone();
        Ok(binding.clone())
    }

    async fn add_shortcut_binding(&self) -> Result<ShortcutBinding, BindingError> {
        let mut state = self.state.lock().unwrap();
        state.added += 1;
        let n = state.added;
        let binding = ShortcutBinding::new(
            format!("custom-{n:08}"),
            "Custom Shortcut",
            "",
            format!("ctrl+shift+{n}"),
        );
        state.bindings.insert(binding.id.clone(), binding.clone());
        Ok(binding)
    }

    async fn remove_shortcut_binding(&self, id: &str) -> Result<(), BindingError> {
        if id == PRIMARY_BINDING_ID {
            return Err(BindingError::Reserved(id.to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state
            .bindings
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| BindingError::NotFound(id.to_string()))
    }

    async fn bindings(&self) -> Result<Vec<ShortcutBinding>, BindingError> {
        let state = self.state.lock().unwrap();
        let mut list: Vec<ShortcutBinding> = state.bindings.values().cloned().collect();
        sort_bindings(&mut list);
        Ok(list)
    }

    async fn is_constrained_session(&self) -> bool {
        self.constrained
    }

    async fn configure_external_shortcut(&self, accelerator: &str) -> Result<(), BindingError> {
        let mut state = self.state.lock().unwrap();
        state.external_calls.push(accelerator.to_string());
        if self.fail_external {
            return Err(BindingError::External("scripted gsettings failure".into()));
        }
        state.external = Some(accelerator.to_string());
        Ok(())
    }

    async fn get_external_shortcut(&self) -> Result<Option<String>, BindingError> {
        Ok(self.state.lock().unwrap().external.clone())
    }
}
