// Action maps: named, switchable groups of actions

use super::action::Action;
use super::value::{Shape, TypedValue};
use super::ConfigError;
use std::collections::BTreeMap;

/// A named set of actions that can be switched on and off as a whole,
/// e.g. "gameplay" vs "menu"
#[derive(Debug)]
pub struct ActionMap {
    name: String,
    enabled: bool,
    actions: BTreeMap<String, Action>,
}

impl ActionMap {
    /// Create an empty, enabled action map
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            actions: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a new action in this map
    pub fn create_action(
        &mut self,
        name: impl Into<String>,
        shape: Shape,
    ) -> Result<&mut Action, ConfigError> {
        let name = name.into();
        if self.actions.contains_key(&name) {
            return Err(ConfigError::DuplicateAction {
                map: self.name.clone(),
                action: name,
            });
        }
        Ok(self.actions.entry(name).or_insert_with(|| Action::new(shape)))
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.actions.get_mut(name)
    }

    /// Names of all actions, sorted
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            self.enabled = true;
            log::debug!("Action map '{}' enabled", self.name);
        }
    }

    /// Stop routing raw input to this map's actions. Latched values are kept.
    pub fn disable(&mut self) {
        if self.enabled {
            self.enabled = false;
            log::debug!("Action map '{}' disabled", self.name);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Route a raw sample to every action; dropped while disabled
    pub fn handle_input(&mut self, name: &str, value: &TypedValue) {
        if !self.enabled {
            return;
        }
        for action in self.actions.values_mut() {
            action.handle_input(name, value);
        }
    }

    /// Silently return every action to rest
    pub fn reset(&mut self) {
        for action in self.actions.values_mut() {
            action.reset();
        }
    }
}
