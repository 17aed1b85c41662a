// Per-player input state management

use super::action::Action;
use super::action_map::ActionMap;
use super::value::{PlayerId, TypedValue};
use super::ConfigError;

/// The action maps belonging to a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID (0 for the desktop player, gamepad slot otherwise)
    player_id: PlayerId,

    /// Action maps in insertion order
    maps: Vec<ActionMap>,
}

impl PlayerInput {
    /// Create a new player with no action maps
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            maps: Vec::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Add an action map. Map names are unique per player
    pub fn add_map(&mut self, map: ActionMap) -> Result<&mut ActionMap, ConfigError> {
        if self.map(map.name()).is_some() {
            return Err(ConfigError::DuplicateMap {
                player: self.player_id,
                map: map.name().to_string(),
            });
        }
        self.maps.push(map);
        let last = self.maps.len() - 1;
        Ok(&mut self.maps[last])
    }

    /// Remove an action map by name
    pub fn remove_map(&mut self, name: &str) -> Option<ActionMap> {
        let pos = self.maps.iter().position(|map| map.name() == name)?;
        Some(self.maps.remove(pos))
    }

    pub fn map(&self, name: &str) -> Option<&ActionMap> {
        self.maps.iter().find(|map| map.name() == name)
    }

    pub fn map_mut(&mut self, name: &str) -> Option<&mut ActionMap> {
        self.maps.iter_mut().find(|map| map.name() == name)
    }

    pub fn maps(&self) -> &[ActionMap] {
        &self.maps
    }

    /// Look up an action as `map/action`
    pub fn action(&self, map: &str, action: &str) -> Option<&Action> {
        self.map(map)?.action(action)
    }

    pub fn action_mut(&mut self, map: &str, action: &str) -> Option<&mut Action> {
        self.map_mut(map)?.action_mut(action)
    }

    /// Fan a raw sample out to every enabled map
    pub fn handle_input(&mut self, name: &str, value: &TypedValue) {
        for map in &mut self.maps {
            map.handle_input(name, value);
        }
    }

    /// Reset all action state
    pub fn reset(&mut self) {
        for map in &mut self.maps {
            map.reset();
        }
    }
}
