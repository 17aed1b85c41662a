// Input manager - Main coordination system for all input

use super::config::InputSettings;
use super::dispatcher::{Dispatch, RawInputDispatcher};
use super::player::PlayerInput;
use super::signal::Signal;
use super::value::{PlayerId, RawSample, TypedValue, DESKTOP_PLAYER, UNROUTED};
use super::ConfigError;
use std::collections::BTreeMap;

type PlayerSetup = Box<dyn FnMut(&mut PlayerInput) -> Result<(), ConfigError>>;

/// Main input manager that coordinates all input for all players.
///
/// Owns the raw input dispatcher and one [`PlayerInput`] per player: the
/// desktop player (id 0) always, plus one per connected gamepad.
pub struct InputManager {
    /// Settings the manager was built with
    settings: InputSettings,

    /// Device callbacks are normalized here first
    dispatcher: RawInputDispatcher,

    /// Input state for each player, by id
    players: BTreeMap<PlayerId, PlayerInput>,

    /// Installs action maps on newly connected players
    player_setup: Option<PlayerSetup>,

    /// Fired with the player id after a gamepad player is created
    connected: Signal<PlayerId>,

    /// Fired with the player id after a gamepad player is removed
    disconnected: Signal<PlayerId>,
}

impl InputManager {
    /// Create a new input manager with only the desktop player
    pub fn new(settings: InputSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut players = BTreeMap::new();
        players.insert(DESKTOP_PLAYER, PlayerInput::new(DESKTOP_PLAYER));

        Ok(Self {
            dispatcher: RawInputDispatcher::new(settings.max_gamepads),
            settings,
            players,
            player_setup: None,
            connected: Signal::new(),
            disconnected: Signal::new(),
        })
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    /// Hook run on every gamepad player when it connects
    pub fn set_player_setup(
        &mut self,
        setup: impl FnMut(&mut PlayerInput) -> Result<(), ConfigError> + 'static,
    ) {
        self.player_setup = Some(Box::new(setup));
    }

    /// Subscribe to gamepad player connections
    pub fn on_connected(&mut self) -> &mut Signal<PlayerId> {
        &mut self.connected
    }

    /// Subscribe to gamepad player disconnections
    pub fn on_disconnected(&mut self) -> &mut Signal<PlayerId> {
        &mut self.disconnected
    }

    /// Feed a normalized raw sample (`key.space`, `mouse.vector_position`, ...)
    pub fn dispatch(&mut self, name: &str, player: PlayerId, value: TypedValue) {
        self.dispatcher.dispatch(name, player, value);
        self.route_pending()
            .unwrap_or_else(|err| log::error!("Routing failed: {}", err));
    }

    /// A gamepad device appeared
    pub fn gamepad_added(&mut self, device: usize) -> Result<Option<PlayerId>, ConfigError> {
        let player = self.dispatcher.gamepad_added(device);
        self.route_pending()?;
        Ok(player)
    }

    /// A gamepad device went away; takes effect at the next [`InputManager::update`]
    pub fn gamepad_removed(&mut self, device: usize) {
        self.dispatcher.gamepad_removed(device);
    }

    /// Feed a normalized gamepad input (`gamepad.button_a`, `gamepad.axis_lstick_x`, ...)
    pub fn gamepad_input(&mut self, device: usize, name: &str, value: TypedValue) {
        self.dispatcher.gamepad_input(device, name, value);
        self.route_pending()
            .unwrap_or_else(|err| log::error!("Routing failed: {}", err));
    }

    /// Frame boundary. Call once per frame after polling device events and
    /// before game logic reads actions: routes this frame's reconstructed
    /// vectors, then finalizes gamepad disconnects.
    pub fn update(&mut self) {
        self.dispatcher.flush_frame();
        self.route_pending()
            .unwrap_or_else(|err| log::error!("Routing failed: {}", err));
    }

    fn route_pending(&mut self) -> Result<(), ConfigError> {
        let pending: Vec<Dispatch> = self.dispatcher.drain().collect();
        let mut result = Ok(());
        for item in pending {
            match item {
                Dispatch::Sample(sample) => self.route(&sample),
                Dispatch::Connected(player) => {
                    if let Err(err) = self.connect_player(player) {
                        log::error!("Setting up player {} failed: {}", player, err);
                        result = Err(err);
                    }
                }
                Dispatch::Disconnected(player) => self.disconnect_player(player),
            }
        }
        result
    }

    fn route(&mut self, sample: &RawSample) {
        if sample.player == UNROUTED {
            for player in self.players.values_mut() {
                player.handle_input(&sample.name, &sample.value);
            }
            return;
        }

        match self.players.get_mut(&sample.player) {
            Some(player) => player.handle_input(&sample.name, &sample.value),
            None => log::warn!(
                "Dropping '{}' for unknown player {}",
                sample.name,
                sample.player
            ),
        }
    }

    fn connect_player(&mut self, player_id: PlayerId) -> Result<(), ConfigError> {
        let mut player = PlayerInput::new(player_id);
        if let Some(setup) = self.player_setup.as_mut() {
            setup(&mut player).map_err(|err| ConfigError::PlayerSetup {
                player: player_id,
                reason: err.to_string(),
            })?;
        }
        self.players.insert(player_id, player);
        self.connected.emit(&player_id);
        Ok(())
    }

    fn disconnect_player(&mut self, player_id: PlayerId) {
        if self.players.remove(&player_id).is_some() {
            self.disconnected.emit(&player_id);
        }
    }

    /// Get input state for a specific player
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerInput> {
        self.players.get(&player_id)
    }

    /// Get mutable input state for a specific player
    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut PlayerInput> {
        self.players.get_mut(&player_id)
    }

    /// The always-present keyboard/mouse player
    pub fn desktop(&mut self) -> &mut PlayerInput {
        self.players
            .entry(DESKTOP_PLAYER)
            .or_insert_with(|| PlayerInput::new(DESKTOP_PLAYER))
    }

    /// Ids of every player, ascending
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    /// Get the number of players, including the desktop player
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Number of connected gamepads
    pub fn num_gamepads(&self) -> usize {
        self.dispatcher.connected_count()
    }

    /// Reset all player input states
    pub fn reset_all(&mut self) {
        for player in self.players.values_mut() {
            player.reset();
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self {
            dispatcher: RawInputDispatcher::default(),
            settings: InputSettings::default(),
            players: BTreeMap::from([(DESKTOP_PLAYER, PlayerInput::new(DESKTOP_PLAYER))]),
            player_setup: None,
            connected: Signal::new(),
            disconnected: Signal::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action_map::ActionMap;
    use crate::engine::input::binding::DeviceScheme;
    use crate::engine::input::config::{default_gameplay_map, GAMEPLAY_MAP};
    use crate::engine::input::value::Shape;
    use glam::DVec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager_with_gameplay() -> InputManager {
        let mut manager = InputManager::default();
        let settings = manager.settings().clone();
        manager
            .desktop()
            .add_map(default_gameplay_map(&settings).unwrap())
            .unwrap();
        manager.set_player_setup(move |player| {
            player.add_map(default_gameplay_map(&settings)?)?;
            Ok(())
        });
        manager
    }

    fn is_active(manager: &InputManager, player: PlayerId, action: &str) -> bool {
        manager
            .player(player)
            .and_then(|p| p.action(GAMEPLAY_MAP, action))
            .map_or(false, |a| a.is_active())
    }

    #[test]
    fn test_manager_creation() {
        let manager = InputManager::new(InputSettings::default()).unwrap();
        assert_eq!(manager.num_players(), 1);
        assert!(manager.player(DESKTOP_PLAYER).is_some());
        assert!(manager.player(1).is_none());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = InputSettings {
            max_gamepads: 0,
            ..Default::default()
        };
        assert!(InputManager::new(settings).is_err());
    }

    #[test]
    fn test_keyboard_reaches_desktop_player() {
        let mut manager = manager_with_gameplay();
        manager.dispatch("key.space", UNROUTED, TypedValue::Button(true));
        assert!(is_active(&manager, DESKTOP_PLAYER, "jump"));
    }

    #[test]
    fn test_gamepad_connect_creates_player() {
        let mut manager = manager_with_gameplay();
        let connected = Rc::new(RefCell::new(Vec::new()));
        let c = connected.clone();
        manager.on_connected().connect(move |p| c.borrow_mut().push(*p));

        assert_eq!(manager.gamepad_added(42).unwrap(), Some(1));
        assert_eq!(manager.num_players(), 2);
        assert_eq!(manager.num_gamepads(), 1);
        assert!(manager.player(1).unwrap().map(GAMEPLAY_MAP).is_some());
        assert_eq!(*connected.borrow(), vec![1]);
    }

    #[test]
    fn test_routed_sample_reaches_only_its_player() {
        let mut manager = manager_with_gameplay();
        manager.gamepad_added(42).unwrap();
        manager.gamepad_added(43).unwrap();

        manager.gamepad_input(43, "gamepad.button_a", TypedValue::Button(true));

        assert!(is_active(&manager, 2, "jump"));
        assert!(!is_active(&manager, 1, "jump"));
        assert!(!is_active(&manager, DESKTOP_PLAYER, "jump"));
    }

    #[test]
    fn test_unrouted_sample_reaches_every_player() {
        let mut manager = manager_with_gameplay();
        manager.gamepad_added(42).unwrap();

        manager.dispatch("key.space", UNROUTED, TypedValue::Button(true));

        assert!(is_active(&manager, DESKTOP_PLAYER, "jump"));
        assert!(is_active(&manager, 1, "jump"));
    }

    #[test]
    fn test_stick_vector_arrives_after_update() {
        let mut manager = manager_with_gameplay();
        manager.gamepad_added(42).unwrap();

        let moves = Rc::new(RefCell::new(Vec::new()));
        let m = moves.clone();
        manager
            .player_mut(1)
            .unwrap()
            .action_mut(GAMEPLAY_MAP, "move")
            .unwrap()
            .on_changed(move |v| m.borrow_mut().push(v.as_vector().unwrap()));

        manager.gamepad_input(42, "gamepad.axis_lstick_x", TypedValue::Axis(1.0));
        manager.gamepad_input(42, "gamepad.axis_lstick_y", TypedValue::Axis(-1.0));
        assert!(moves.borrow().is_empty());

        manager.update();
        assert_eq!(*moves.borrow(), vec![DVec2::new(1.0, -1.0)]);

        // Nothing new staged: the next frame routes nothing
        manager.update();
        assert_eq!(moves.borrow().len(), 1);
    }

    #[test]
    fn test_reconnect_same_frame_order() {
        let mut manager = manager_with_gameplay();
        let events = Rc::new(RefCell::new(Vec::new()));
        let e = events.clone();
        manager
            .on_connected()
            .connect(move |p| e.borrow_mut().push(("connect", *p)));
        let e = events.clone();
        manager
            .on_disconnected()
            .connect(move |p| e.borrow_mut().push(("disconnect", *p)));

        manager.gamepad_added(1).unwrap();
        manager.update();

        manager.gamepad_removed(1);
        manager.gamepad_added(2).unwrap();
        manager.update();

        assert_eq!(
            *events.borrow(),
            vec![("connect", 1), ("disconnect", 1), ("connect", 1)]
        );
        assert_eq!(manager.num_players(), 2);
    }

    #[test]
    fn test_disconnect_removes_player_at_update() {
        let mut manager = manager_with_gameplay();
        manager.gamepad_added(7).unwrap();
        manager.gamepad_removed(7);
        assert!(manager.player(1).is_some());

        manager.update();
        assert!(manager.player(1).is_none());
        assert_eq!(manager.num_gamepads(), 0);
    }

    #[test]
    fn test_failing_setup_is_reported() {
        let mut manager = InputManager::default();
        manager.set_player_setup(|player| {
            player.add_map(ActionMap::new("dup"))?;
            player.add_map(ActionMap::new("dup"))?;
            Ok(())
        });

        assert!(matches!(
            manager.gamepad_added(3),
            Err(ConfigError::PlayerSetup { player: 1, .. })
        ));
        assert!(manager.player(1).is_none());
    }

    #[test]
    fn test_disabled_map_in_manager() {
        let mut manager = manager_with_gameplay();
        manager
            .desktop()
            .map_mut(GAMEPLAY_MAP)
            .unwrap()
            .disable();
        manager.dispatch("key.space", UNROUTED, TypedValue::Button(true));
        assert!(!is_active(&manager, DESKTOP_PLAYER, "jump"));
    }

    #[test]
    fn test_custom_action_through_manager() {
        let mut manager = InputManager::default();
        let mut map = ActionMap::new("custom");
        map.create_action("throttle", Shape::Axis)
            .unwrap()
            .bind(Shape::Button, DeviceScheme::KeyboardMouse)
            .unwrap()
            .set_input("key.w", 0)
            .unwrap();
        manager.desktop().add_map(map).unwrap();

        manager.dispatch("key.w", UNROUTED, TypedValue::Button(true));
        let value = manager
            .player(DESKTOP_PLAYER)
            .unwrap()
            .action("custom", "throttle")
            .unwrap()
            .value()
            .clone();
        assert_eq!(value, TypedValue::Axis(1.0));
    }

    #[test]
    fn test_reset_all() {
        let mut manager = manager_with_gameplay();
        manager.dispatch("key.space", UNROUTED, TypedValue::Button(true));
        manager.reset_all();
        assert!(!is_active(&manager, DESKTOP_PLAYER, "jump"));
    }

    #[test]
    fn test_unknown_player_is_dropped() {
        let mut manager = manager_with_gameplay();
        manager.dispatch("gamepad.button_a", 5, TypedValue::Button(true));
        assert_eq!(manager.player_ids(), vec![DESKTOP_PLAYER]);
    }
}
