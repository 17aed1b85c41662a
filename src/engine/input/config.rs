// Input settings and the default action layouts

use super::action_map::ActionMap;
use super::binding::{Binding, DeviceScheme};
use super::dispatcher::MAX_GAMEPADS;
use super::matrix::DEFAULT_AXIS_THRESHOLD;
use super::processor::{Pipeline, Processor};
use super::value::Shape;
use super::ConfigError;

/// Name of the default gameplay action map
pub const GAMEPLAY_MAP: &str = "gameplay";

/// Name of the default menu action map
pub const MENU_MAP: &str = "menu";

/// Tunables for the input system
#[derive(Debug, Clone, PartialEq)]
pub struct InputSettings {
    /// Number of gamepad slots (players 1..=max_gamepads)
    pub max_gamepads: usize,

    /// Magnitude at which an analog axis counts as a pressed button
    pub axis_button_threshold: f64,

    /// Inner bound of the stick deadzone
    pub stick_deadzone_min: f64,

    /// Outer bound of the stick deadzone (full deflection from here on)
    pub stick_deadzone_max: f64,

    /// Threshold used to snap stick/d-pad vectors in menus
    pub menu_round_threshold: f64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            max_gamepads: MAX_GAMEPADS,
            axis_button_threshold: DEFAULT_AXIS_THRESHOLD,
            stick_deadzone_min: 0.15,
            stick_deadzone_max: 0.95,
            menu_round_threshold: 0.5,
        }
    }
}

impl InputSettings {
    /// Check that the settings describe a usable configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_gamepads == 0 {
            return Err(ConfigError::InvalidSettings(
                "max_gamepads must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.axis_button_threshold) {
            return Err(ConfigError::InvalidSettings(format!(
                "axis_button_threshold must be within [0, 1], got {}",
                self.axis_button_threshold
            )));
        }
        self.stick_deadzone()?;
        Ok(())
    }

    /// Deadzone processor for analog sticks
    pub fn stick_deadzone(&self) -> Result<Processor, ConfigError> {
        Processor::deadzone(self.stick_deadzone_min, self.stick_deadzone_max)
    }
}

/// Default gameplay layout: keyboard/mouse and gamepad bindings side by side
pub fn default_gameplay_map(settings: &InputSettings) -> Result<ActionMap, ConfigError> {
    let mut map = ActionMap::new(GAMEPLAY_MAP);

    // Movement (WASD + arrows + left stick + d-pad)
    let movement = map.create_action("move", Shape::Vector)?;
    movement.add_binding(
        Binding::new(Shape::Button, Shape::Vector, DeviceScheme::KeyboardMouse)?
            .with_inputs(["key.d", "key.a", "key.w", "key.s"])?,
    )?;
    movement.add_binding(
        Binding::new(Shape::Button, Shape::Vector, DeviceScheme::KeyboardMouse)?
            .with_inputs(["key.right", "key.left", "key.up", "key.down"])?,
    )?;
    movement.add_binding(
        Binding::new(Shape::Vector, Shape::Vector, DeviceScheme::Gamepad)?
            .with_input("gamepad.vector_lstick", 0)?
            .with_pipeline(Pipeline::new().with(settings.stick_deadzone()?)),
    )?;
    movement.add_binding(
        Binding::new(Shape::Vector, Shape::Vector, DeviceScheme::Gamepad)?
            .with_input("gamepad.vector_dpad", 0)?,
    )?;

    // Camera
    let look = map.create_action("look", Shape::Vector)?;
    look.add_binding(
        Binding::new(Shape::Vector, Shape::Vector, DeviceScheme::Gamepad)?
            .with_input("gamepad.vector_rstick", 0)?
            .with_pipeline(Pipeline::new().with(settings.stick_deadzone()?)),
    )?;

    let zoom = map.create_action("zoom", Shape::Axis)?;
    zoom.add_binding(
        Binding::new(Shape::Button, Shape::Axis, DeviceScheme::KeyboardMouse)?
            .with_inputs(["key.e", "key.q"])?,
    )?;
    zoom.add_binding(
        Binding::new(Shape::Axis, Shape::Axis, DeviceScheme::Gamepad)?
            .with_input("gamepad.axis_ltrigger", 0)?,
    )?;

    // Buttons
    let jump = map.create_action("jump", Shape::Button)?;
    jump.bind(Shape::Button, DeviceScheme::KeyboardMouse)?
        .set_input("key.space", 0)?;
    jump.bind(Shape::Button, DeviceScheme::Gamepad)?
        .set_input("gamepad.button_a", 0)?;

    let fire = map.create_action("fire", Shape::Button)?;
    fire.bind(Shape::Button, DeviceScheme::KeyboardMouse)?
        .set_input("mouse.button_left", 0)?;
    fire.add_binding(
        Binding::new(Shape::Axis, Shape::Button, DeviceScheme::Gamepad)?
            .with_input("gamepad.axis_rtrigger", 0)?
            .with_threshold(settings.axis_button_threshold)?,
    )?;

    // Discrete events
    let pause = map.create_action("pause", Shape::Event)?;
    pause
        .bind(Shape::Button, DeviceScheme::KeyboardMouse)?
        .set_input("key.escape", 0)?;
    pause
        .bind(Shape::Button, DeviceScheme::Gamepad)?
        .set_input("gamepad.button_start", 0)?;

    let chat = map.create_action("chat", Shape::Event)?;
    chat.bind(Shape::Event, DeviceScheme::KeyboardMouse)?
        .set_input("key.event_text", 0)?;

    Ok(map)
}

/// Default menu layout. Starts disabled; games switch it on when a menu opens
pub fn default_menu_map(settings: &InputSettings) -> Result<ActionMap, ConfigError> {
    let mut map = ActionMap::new(MENU_MAP);

    let navigate = map.create_action("navigate", Shape::Vector)?;
    navigate.add_binding(
        Binding::new(Shape::Button, Shape::Vector, DeviceScheme::KeyboardMouse)?
            .with_inputs(["key.right", "key.left", "key.up", "key.down"])?,
    )?;
    navigate.add_binding(
        Binding::new(Shape::Vector, Shape::Vector, DeviceScheme::Gamepad)?
            .with_input("gamepad.vector_lstick", 0)?
            .with_pipeline(Pipeline::new().with(Processor::Round {
                threshold: settings.menu_round_threshold,
            })),
    )?;
    navigate.add_binding(
        Binding::new(Shape::Vector, Shape::Vector, DeviceScheme::Gamepad)?
            .with_input("gamepad.vector_dpad", 0)?,
    )?;

    let confirm = map.create_action("confirm", Shape::Button)?;
    confirm
        .bind(Shape::Button, DeviceScheme::KeyboardMouse)?
        .set_input("key.return", 0)?;
    confirm
        .bind(Shape::Button, DeviceScheme::Gamepad)?
        .set_input("gamepad.button_a", 0)?;

    let back = map.create_action("back", Shape::Event)?;
    back.bind(Shape::Button, DeviceScheme::KeyboardMouse)?
        .set_input("key.escape", 0)?;
    back.bind(Shape::Button, DeviceScheme::Gamepad)?
        .set_input("gamepad.button_b", 0)?;

    map.disable();
    Ok(map)
}
