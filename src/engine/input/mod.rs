// Input handling system
//
// This module turns raw keyboard, mouse and gamepad signals into typed,
// edge-detected actions that game logic subscribes to, independent of the
// physical device.
//
// ## Architecture
//
// - `value`: Shapes, typed values and raw samples
// - `processor`: Deadzone/invert/round pipelines
// - `button_axis`: Two-button to signed-axis composite handler
// - `matrix`: Which input shapes can feed which action shapes
// - `binding`: Named raw inputs -> one typed value
// - `action`: Latched state and started/changed/stopped callbacks
// - `action_map`: Switchable groups of actions
// - `player`: Per-player action maps
// - `dispatcher`: Raw sample normalization, stick vectors, gamepad slots
// - `manager`: Main input manager coordinating everything
// - `desktop` / `gamepad`: winit and gilrs adapters
// - `config`: Settings and default layouts
//
// ## Usage Example
//
// ```rust
// use rusted_input::engine::input::{InputManager, InputSettings, default_gameplay_map};
//
// let mut input_manager = InputManager::new(InputSettings::default())?;
// let map = default_gameplay_map(input_manager.settings())?;
// input_manager.desktop().add_map(map)?;
//
// // In your event loop, feed window events
// desktop::process_window_event(&mut input_manager, &window_event);
//
// // Once per frame, after polling events
// input_manager.update();
// ```

pub mod action;
pub mod action_map;
pub mod binding;
pub mod button_axis;
pub mod config;
pub mod desktop;
pub mod dispatcher;
pub mod gamepad;
pub mod manager;
pub mod matrix;
pub mod player;
pub mod processor;
pub mod signal;
pub mod value;

// Re-export commonly used types
pub use action::Action;
pub use action_map::ActionMap;
pub use binding::{Binding, DeviceScheme};
pub use config::{default_gameplay_map, default_menu_map, InputSettings};
pub use manager::InputManager;
pub use player::PlayerInput;
pub use processor::{InvertAxis, Pipeline, Processor};
pub use value::{PlayerId, RawSample, Scalar, Shape, TypedValue, DESKTOP_PLAYER, UNROUTED};

/// Input configuration errors.
///
/// These describe a broken setup and are reported where the setup happens;
/// they are not retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported binding conversion from {input} to {output}")]
    UnsupportedConversion { input: Shape, output: Shape },

    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    #[error("Wrong number of arguments for {shape}: expected {expected}, got {got}")]
    Arity {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    #[error("Wrong argument types for {shape}")]
    ArgumentType { shape: Shape },

    #[error("Input '{name}' uses index {index}, binding takes {required} input(s)")]
    InputIndexOutOfRange {
        name: String,
        index: usize,
        required: usize,
    },

    #[error("Input '{name}' does not belong to the {scheme} scheme")]
    SchemeMismatch { name: String, scheme: DeviceScheme },

    #[error("Action '{action}' already exists in map '{map}'")]
    DuplicateAction { map: String, action: String },

    #[error("Player {player} already has an action map named '{map}'")]
    DuplicateMap { player: PlayerId, map: String },

    #[error("Invalid processor: {0}")]
    InvalidProcessor(String),

    #[error("Invalid input settings: {0}")]
    InvalidSettings(String),

    #[error("Setting up player {player} failed: {reason}")]
    PlayerSetup { player: PlayerId, reason: String },
}
