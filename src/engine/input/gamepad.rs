// Gamepad adapter: gilrs events -> raw input names

use super::manager::InputManager;
use super::value::TypedValue;
use gilrs::{Axis, Button, Event, EventType, Gilrs};

/// Fixed lookup table from gilrs buttons to raw input names
pub fn button_name(button: Button) -> Option<&'static str> {
    let name = match button {
        Button::South => "gamepad.button_a",
        Button::East => "gamepad.button_b",
        Button::West => "gamepad.button_x",
        Button::North => "gamepad.button_y",
        Button::Select => "gamepad.button_back",
        Button::Mode => "gamepad.button_guide",
        Button::Start => "gamepad.button_start",
        Button::LeftThumb => "gamepad.button_leftstick",
        Button::RightThumb => "gamepad.button_rightstick",
        Button::LeftTrigger => "gamepad.button_leftshoulder",
        Button::RightTrigger => "gamepad.button_rightshoulder",
        Button::DPadUp => "gamepad.button_dpup",
        Button::DPadDown => "gamepad.button_dpdown",
        Button::DPadLeft => "gamepad.button_dpleft",
        Button::DPadRight => "gamepad.button_dpright",
        _ => return None,
    };
    Some(name)
}

/// Fixed lookup table from gilrs axes to raw input names
pub fn axis_name(axis: Axis) -> Option<&'static str> {
    let name = match axis {
        Axis::LeftStickX => "gamepad.axis_lstick_x",
        Axis::LeftStickY => "gamepad.axis_lstick_y",
        Axis::RightStickX => "gamepad.axis_rstick_x",
        Axis::RightStickY => "gamepad.axis_rstick_y",
        Axis::LeftZ => "gamepad.axis_ltrigger",
        Axis::RightZ => "gamepad.axis_rtrigger",
        _ => return None,
    };
    Some(name)
}

/// Analog triggers report as buttons with a value in gilrs
fn trigger_axis_name(button: Button) -> Option<&'static str> {
    match button {
        Button::LeftTrigger2 => Some("gamepad.axis_ltrigger"),
        Button::RightTrigger2 => Some("gamepad.axis_rtrigger"),
        _ => None,
    }
}

/// Feed a single gilrs event into the input manager
pub fn process_event(manager: &mut InputManager, event: &Event) {
    let device = usize::from(event.id);
    match &event.event {
        EventType::Connected => {
            if let Err(err) = manager.gamepad_added(device) {
                log::error!("Gamepad {} connected but could not be set up: {}", device, err);
            }
        }
        EventType::Disconnected => manager.gamepad_removed(device),
        EventType::ButtonPressed(button, _) | EventType::ButtonReleased(button, _) => {
            let pressed = matches!(event.event, EventType::ButtonPressed(..));
            match button_name(*button) {
                Some(name) => manager.gamepad_input(device, name, TypedValue::Button(pressed)),
                None => log::trace!("Unmapped gamepad button {:?}", button),
            }
        }
        EventType::ButtonChanged(button, value, _) => {
            if let Some(name) = trigger_axis_name(*button) {
                manager.gamepad_input(device, name, TypedValue::Axis(*value as f64));
            }
        }
        EventType::AxisChanged(axis, value, _) => match axis_name(*axis) {
            Some(name) => manager.gamepad_input(device, name, TypedValue::Axis(*value as f64)),
            None => log::trace!("Unmapped gamepad axis {:?}", axis),
        },
        _ => {}
    }
}

/// Give gamepads that were plugged in before startup a slot.
/// gilrs only reports connections that happen while it is running.
pub fn register_connected(gilrs: &Gilrs, manager: &mut InputManager) {
    for (id, gamepad) in gilrs.gamepads() {
        log::info!("Found gamepad {} ({})", id, gamepad.name());
        if let Err(err) = manager.gamepad_added(usize::from(id)) {
            log::error!("Gamepad {} could not be set up: {}", id, err);
        }
    }
}

/// Drain every pending gilrs event into the input manager
pub fn pump(gilrs: &mut Gilrs, manager: &mut InputManager) {
    while let Some(event) = gilrs.next_event() {
        process_event(manager, &event);
    }
}
