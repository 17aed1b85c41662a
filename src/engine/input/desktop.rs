// Keyboard and mouse adapter: winit window events -> raw input names

use super::manager::InputManager;
use super::value::{Scalar, TypedValue, UNROUTED};
use glam::DVec2;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Raw input name for typed text
pub const TEXT_INPUT: &str = "key.event_text";

/// Raw input name for the cursor position in physical pixels
pub const CURSOR_POSITION: &str = "mouse.vector_position";

/// Raw input name for wheel scrolling (dx, dy)
pub const MOUSE_WHEEL: &str = "mouse.event_wheel";

/// Physical key -> key name (the part after `key.`)
const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::KeyA, "a"),
    (KeyCode::KeyB, "b"),
    (KeyCode::KeyC, "c"),
    (KeyCode::KeyD, "d"),
    (KeyCode::KeyE, "e"),
    (KeyCode::KeyF, "f"),
    (KeyCode::KeyG, "g"),
    (KeyCode::KeyH, "h"),
    (KeyCode::KeyI, "i"),
    (KeyCode::KeyJ, "j"),
    (KeyCode::KeyK, "k"),
    (KeyCode::KeyL, "l"),
    (KeyCode::KeyM, "m"),
    (KeyCode::KeyN, "n"),
    (KeyCode::KeyO, "o"),
    (KeyCode::KeyP, "p"),
    (KeyCode::KeyQ, "q"),
    (KeyCode::KeyR, "r"),
    (KeyCode::KeyS, "s"),
    (KeyCode::KeyT, "t"),
    (KeyCode::KeyU, "u"),
    (KeyCode::KeyV, "v"),
    (KeyCode::KeyW, "w"),
    (KeyCode::KeyX, "x"),
    (KeyCode::KeyY, "y"),
    (KeyCode::KeyZ, "z"),
    (KeyCode::Digit0, "0"),
    (KeyCode::Digit1, "1"),
    (KeyCode::Digit2, "2"),
    (KeyCode::Digit3, "3"),
    (KeyCode::Digit4, "4"),
    (KeyCode::Digit5, "5"),
    (KeyCode::Digit6, "6"),
    (KeyCode::Digit7, "7"),
    (KeyCode::Digit8, "8"),
    (KeyCode::Digit9, "9"),
    (KeyCode::Space, "space"),
    (KeyCode::Enter, "return"),
    (KeyCode::Escape, "escape"),
    (KeyCode::Tab, "tab"),
    (KeyCode::Backspace, "backspace"),
    (KeyCode::Delete, "delete"),
    (KeyCode::Insert, "insert"),
    (KeyCode::Home, "home"),
    (KeyCode::End, "end"),
    (KeyCode::PageUp, "pageup"),
    (KeyCode::PageDown, "pagedown"),
    (KeyCode::ArrowUp, "up"),
    (KeyCode::ArrowDown, "down"),
    (KeyCode::ArrowLeft, "left"),
    (KeyCode::ArrowRight, "right"),
    (KeyCode::ShiftLeft, "lshift"),
    (KeyCode::ShiftRight, "rshift"),
    (KeyCode::ControlLeft, "lctrl"),
    (KeyCode::ControlRight, "rctrl"),
    (KeyCode::AltLeft, "lalt"),
    (KeyCode::AltRight, "ralt"),
    (KeyCode::CapsLock, "capslock"),
    (KeyCode::Minus, "-"),
    (KeyCode::Equal, "="),
    (KeyCode::BracketLeft, "["),
    (KeyCode::BracketRight, "]"),
    (KeyCode::Semicolon, ";"),
    (KeyCode::Quote, "'"),
    (KeyCode::Backquote, "`"),
    (KeyCode::Comma, ","),
    (KeyCode::Period, "."),
    (KeyCode::Slash, "/"),
    (KeyCode::Backslash, "\\"),
    (KeyCode::F1, "f1"),
    (KeyCode::F2, "f2"),
    (KeyCode::F3, "f3"),
    (KeyCode::F4, "f4"),
    (KeyCode::F5, "f5"),
    (KeyCode::F6, "f6"),
    (KeyCode::F7, "f7"),
    (KeyCode::F8, "f8"),
    (KeyCode::F9, "f9"),
    (KeyCode::F10, "f10"),
    (KeyCode::F11, "f11"),
    (KeyCode::F12, "f12"),
];

/// Raw input name of a physical key, e.g. `key.space`
pub fn key_name(code: KeyCode) -> Option<String> {
    KEY_NAMES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| format!("key.{name}"))
}

/// Raw input name of a mouse button, e.g. `mouse.button_left`
pub fn mouse_button_name(button: MouseButton) -> String {
    match button {
        MouseButton::Left => "mouse.button_left".to_string(),
        MouseButton::Right => "mouse.button_right".to_string(),
        MouseButton::Middle => "mouse.button_middle".to_string(),
        MouseButton::Back => "mouse.button_back".to_string(),
        MouseButton::Forward => "mouse.button_forward".to_string(),
        MouseButton::Other(id) => format!("mouse.button_{id}"),
    }
}

/// Process a keyboard event from winit
pub fn process_key_event(manager: &mut InputManager, event: &KeyEvent) {
    let pressed = event.state == ElementState::Pressed;

    // Key repeats only produce text, never a second press
    if !event.repeat {
        if let PhysicalKey::Code(code) = event.physical_key {
            match key_name(code) {
                Some(name) => manager.dispatch(&name, UNROUTED, TypedValue::Button(pressed)),
                None => log::trace!("Unmapped key {:?}", code),
            }
        }
    }

    if pressed {
        if let Some(text) = &event.text {
            manager.dispatch(
                TEXT_INPUT,
                UNROUTED,
                TypedValue::Event(vec![Scalar::Text(text.to_string())]),
            );
        }
    }
}

/// Feed a winit window event into the input manager.
/// Returns true if the event was an input event.
pub fn process_window_event(manager: &mut InputManager, event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            process_key_event(manager, event);
            true
        }
        WindowEvent::MouseInput { state, button, .. } => {
            manager.dispatch(
                &mouse_button_name(*button),
                UNROUTED,
                TypedValue::Button(*state == ElementState::Pressed),
            );
            true
        }
        WindowEvent::CursorMoved { position, .. } => {
            manager.dispatch(
                CURSOR_POSITION,
                UNROUTED,
                TypedValue::Vector(DVec2::new(position.x, position.y)),
            );
            true
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x as f64, *y as f64),
                MouseScrollDelta::PixelDelta(position) => (position.x, position.y),
            };
            manager.dispatch(
                MOUSE_WHEEL,
                UNROUTED,
                TypedValue::Event(vec![Scalar::Number(dx), Scalar::Number(dy)]),
            );
            true
        }
        _ => false,
    }
}
