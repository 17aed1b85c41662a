// Action-based input remapping for keyboard, mouse and gamepad.
//
// Raw device signals are normalized by the dispatcher, routed to per-player
// action maps and turned into typed, edge-detected actions.

pub mod core;
pub mod engine;
