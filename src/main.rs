use anyhow::Result;
use gilrs::Gilrs;
use log::{info, warn};
use rusted_input::engine::input::config::{GAMEPLAY_MAP, MENU_MAP};
use rusted_input::engine::input::{
    default_gameplay_map, default_menu_map, desktop, gamepad, InputManager, InputSettings,
    ConfigError, PlayerId, PlayerInput, TypedValue,
};
use std::cell::Cell;
use std::rc::Rc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

/// Install the default maps and log every action transition for a player
fn setup_player(player: &mut PlayerInput, settings: &InputSettings) -> Result<(), ConfigError> {
    let id = player.player_id();
    player.add_map(default_gameplay_map(settings)?)?;
    player.add_map(default_menu_map(settings)?)?;

    for map_name in [GAMEPLAY_MAP, MENU_MAP] {
        let Some(map) = player.map_mut(map_name) else {
            continue;
        };
        let actions: Vec<String> = map.action_names().map(str::to_string).collect();
        for name in actions {
            let Some(action) = map.action_mut(&name) else {
                continue;
            };
            let label = format!("P{id} {map_name}/{name}");
            let started = label.clone();
            action.on_started(move |v| info!("{} started: {}", started, describe(v)));
            let stopped = label.clone();
            action.on_stopped(move |v| info!("{} stopped: {}", stopped, describe(v)));
            action.on_changed(move |v| log::debug!("{} changed: {}", label, describe(v)));
        }
    }
    Ok(())
}

/// Switch a player between the gameplay and menu maps
fn set_menu_open(player: &mut PlayerInput, open: bool) {
    if let Some(gameplay) = player.map_mut(GAMEPLAY_MAP) {
        gameplay.set_enabled(!open);
        if open {
            // Release held movement so nothing stays latched behind the menu
            gameplay.reset();
        }
    }
    if let Some(menu) = player.map_mut(MENU_MAP) {
        menu.set_enabled(open);
    }
    info!("Menu {}", if open { "opened" } else { "closed" });
}

fn describe(value: &TypedValue) -> String {
    match value {
        TypedValue::Button(pressed) => pressed.to_string(),
        TypedValue::Axis(v) => format!("{v:.2}"),
        TypedValue::Vector(v) => format!("({:.2}, {:.2})", v.x, v.y),
        TypedValue::Event(args) => format!("{args:?}"),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Input demo...");

    let settings = InputSettings::default();
    let mut input = InputManager::new(settings.clone())?;
    setup_player(input.desktop(), &settings)?;

    let player_settings = settings.clone();
    input.set_player_setup(move |player| setup_player(player, &player_settings));
    input
        .on_connected()
        .connect(|player: &PlayerId| info!("Player {} joined", player));
    input
        .on_disconnected()
        .connect(|player: &PlayerId| info!("Player {} left", player));

    // Escape/start opens the menu, escape/B closes it again
    let menu_request = Rc::new(Cell::new(None));
    let desktop_player = input.desktop();
    if let Some(pause) = desktop_player.action_mut(GAMEPLAY_MAP, "pause") {
        let request = menu_request.clone();
        pause.on_started(move |_| request.set(Some(true)));
    }
    if let Some(back) = desktop_player.action_mut(MENU_MAP, "back") {
        let request = menu_request.clone();
        back.on_started(move |_| request.set(Some(false)));
    }

    // Gamepads are optional: keep running on keyboard/mouse if gilrs fails
    let mut gilrs = match Gilrs::new() {
        Ok(gilrs) => {
            gamepad::register_connected(&gilrs, &mut input);
            Some(gilrs)
        }
        Err(err) => {
            warn!("Gamepad support unavailable: {}", err);
            None
        }
    };

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Input")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {}
            Event::WindowEvent { event, .. } => {
                desktop::process_window_event(&mut input, &event);
            }
            Event::AboutToWait => {
                if let Some(gilrs) = gilrs.as_mut() {
                    gamepad::pump(gilrs, &mut input);
                }

                // Frame boundary: stick vectors and disconnects land here
                input.update();

                if let Some(open) = menu_request.take() {
                    set_menu_open(input.desktop(), open);
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
