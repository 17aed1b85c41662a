// Raw input dispatcher: normalized samples, vector reconstruction, gamepad slots

use super::value::{PlayerId, RawSample, TypedValue};
use glam::DVec2;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Default number of gamepad slots
pub const MAX_GAMEPADS: usize = 16;

/// Something the dispatcher hands over for routing, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Sample(RawSample),
    Connected(PlayerId),
    Disconnected(PlayerId),
}

/// Occupant of a gamepad slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    device: usize,
    pending_disconnect: bool,
}

/// Split `<device>.axis_<base>_x|y` into the vector name and the component
fn split_axis_component(name: &str) -> Option<(String, Component)> {
    let (device, rest) = name.split_once('.')?;
    let rest = rest.strip_prefix("axis_")?;
    let (base, component) = if let Some(base) = rest.strip_suffix("_x") {
        (base, Component::X)
    } else if let Some(base) = rest.strip_suffix("_y") {
        (base, Component::Y)
    } else {
        return None;
    };
    if base.is_empty() {
        return None;
    }
    Some((format!("{device}.vector_{base}"), component))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    X,
    Y,
}

impl Component {
    fn opposite_suffix(&self) -> &'static str {
        match self {
            Self::X => "_y",
            Self::Y => "_x",
        }
    }
}

/// D-pad buttons synthesize a signed axis from the opposing pair
fn dpad_axis(name: &str) -> Option<(&'static str, &'static str, &'static str)> {
    // (axis name, positive button, negative button)
    match name {
        "gamepad.button_dpright" | "gamepad.button_dpleft" => Some((
            "gamepad.axis_dpad_x",
            "gamepad.button_dpright",
            "gamepad.button_dpleft",
        )),
        "gamepad.button_dpup" | "gamepad.button_dpdown" => Some((
            "gamepad.axis_dpad_y",
            "gamepad.button_dpup",
            "gamepad.button_dpdown",
        )),
        _ => None,
    }
}

/// Turns device callbacks into an ordered stream of [`Dispatch`] items.
///
/// Split stick axes are merged into vectors that are staged per frame and
/// released by [`RawInputDispatcher::flush_frame`], so each vector is routed at
/// most once per frame even when both of its axes moved.
#[derive(Debug)]
pub struct RawInputDispatcher {
    /// Last known value per (player, input name)
    last_values: HashMap<(PlayerId, String), TypedValue>,

    /// Vectors staged this frame, keyed by (player, vector name)
    pending_vectors: BTreeMap<(PlayerId, String), DVec2>,

    /// Gamepad slots; slot `i` is player `i + 1`
    slots: Vec<Option<Slot>>,

    /// Items ready to be routed
    outbox: VecDeque<Dispatch>,
}

impl RawInputDispatcher {
    /// Create a dispatcher with `max_gamepads` slots
    pub fn new(max_gamepads: usize) -> Self {
        Self {
            last_values: HashMap::new(),
            pending_vectors: BTreeMap::new(),
            slots: vec![None; max_gamepads],
            outbox: VecDeque::new(),
        }
    }

    /// Record a raw sample and queue it for routing
    pub fn dispatch(&mut self, name: &str, player: PlayerId, value: TypedValue) {
        if let (Some((vector, component)), TypedValue::Axis(v)) =
            (split_axis_component(name), &value)
        {
            self.stage_vector(name, player, vector, component, *v);
        }

        self.last_values
            .insert((player, name.to_string()), value.clone());
        log::trace!("Dispatch {} = {:?} (player {})", name, value, player);
        self.outbox
            .push_back(Dispatch::Sample(RawSample::new(name, player, value)));
    }

    fn stage_vector(
        &mut self,
        name: &str,
        player: PlayerId,
        vector: String,
        component: Component,
        value: f64,
    ) {
        let key = (player, vector);
        match self.pending_vectors.get_mut(&key) {
            // Only this component is overwritten; the other keeps what was staged
            Some(entry) => match component {
                Component::X => entry.x = value,
                Component::Y => entry.y = value,
            },
            None => {
                let stem = &name[..name.len() - 2];
                let opposite_name = format!("{stem}{}", component.opposite_suffix());
                let opposite = self
                    .last_value(player, &opposite_name)
                    .and_then(TypedValue::as_axis)
                    .unwrap_or(0.0);
                let staged = match component {
                    Component::X => DVec2::new(value, opposite),
                    Component::Y => DVec2::new(opposite, value),
                };
                self.pending_vectors.insert(key, staged);
            }
        }
    }

    /// Last value seen for `name` from `player`
    pub fn last_value(&self, player: PlayerId, name: &str) -> Option<&TypedValue> {
        self.last_values.get(&(player, name.to_string()))
    }

    /// Number of vectors waiting for the next flush
    pub fn pending_vector_count(&self) -> usize {
        self.pending_vectors.len()
    }

    /// A gamepad appeared. Claims the lowest free (or pending-disconnect) slot
    /// and returns its player id, or `None` if every slot is taken.
    pub fn gamepad_added(&mut self, device: usize) -> Option<PlayerId> {
        if let Some(player) = self.live_slot_of(device) {
            log::warn!(
                "Gamepad {} added twice, keeping player {}",
                device,
                player
            );
            return Some(player);
        }

        let Some(index) = self
            .slots
            .iter()
            .position(|slot| slot.map_or(true, |s| s.pending_disconnect))
        else {
            log::warn!(
                "No free gamepad slot for device {} ({} in use)",
                device,
                self.slots.len()
            );
            return None;
        };

        let player = index as PlayerId + 1;
        if let Some(old) = self.slots[index] {
            // Disconnect and reconnect within one frame: retire the old
            // occupant before the new one appears
            log::info!(
                "Gamepad slot {} handed from device {} to {}",
                player,
                old.device,
                device
            );
            self.release_slot(index);
        }

        self.slots[index] = Some(Slot {
            device,
            pending_disconnect: false,
        });
        log::info!("Gamepad {} connected as player {}", device, player);
        self.outbox.push_back(Dispatch::Connected(player));
        Some(player)
    }

    /// A gamepad went away. The slot is released at the next frame flush
    /// unless another device claims it first.
    pub fn gamepad_removed(&mut self, device: usize) {
        match self.slot_index_of(device) {
            Some(index) => {
                if let Some(slot) = self.slots[index].as_mut() {
                    slot.pending_disconnect = true;
                }
            }
            None => log::warn!("Disconnect for unknown gamepad {}", device),
        }
    }

    /// Player id currently assigned to a device (including pending-disconnect)
    pub fn player_of(&self, device: usize) -> Option<PlayerId> {
        self.slot_index_of(device).map(|index| index as PlayerId + 1)
    }

    /// Dispatch a normalized gamepad input under the device's player id
    pub fn gamepad_input(&mut self, device: usize, name: &str, value: TypedValue) {
        let Some(player) = self.player_of(device) else {
            log::warn!("Input '{}' from gamepad {} with no slot", name, device);
            return;
        };

        let pressed = value.as_button();
        self.dispatch(name, player, value);

        if let (Some((axis, positive, negative)), Some(_)) = (dpad_axis(name), pressed) {
            let held = |this: &Self, button: &str| {
                this.last_value(player, button)
                    .and_then(TypedValue::as_button)
                    .unwrap_or(false)
            };
            let value = held(self, positive) as i32 - held(self, negative) as i32;
            self.dispatch(axis, player, TypedValue::Axis(value as f64));
        }
    }

    /// Frame boundary: release staged vectors, then finalize pending disconnects
    pub fn flush_frame(&mut self) {
        let staged = std::mem::take(&mut self.pending_vectors);
        for ((player, name), vector) in staged {
            let value = TypedValue::Vector(vector);
            self.last_values
                .insert((player, name.clone()), value.clone());
            self.outbox
                .push_back(Dispatch::Sample(RawSample::new(name, player, value)));
        }

        for index in 0..self.slots.len() {
            if self.slots[index].is_some_and(|slot| slot.pending_disconnect) {
                self.release_slot(index);
            }
        }
    }

    /// Take everything queued so far, in order
    pub fn drain(&mut self) -> impl Iterator<Item = Dispatch> + '_ {
        self.outbox.drain(..)
    }

    /// Number of gamepads currently holding a slot
    pub fn connected_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn slot_index_of(&self, device: usize) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.is_some_and(|s| s.device == device))
    }

    fn live_slot_of(&self, device: usize) -> Option<PlayerId> {
        self.slots
            .iter()
            .position(|slot| slot.is_some_and(|s| s.device == device && !s.pending_disconnect))
            .map(|index| index as PlayerId + 1)
    }

    fn release_slot(&mut self, index: usize) {
        let player = index as PlayerId + 1;
        if let Some(slot) = self.slots[index].take() {
            log::info!("Gamepad {} disconnected from player {}", slot.device, player);
        }
        self.last_values.retain(|(owner, _), _| *owner != player);
        self.pending_vectors.retain(|(owner, _), _| *owner != player);
        self.outbox.push_back(Dispatch::Disconnected(player));
    }
}

impl Default for RawInputDispatcher {
    fn default() -> Self {
        Self::new(MAX_GAMEPADS)
    }
}
