// Minimal subscribe/emit list used for action and connection callbacks

use std::fmt;

/// Handle returned by [`Signal::connect`], used to disconnect later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

/// An ordered list of callbacks invoked with a borrowed payload
pub struct Signal<T> {
    slots: Vec<(SlotId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe a callback; callbacks run in subscription order
    pub fn connect(&mut self, callback: impl FnMut(&T) + 'static) -> SlotId {
        let id = SlotId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was already gone
    pub fn disconnect(&mut self, id: SlotId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot, _)| *slot != id);
        self.slots.len() != before
    }

    pub fn emit(&mut self, payload: &T) {
        for (_, callback) in &mut self.slots {
            callback(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.len())
            .finish()
    }
}
