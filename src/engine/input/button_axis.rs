// Composite handlers synthesizing signed axes from pairs of buttons

use glam::DVec2;

/// Index of the button driving the positive direction
pub const POSITIVE: usize = 0;

/// Index of the button driving the negative direction
pub const NEGATIVE: usize = 1;

/// Two-button to signed-axis state machine.
///
/// Output table:
/// - neither held: 0
/// - only positive held: +1
/// - only negative held: -1
/// - both held: whichever was pressed last
///
/// Releasing one button while the other is still held falls back to the held
/// button's sign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonAxisHandler {
    pressed: [bool; 2],
    value: f64,
}

impl ButtonAxisHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a button transition. Returns the new axis value, or `None` when the
    /// pair of button states did not change (duplicate press/release).
    pub fn handle(&mut self, index: usize, pressed: bool) -> Option<f64> {
        let slot = self.pressed.get_mut(index)?;
        if *slot == pressed {
            return None;
        }
        *slot = pressed;

        self.value = match self.pressed {
            [false, false] => 0.0,
            [true, false] => 1.0,
            [false, true] => -1.0,
            // Both held: the button that just went down wins
            [true, true] => {
                if index == POSITIVE {
                    1.0
                } else {
                    -1.0
                }
            }
        };
        Some(self.value)
    }

    /// Last emitted value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current (positive, negative) button states
    pub fn pressed(&self) -> (bool, bool) {
        (self.pressed[POSITIVE], self.pressed[NEGATIVE])
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Four buttons (+x, -x, +y, -y) to a 2-D vector, one [`ButtonAxisHandler`] per axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonVectorHandler {
    x: ButtonAxisHandler,
    y: ButtonAxisHandler,
}

impl ButtonVectorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a transition of button `index` (0..4). The untouched axis keeps its
    /// last value in the combined output.
    pub fn handle(&mut self, index: usize, pressed: bool) -> Option<DVec2> {
        let changed = match index {
            0 | 1 => self.x.handle(index, pressed),
            2 | 3 => self.y.handle(index - 2, pressed),
            _ => None,
        };
        changed.map(|_| self.value())
    }

    pub fn value(&self) -> DVec2 {
        DVec2::new(self.x.value(), self.y.value())
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_handler() {
        let handler = ButtonAxisHandler::new();
        assert_eq!(handler.value(), 0.0);
        assert_eq!(handler.pressed(), (false, false));
    }

    #[test]
    fn test_positive_then_release() {
        let mut handler = ButtonAxisHandler::new();
        assert_eq!(handler.handle(POSITIVE, true), Some(1.0));
        assert_eq!(handler.handle(POSITIVE, false), Some(0.0));
    }

    #[test]
    fn test_negative_press() {
        let mut handler = ButtonAxisHandler::new();
        assert_eq!(handler.handle(NEGATIVE, true), Some(-1.0));
    }

    #[test]
    fn test_duplicate_events_are_ignored() {
        let mut handler = ButtonAxisHandler::new();
        assert_eq!(handler.handle(POSITIVE, true), Some(1.0));
        assert_eq!(handler.handle(POSITIVE, true), None);
        assert_eq!(handler.handle(NEGATIVE, false), None);
    }

    #[test]
    fn test_last_pressed_wins() {
        let mut handler = ButtonAxisHandler::new();
        handler.handle(NEGATIVE, true);
        assert_eq!(handler.handle(POSITIVE, true), Some(1.0));

        let mut handler = ButtonAxisHandler::new();
        handler.handle(POSITIVE, true);
        assert_eq!(handler.handle(NEGATIVE, true), Some(-1.0));
    }

    #[test]
    fn test_release_dominant_falls_back_to_held() {
        let mut handler = ButtonAxisHandler::new();
        handler.handle(NEGATIVE, true);
        handler.handle(POSITIVE, true);
        // Releasing positive while negative is still held
        assert_eq!(handler.handle(POSITIVE, false), Some(-1.0));
        assert_eq!(handler.handle(NEGATIVE, false), Some(0.0));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut handler = ButtonAxisHandler::new();
        assert_eq!(handler.handle(2, true), None);
        assert_eq!(handler.value(), 0.0);
    }

    #[test]
    fn test_output_always_matches_table() {
        // Walk every sequence of 6 transitions over the two buttons
        for seq in 0u32..(1 << 12) {
            let mut handler = ButtonAxisHandler::new();
            let mut last_pressed = None;
            for step in 0..6 {
                let bits = (seq >> (step * 2)) & 0b11;
                let index = (bits & 1) as usize;
                let pressed = bits & 2 != 0;

                let before = handler.pressed();
                let out = handler.handle(index, pressed);
                let after = handler.pressed();

                if before == after {
                    assert_eq!(out, None);
                    continue;
                }
                if pressed {
                    last_pressed = Some(index);
                }

                let expected = match after {
                    (false, false) => 0.0,
                    (true, false) => 1.0,
                    (false, true) => -1.0,
                    (true, true) => {
                        if last_pressed == Some(POSITIVE) {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                };
                assert_eq!(out, Some(expected));
                assert!([-1.0, 0.0, 1.0].contains(&out.unwrap()));
            }
        }
    }

    #[test]
    fn test_vector_handler_keeps_untouched_axis() {
        let mut handler = ButtonVectorHandler::new();
        // d, w, release d
        assert_eq!(handler.handle(0, true), Some(DVec2::new(1.0, 0.0)));
        assert_eq!(handler.handle(2, true), Some(DVec2::new(1.0, 1.0)));
        assert_eq!(handler.handle(0, false), Some(DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_vector_handler_negative_directions() {
        let mut handler = ButtonVectorHandler::new();
        assert_eq!(handler.handle(1, true), Some(DVec2::new(-1.0, 0.0)));
        assert_eq!(handler.handle(3, true), Some(DVec2::new(-1.0, -1.0)));
        assert_eq!(handler.handle(3, true), None);
        assert_eq!(handler.handle(4, true), None);
    }

    #[test]
    fn test_vector_handler_reset() {
        let mut handler = ButtonVectorHandler::new();
        handler.handle(0, true);
        handler.reset();
        assert_eq!(handler.value(), DVec2::ZERO);
    }
}
