// Binding type matrix: which input shapes can feed which action shapes, and how

use super::button_axis::{ButtonAxisHandler, ButtonVectorHandler};
use super::value::{Scalar, Shape, TypedValue};
use super::ConfigError;

/// Default magnitude at which an axis counts as a pressed button
pub const DEFAULT_AXIS_THRESHOLD: f64 = 0.5;

/// How a binding turns raw samples of one shape into values of another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Same shape in and out
    Identity,
    /// Two buttons (positive, negative) to a signed axis
    ButtonAxis,
    /// Four buttons (+x, -x, +y, -y) to a vector
    ButtonVector,
    /// A button press becomes a discrete event
    ButtonEvent,
    /// An axis past a threshold becomes a held button
    AxisButton,
}

/// Behavior descriptor resolved from an `(input, output)` shape pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    pub input: Shape,
    pub output: Shape,
    pub conversion: Conversion,
    /// Number of named raw inputs a binding with this behavior must be given
    pub required_inputs: usize,
}

impl Behavior {
    /// Fresh handler state for a binding using this behavior
    pub fn init(&self) -> Handler {
        match self.conversion {
            Conversion::Identity => Handler::Identity,
            Conversion::ButtonAxis => Handler::ButtonAxis(ButtonAxisHandler::new()),
            Conversion::ButtonVector => Handler::ButtonVector(ButtonVectorHandler::new()),
            Conversion::ButtonEvent => Handler::ButtonEvent,
            Conversion::AxisButton => Handler::AxisButton {
                threshold: DEFAULT_AXIS_THRESHOLD,
            },
        }
    }
}

/// Look up the behavior for converting `input`-shaped samples into `output` values
pub fn resolve(input: Shape, output: Shape) -> Result<Behavior, ConfigError> {
    use Shape::*;

    let (conversion, required_inputs) = match (input, output) {
        (Button, Button) => (Conversion::Identity, 1),
        (Button, Axis) => (Conversion::ButtonAxis, 2),
        (Button, Vector) => (Conversion::ButtonVector, 4),
        (Button, Event) => (Conversion::ButtonEvent, 1),
        (Axis, Axis) => (Conversion::Identity, 1),
        (Axis, Button) => (Conversion::AxisButton, 1),
        (Vector, Vector) => (Conversion::Identity, 1),
        (Event, Event) => (Conversion::Identity, 1),
        (Axis, Vector | Event) | (Vector, Button | Axis | Event) | (Event, Button | Axis | Vector) => {
            return Err(ConfigError::UnsupportedConversion { input, output });
        }
    };

    Ok(Behavior {
        input,
        output,
        conversion,
        required_inputs,
    })
}

/// Per-binding conversion state
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    Identity,
    ButtonAxis(ButtonAxisHandler),
    ButtonVector(ButtonVectorHandler),
    ButtonEvent,
    AxisButton { threshold: f64 },
}

impl Handler {
    /// Convert a (processed) raw value arriving on input `index`.
    ///
    /// Returns `None` when the sample produces no output: a duplicate composite
    /// transition, a button release feeding an event, or a value of the wrong
    /// shape for this handler.
    pub fn handle(&mut self, index: usize, value: TypedValue) -> Option<TypedValue> {
        match self {
            Self::Identity => Some(value),
            Self::ButtonAxis(handler) => handler
                .handle(index, value.as_button()?)
                .map(TypedValue::Axis),
            Self::ButtonVector(handler) => handler
                .handle(index, value.as_button()?)
                .map(TypedValue::Vector),
            Self::ButtonEvent => match value.as_button()? {
                true => Some(TypedValue::Event(vec![Scalar::Bool(true)])),
                false => None,
            },
            Self::AxisButton { threshold } => {
                Some(TypedValue::Button(value.as_axis()?.abs() >= *threshold))
            }
        }
    }

    /// Change the press threshold of an axis-to-button handler.
    /// Returns false for handlers without a threshold.
    pub fn set_threshold(&mut self, value: f64) -> bool {
        match self {
            Self::AxisButton { threshold } => {
                *threshold = value;
                true
            }
            _ => false,
        }
    }

    /// Forget composite button state
    pub fn reset(&mut self) {
        match self {
            Self::ButtonAxis(handler) => handler.reset(),
            Self::ButtonVector(handler) => handler.reset(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    const SHAPES: [Shape; 4] = [Shape::Button, Shape::Axis, Shape::Vector, Shape::Event];

    #[test]
    fn test_supported_pairs() {
        let supported = [
            (Shape::Button, Shape::Button, 1),
            (Shape::Button, Shape::Axis, 2),
            (Shape::Button, Shape::Vector, 4),
            (Shape::Button, Shape::Event, 1),
            (Shape::Axis, Shape::Axis, 1),
            (Shape::Axis, Shape::Button, 1),
            (Shape::Vector, Shape::Vector, 1),
            (Shape::Event, Shape::Event, 1),
        ];
        for (input, output, required) in supported {
            let behavior = resolve(input, output).unwrap();
            assert_eq!(behavior.required_inputs, required, "{input} -> {output}");
            assert_eq!(behavior.input, input);
            assert_eq!(behavior.output, output);
        }
    }

    #[test]
    fn test_unsupported_pairs_name_both_shapes() {
        let mut unsupported = 0;
        for input in SHAPES {
            for output in SHAPES {
                if let Err(err) = resolve(input, output) {
                    unsupported += 1;
                    let message = err.to_string();
                    assert!(message.contains(input.as_str()), "{message}");
                    assert!(message.contains(output.as_str()), "{message}");
                }
            }
        }
        assert_eq!(unsupported, 8);
    }

    #[test]
    fn test_identity_handler() {
        let mut handler = resolve(Shape::Vector, Shape::Vector).unwrap().init();
        let v = TypedValue::Vector(DVec2::new(0.1, 0.2));
        assert_eq!(handler.handle(0, v.clone()), Some(v));
    }

    #[test]
    fn test_button_axis_handler() {
        let mut handler = resolve(Shape::Button, Shape::Axis).unwrap().init();
        assert_eq!(
            handler.handle(1, TypedValue::Button(true)),
            Some(TypedValue::Axis(-1.0))
        );
        assert_eq!(handler.handle(1, TypedValue::Button(true)), None);
        assert_eq!(handler.handle(1, TypedValue::Axis(1.0)), None);
    }

    #[test]
    fn test_button_vector_handler() {
        let mut handler = resolve(Shape::Button, Shape::Vector).unwrap().init();
        assert_eq!(
            handler.handle(3, TypedValue::Button(true)),
            Some(TypedValue::Vector(DVec2::new(0.0, -1.0)))
        );
    }

    #[test]
    fn test_button_event_fires_on_press_only() {
        let mut handler = resolve(Shape::Button, Shape::Event).unwrap().init();
        assert!(matches!(
            handler.handle(0, TypedValue::Button(true)),
            Some(TypedValue::Event(_))
        ));
        assert_eq!(handler.handle(0, TypedValue::Button(false)), None);
    }

    #[test]
    fn test_axis_button_threshold() {
        let mut handler = resolve(Shape::Axis, Shape::Button).unwrap().init();
        assert_eq!(
            handler.handle(0, TypedValue::Axis(-0.6)),
            Some(TypedValue::Button(true))
        );
        assert_eq!(
            handler.handle(0, TypedValue::Axis(0.2)),
            Some(TypedValue::Button(false))
        );

        assert!(handler.set_threshold(0.1));
        assert_eq!(
            handler.handle(0, TypedValue::Axis(0.2)),
            Some(TypedValue::Button(true))
        );
    }

    #[test]
    fn test_threshold_only_on_axis_button() {
        let mut handler = resolve(Shape::Button, Shape::Button).unwrap().init();
        assert!(!handler.set_threshold(0.3));
    }
}
