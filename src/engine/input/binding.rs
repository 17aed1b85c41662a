// Bindings: adapters from named raw inputs to an action's value shape

use super::matrix::{self, Behavior, Handler};
use super::processor::Pipeline;
use super::value::{Shape, TypedValue};
use super::ConfigError;
use std::collections::HashMap;
use std::fmt;

/// Device family a binding listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceScheme {
    /// `key.*` and `mouse.*` inputs
    KeyboardMouse,
    /// `gamepad.*` inputs
    Gamepad,
    /// Anything
    Any,
}

impl DeviceScheme {
    /// Whether a raw input name belongs to this scheme
    pub fn accepts(&self, name: &str) -> bool {
        let device = name.split('.').next().unwrap_or_default();
        match self {
            Self::KeyboardMouse => matches!(device, "key" | "mouse"),
            Self::Gamepad => device == "gamepad",
            Self::Any => true,
        }
    }
}

impl fmt::Display for DeviceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeyboardMouse => "keyboard/mouse",
            Self::Gamepad => "gamepad",
            Self::Any => "any",
        })
    }
}

/// A bound instance converting raw samples into values for its action.
///
/// The conversion is fixed at construction by the type matrix; the binding
/// itself never branches on shapes.
#[derive(Debug)]
pub struct Binding {
    behavior: Behavior,
    scheme: DeviceScheme,
    /// Raw input name -> input index (0-based, `< required_inputs`)
    inputs: HashMap<String, usize>,
    pipeline: Pipeline,
    handler: Handler,
}

impl Binding {
    /// Create a binding converting `input`-shaped samples to `output` values
    pub fn new(input: Shape, output: Shape, scheme: DeviceScheme) -> Result<Self, ConfigError> {
        let behavior = matrix::resolve(input, output)?;
        Ok(Self {
            handler: behavior.init(),
            behavior,
            scheme,
            inputs: HashMap::new(),
            pipeline: Pipeline::new(),
        })
    }

    pub fn input_shape(&self) -> Shape {
        self.behavior.input
    }

    pub fn output_shape(&self) -> Shape {
        self.behavior.output
    }

    pub fn scheme(&self) -> DeviceScheme {
        self.scheme
    }

    /// How many named inputs this binding expects
    pub fn required_inputs(&self) -> usize {
        self.behavior.required_inputs
    }

    /// Listen to raw input `name` as input number `index`
    pub fn set_input(&mut self, name: impl Into<String>, index: usize) -> Result<(), ConfigError> {
        let name = name.into();
        if index >= self.behavior.required_inputs {
            return Err(ConfigError::InputIndexOutOfRange {
                name,
                index,
                required: self.behavior.required_inputs,
            });
        }
        if !self.scheme.accepts(&name) {
            return Err(ConfigError::SchemeMismatch {
                name,
                scheme: self.scheme,
            });
        }
        self.inputs.insert(name, index);
        Ok(())
    }

    /// Builder form of [`Binding::set_input`]
    pub fn with_input(mut self, name: impl Into<String>, index: usize) -> Result<Self, ConfigError> {
        self.set_input(name, index)?;
        Ok(self)
    }

    /// Listen to `names` in order, as inputs 0, 1, 2, ...
    pub fn with_inputs<I, S>(mut self, names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, name) in names.into_iter().enumerate() {
            self.set_input(name, index)?;
        }
        Ok(self)
    }

    /// Replace the binding's own processor pipeline
    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Press threshold for axis-to-button bindings
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        if !self.handler.set_threshold(threshold) {
            return Err(ConfigError::InvalidProcessor(format!(
                "{} -> {} binding has no threshold",
                self.behavior.input, self.behavior.output
            )));
        }
        Ok(self)
    }

    /// Index assigned to a raw input name, if this binding listens to it
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.get(name).copied()
    }

    /// Whether every required input has been assigned
    pub fn is_complete(&self) -> bool {
        (0..self.behavior.required_inputs).all(|index| self.inputs.values().any(|i| *i == index))
    }

    /// Offer a raw sample to this binding.
    ///
    /// Returns the converted value for the owning action, or `None` if the
    /// binding does not listen to `name`, the pipeline dropped the sample, or
    /// the handler produced no output.
    pub fn handle_input(&mut self, name: &str, value: &TypedValue) -> Option<TypedValue> {
        let index = self.input_index(name)?;
        if value.shape() != self.behavior.input {
            log::warn!(
                "Binding expected {} input on '{}', got {}",
                self.behavior.input,
                name,
                value.shape()
            );
            return None;
        }

        let Some(processed) = self.pipeline.run(value.clone()) else {
            log::trace!("Sample on '{}' dropped by binding pipeline", name);
            return None;
        };
        self.handler.handle(index, processed)
    }

    /// Forget composite handler state
    pub fn reset(&mut self) {
        self.handler.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::processor::Processor;
    use glam::DVec2;

    #[test]
    fn test_scheme_accepts() {
        assert!(DeviceScheme::KeyboardMouse.accepts("key.space"));
        assert!(DeviceScheme::KeyboardMouse.accepts("mouse.button_left"));
        assert!(!DeviceScheme::KeyboardMouse.accepts("gamepad.button_a"));
        assert!(DeviceScheme::Gamepad.accepts("gamepad.axis_lstick_x"));
        assert!(DeviceScheme::Any.accepts("whatever"));
    }

    #[test]
    fn test_unsupported_binding() {
        let err = Binding::new(Shape::Event, Shape::Axis, DeviceScheme::Any).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedConversion {
                input: Shape::Event,
                output: Shape::Axis
            }
        ));
    }

    #[test]
    fn test_input_index_out_of_range() {
        let mut binding = Binding::new(Shape::Button, Shape::Axis, DeviceScheme::Any).unwrap();
        assert!(binding.set_input("key.a", 1).is_ok());
        assert!(matches!(
            binding.set_input("key.d", 2),
            Err(ConfigError::InputIndexOutOfRange { index: 2, required: 2, .. })
        ));
    }

    #[test]
    fn test_scheme_mismatch() {
        let mut binding =
            Binding::new(Shape::Button, Shape::Button, DeviceScheme::Gamepad).unwrap();
        assert!(matches!(
            binding.set_input("key.space", 0),
            Err(ConfigError::SchemeMismatch { .. })
        ));
    }

    #[test]
    fn test_ignores_unknown_inputs() {
        let mut binding = Binding::new(Shape::Button, Shape::Button, DeviceScheme::Any)
            .unwrap()
            .with_input("key.space", 0)
            .unwrap();
        assert_eq!(binding.handle_input("key.enter", &TypedValue::Button(true)), None);
        assert_eq!(
            binding.handle_input("key.space", &TypedValue::Button(true)),
            Some(TypedValue::Button(true))
        );
    }

    #[test]
    fn test_drops_wrong_input_shape() {
        let mut binding = Binding::new(Shape::Axis, Shape::Axis, DeviceScheme::Any)
            .unwrap()
            .with_input("gamepad.axis_ltrigger", 0)
            .unwrap();
        assert_eq!(
            binding.handle_input("gamepad.axis_ltrigger", &TypedValue::Button(true)),
            None
        );
    }

    #[test]
    fn test_completeness() {
        let binding = Binding::new(Shape::Button, Shape::Vector, DeviceScheme::KeyboardMouse)
            .unwrap()
            .with_inputs(["key.d", "key.a", "key.w"])
            .unwrap();
        assert!(!binding.is_complete());

        let binding = binding.with_input("key.s", 3).unwrap();
        assert!(binding.is_complete());
        assert_eq!(binding.required_inputs(), 4);
        assert_eq!(binding.input_index("key.w"), Some(2));
    }

    #[test]
    fn test_pipeline_runs_before_handler() {
        let mut binding = Binding::new(Shape::Vector, Shape::Vector, DeviceScheme::Gamepad)
            .unwrap()
            .with_input("gamepad.vector_lstick", 0)
            .unwrap()
            .with_pipeline(Pipeline::new().with(Processor::deadzone(0.2, 0.9).unwrap()));

        let out = binding.handle_input(
            "gamepad.vector_lstick",
            &TypedValue::Vector(DVec2::new(0.1, 0.95)),
        );
        assert_eq!(out, Some(TypedValue::Vector(DVec2::new(0.0, 1.0))));
    }

    #[test]
    fn test_pipeline_drop_skips_handler() {
        let mut binding = Binding::new(Shape::Axis, Shape::Button, DeviceScheme::Gamepad)
            .unwrap()
            .with_input("gamepad.axis_rtrigger", 0)
            .unwrap()
            .with_pipeline(Pipeline::new().with(Processor::DropBelow(0.05)));

        assert_eq!(
            binding.handle_input("gamepad.axis_rtrigger", &TypedValue::Axis(0.01)),
            None
        );
    }

    #[test]
    fn test_with_threshold() {
        let binding = Binding::new(Shape::Axis, Shape::Button, DeviceScheme::Any)
            .unwrap()
            .with_threshold(0.8);
        assert!(binding.is_ok());

        let binding = Binding::new(Shape::Axis, Shape::Axis, DeviceScheme::Any)
            .unwrap()
            .with_threshold(0.8);
        assert!(binding.is_err());
    }
}
