// Actions: typed, edge-detecting aggregation points for game logic

use super::binding::{Binding, DeviceScheme};
use super::processor::Pipeline;
use super::signal::{Signal, SlotId};
use super::value::{Scalar, Shape, TypedValue};
use super::ConfigError;

/// A typed action fed by one or more bindings.
///
/// The latched value is the only source of truth for edge detection:
/// `started`, `changed` and `stopped` fire only when a new value differs from
/// it component-wise. Event actions skip the comparison and fire `started` for
/// every occurrence.
#[derive(Debug)]
pub struct Action {
    shape: Shape,
    bindings: Vec<Binding>,
    latched: TypedValue,
    pipeline: Pipeline,
    started: Signal<TypedValue>,
    changed: Signal<TypedValue>,
    stopped: Signal<TypedValue>,
}

impl Action {
    /// Create an action producing values of `shape`
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            bindings: Vec::new(),
            latched: shape.default_value(),
            pipeline: Pipeline::new(),
            started: Signal::new(),
            changed: Signal::new(),
            stopped: Signal::new(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Current latched value
    pub fn value(&self) -> &TypedValue {
        &self.latched
    }

    /// Whether the latched value is away from rest (pressed, non-zero)
    pub fn is_active(&self) -> bool {
        self.shape != Shape::Event && !self.latched.is_idle()
    }

    /// Attach a binding; its output shape must match this action's shape
    pub fn add_binding(&mut self, binding: Binding) -> Result<&mut Binding, ConfigError> {
        if binding.output_shape() != self.shape {
            return Err(ConfigError::ShapeMismatch {
                expected: self.shape,
                got: binding.output_shape(),
            });
        }
        self.bindings.push(binding);
        let last = self.bindings.len() - 1;
        Ok(&mut self.bindings[last])
    }

    /// Create and attach a binding from `input`-shaped raw samples.
    /// Assign its inputs with [`Binding::set_input`] on the returned reference.
    pub fn bind(&mut self, input: Shape, scheme: DeviceScheme) -> Result<&mut Binding, ConfigError> {
        let binding = Binding::new(input, self.shape, scheme)?;
        self.add_binding(binding)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Drop every binding
    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    /// Replace the action-level pipeline, applied after each binding's own
    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    pub fn on_started(&mut self, callback: impl FnMut(&TypedValue) + 'static) -> SlotId {
        self.started.connect(callback)
    }

    pub fn on_changed(&mut self, callback: impl FnMut(&TypedValue) + 'static) -> SlotId {
        self.changed.connect(callback)
    }

    pub fn on_stopped(&mut self, callback: impl FnMut(&TypedValue) + 'static) -> SlotId {
        self.stopped.connect(callback)
    }

    /// Remove a callback from whichever of the three signals holds it
    pub fn disconnect(&mut self, id: SlotId) -> bool {
        self.started.disconnect(id) || self.changed.disconnect(id) || self.stopped.disconnect(id)
    }

    /// Offer a raw sample to every binding, firing for each produced value
    pub fn handle_input(&mut self, name: &str, value: &TypedValue) {
        let produced: Vec<TypedValue> = self
            .bindings
            .iter_mut()
            .filter_map(|binding| binding.handle_input(name, value))
            .collect();

        for value in produced {
            if let Err(err) = self.fire(value) {
                log::error!("Binding on '{}' produced an unusable value: {}", name, err);
            }
        }
    }

    /// Push a new value through the action pipeline and edge detection
    pub fn fire(&mut self, value: TypedValue) -> Result<(), ConfigError> {
        if value.shape() != self.shape {
            return Err(ConfigError::ShapeMismatch {
                expected: self.shape,
                got: value.shape(),
            });
        }

        let Some(value) = self.pipeline.run(value) else {
            return Ok(());
        };
        if value.shape() != self.shape {
            return Err(ConfigError::ShapeMismatch {
                expected: self.shape,
                got: value.shape(),
            });
        }

        if self.shape == Shape::Event {
            self.latched = value.clone();
            self.started.emit(&value);
            return Ok(());
        }

        if value == self.latched {
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.latched, value.clone());
        // `value` is the snapshot callbacks see, independent of later fires
        if previous.is_idle() {
            self.started.emit(&value);
        }
        if value.is_idle() {
            self.stopped.emit(&value);
        }
        self.changed.emit(&value);
        Ok(())
    }

    /// Fire from loose arguments, checking arity against the shape
    pub fn fire_args(&mut self, args: &[Scalar]) -> Result<(), ConfigError> {
        let value = TypedValue::from_args(self.shape, args)?;
        self.fire(value)
    }

    /// Return to the resting value without firing any callbacks
    pub fn reset(&mut self) {
        self.latched = self.shape.default_value();
        for binding in &mut self.bindings {
            binding.reset();
        }
    }
}
