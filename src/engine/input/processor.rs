// Processor pipelines applied to values on their way to an action

use super::value::TypedValue;
use super::ConfigError;
use crate::core::math;
use glam::DVec2;
use std::fmt;

/// Which component(s) an invert processor negates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvertAxis {
    X,
    Y,
    Both,
}

type CustomFn = Box<dyn Fn(TypedValue) -> Option<TypedValue>>;

/// A single value transform.
///
/// Returning `None` from [`Processor::apply`] drops the sample: the rest of the
/// pipeline and the handler it feeds are skipped.
pub enum Processor {
    /// Rescale magnitude from `[min, max]` to `[0, 1]`, per component
    Deadzone { min: f64, max: f64 },
    /// Negate axes/components, flip buttons
    Invert(InvertAxis),
    /// Snap each component to -1/0/1 once it reaches the threshold
    Round { threshold: f64 },
    /// Multiply axes/components
    Scale(f64),
    /// Drop samples whose magnitude is below the bound
    DropBelow(f64),
    Custom(CustomFn),
}

impl Processor {
    /// Deadzone with validated bounds (`0 <= min < max`)
    pub fn deadzone(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !(min >= 0.0 && min < max) {
            return Err(ConfigError::InvalidProcessor(format!(
                "deadzone bounds must satisfy 0 <= min < max, got [{min}, {max}]"
            )));
        }
        Ok(Self::Deadzone { min, max })
    }

    pub fn custom(f: impl Fn(TypedValue) -> Option<TypedValue> + 'static) -> Self {
        Self::Custom(Box::new(f))
    }

    /// Run this transform on a value
    pub fn apply(&self, value: TypedValue) -> Option<TypedValue> {
        match self {
            Self::Deadzone { min, max } => {
                Some(map_components(value, |c| math::deadzone(c, *min, *max)))
            }
            Self::Invert(axis) => Some(invert(value, *axis)),
            Self::Round { threshold } => {
                Some(map_components(value, |c| math::binarize(c, *threshold)))
            }
            Self::Scale(factor) => Some(map_components(value, |c| c * factor)),
            Self::DropBelow(bound) => {
                if value.magnitude() < *bound {
                    None
                } else {
                    Some(value)
                }
            }
            Self::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deadzone { min, max } => f
                .debug_struct("Deadzone")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Invert(axis) => f.debug_tuple("Invert").field(axis).finish(),
            Self::Round { threshold } => f
                .debug_struct("Round")
                .field("threshold", threshold)
                .finish(),
            Self::Scale(factor) => f.debug_tuple("Scale").field(factor).finish(),
            Self::DropBelow(bound) => f.debug_tuple("DropBelow").field(bound).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Apply a numeric transform to axis values and vector components.
/// Buttons and events pass through untouched.
fn map_components(value: TypedValue, f: impl Fn(f64) -> f64) -> TypedValue {
    match value {
        TypedValue::Axis(v) => TypedValue::Axis(f(v)),
        TypedValue::Vector(v) => TypedValue::Vector(DVec2::new(f(v.x), f(v.y))),
        other => other,
    }
}

fn invert(value: TypedValue, axis: InvertAxis) -> TypedValue {
    match value {
        TypedValue::Button(pressed) => TypedValue::Button(!pressed),
        TypedValue::Axis(v) => TypedValue::Axis(-v),
        TypedValue::Vector(v) => TypedValue::Vector(match axis {
            InvertAxis::X => DVec2::new(-v.x, v.y),
            InvertAxis::Y => DVec2::new(v.x, -v.y),
            InvertAxis::Both => -v,
        }),
        other => other,
    }
}

/// Ordered list of processors, fixed once built
#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<Processor>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step (builder style)
    pub fn with(mut self, processor: Processor) -> Self {
        self.steps.push(processor);
        self
    }

    /// Run every step in order, stopping at the first one that drops the value
    pub fn run(&self, value: TypedValue) -> Option<TypedValue> {
        self.steps
            .iter()
            .try_fold(value, |value, step| step.apply(value))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<Vec<Processor>> for Pipeline {
    fn from(steps: Vec<Processor>) -> Self {
        Self { steps }
    }
}
