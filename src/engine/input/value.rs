// Typed input values shared by raw samples, bindings and actions

use super::ConfigError;
use glam::DVec2;
use std::fmt;

/// Player index carried by every raw sample.
///
/// `UNROUTED` marks keyboard/mouse input that belongs to nobody in particular,
/// `DESKTOP_PLAYER` is the always-present local player and gamepad players take
/// the ids of their slots (1..=16).
pub type PlayerId = i32;

/// Player id of samples that are broadcast to every player
pub const UNROUTED: PlayerId = -1;

/// Player id of the implicit keyboard/mouse player
pub const DESKTOP_PLAYER: PlayerId = 0;

/// The four kinds of payload flowing through the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Button,
    Axis,
    Vector,
    Event,
}

impl Shape {
    /// Lowercase name, also used as the `kind` part of raw input names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Axis => "axis",
            Self::Vector => "vector",
            Self::Event => "event",
        }
    }

    /// Resting value an action of this shape starts in
    pub fn default_value(&self) -> TypedValue {
        match self {
            Self::Button => TypedValue::Button(false),
            Self::Axis => TypedValue::Axis(0.0),
            Self::Vector => TypedValue::Vector(DVec2::ZERO),
            Self::Event => TypedValue::Event(Vec::new()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single loose argument, the element type of event payloads
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Payload of a raw sample or an action
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Button(bool),
    Axis(f64),
    Vector(DVec2),
    Event(Vec<Scalar>),
}

impl TypedValue {
    /// Shape of this value
    pub fn shape(&self) -> Shape {
        match self {
            Self::Button(_) => Shape::Button,
            Self::Axis(_) => Shape::Axis,
            Self::Vector(_) => Shape::Vector,
            Self::Event(_) => Shape::Event,
        }
    }

    /// Build a value of `shape` from loose arguments, checking arity and types
    pub fn from_args(shape: Shape, args: &[Scalar]) -> Result<Self, ConfigError> {
        let expected = match shape {
            Shape::Button | Shape::Axis => 1,
            Shape::Vector => 2,
            Shape::Event => return Ok(Self::Event(args.to_vec())),
        };
        if args.len() != expected {
            return Err(ConfigError::Arity {
                shape,
                expected,
                got: args.len(),
            });
        }

        match (shape, args) {
            (Shape::Button, [Scalar::Bool(pressed)]) => Ok(Self::Button(*pressed)),
            (Shape::Axis, [Scalar::Number(value)]) => Ok(Self::Axis(*value)),
            (Shape::Vector, [Scalar::Number(x), Scalar::Number(y)]) => {
                Ok(Self::Vector(DVec2::new(*x, *y)))
            }
            _ => Err(ConfigError::ArgumentType { shape }),
        }
    }

    /// Whether this value is the resting value of its shape
    ///
    /// Events have no resting value and are never idle.
    pub fn is_idle(&self) -> bool {
        match self {
            Self::Button(pressed) => !pressed,
            Self::Axis(value) => *value == 0.0,
            Self::Vector(value) => *value == DVec2::ZERO,
            Self::Event(_) => false,
        }
    }

    /// Magnitude used by gating processors
    pub fn magnitude(&self) -> f64 {
        match self {
            Self::Button(pressed) => {
                if *pressed {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Axis(value) => value.abs(),
            Self::Vector(value) => value.length(),
            Self::Event(args) => args.len() as f64,
        }
    }

    pub fn as_button(&self) -> Option<bool> {
        match self {
            Self::Button(pressed) => Some(*pressed),
            _ => None,
        }
    }

    pub fn as_axis(&self) -> Option<f64> {
        match self {
            Self::Axis(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<DVec2> {
        match self {
            Self::Vector(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&[Scalar]> {
        match self {
            Self::Event(args) => Some(args),
            _ => None,
        }
    }
}

/// One raw input occurrence, already normalized to the `device.kind_name` grammar
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub name: String,
    pub player: PlayerId,
    pub value: TypedValue,
}

impl RawSample {
    pub fn new(name: impl Into<String>, player: PlayerId, value: TypedValue) -> Self {
        Self {
            name: name.into(),
            player,
            value,
        }
    }
}
