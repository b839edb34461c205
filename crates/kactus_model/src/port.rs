//! Physical ports of a component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a physical or logical port.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Input port.
    In,
    /// Output port.
    Out,
    /// Bidirectional port.
    InOut,
    /// A port with no physical presence; never emitted.
    Phantom,
}

impl Direction {
    /// Returns the Verilog keyword for this direction, or `None` for phantom ports.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Direction::In => Some("input"),
            Direction::Out => Some("output"),
            Direction::InOut => Some("inout"),
            Direction::Phantom => None,
        }
    }

    /// Returns the direction as seen from the other side of a connection.
    pub fn mirrored(self) -> Direction {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
            other => other,
        }
    }

    /// Returns `true` if a value can be driven into this port from outside.
    pub fn accepts_drive(self) -> bool {
        matches!(self, Direction::In | Direction::InOut)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
            Direction::Phantom => "phantom",
        };
        f.write_str(s)
    }
}

/// A physical wire port of a component.
///
/// Both bounds empty means a scalar port, emitted without a range.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Port {
    /// The port name.
    pub name: String,
    /// The port direction.
    pub direction: Direction,
    /// The left bound expression.
    #[serde(default)]
    pub left_bound: String,
    /// The right bound expression.
    #[serde(default)]
    pub right_bound: String,
    /// The default value driven when the port is tied with `default`.
    #[serde(default)]
    pub default_value: String,
    /// Whether unconnected instances of this port must be tied to the default.
    #[serde(default)]
    pub default_tie_required: bool,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Port {
    /// Creates a port with the given bounds.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        left_bound: impl Into<String>,
        right_bound: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            left_bound: left_bound.into(),
            right_bound: right_bound.into(),
            default_value: String::new(),
            default_tie_required: false,
            description: String::new(),
        }
    }

    /// Creates a scalar port.
    pub fn scalar(name: impl Into<String>, direction: Direction) -> Self {
        Self::new(name, direction, "", "")
    }

    /// Returns this port with the given default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Returns `true` if the port has no declared range.
    pub fn is_scalar(&self) -> bool {
        self.left_bound.is_empty() && self.right_bound.is_empty()
    }
}
