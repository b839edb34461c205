//! Bit ranges with expression-valued bounds.

use kactus_model::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `[left:right]` range whose bounds may stay symbolic.
///
/// Empty bounds denote a scalar and render as nothing.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// The left bound expression.
    pub left: String,
    /// The right bound expression.
    pub right: String,
}

impl Bounds {
    /// Creates bounds from two expressions.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns `true` if both bounds are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Returns the bounds rendered as `[left:right]`, or an empty string for a scalar.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<&Range> for Bounds {
    fn from(range: &Range) -> Self {
        Bounds::new(range.left.clone(), range.right.clone())
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            Ok(())
        } else {
            write!(f, "[{}:{}]", self.left, self.right)
        }
    }
}
