//! Named parameters and their raw value expressions.

use serde::{Deserialize, Serialize};

/// How a parameter's value may be set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    /// The value is fixed in the component.
    #[default]
    Immediate,
    /// The value may be overridden by the instantiating design.
    User,
    /// The value is produced by a generator.
    Generated,
}

/// A component parameter or module parameter.
///
/// Expressions reference other parameters by [`Parameter::id`], never by
/// display name. The generator rewrites those ids into display names when it
/// emits HDL.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Parameter {
    /// The stable reference id used inside expressions.
    pub id: String,
    /// The display name emitted into HDL.
    pub name: String,
    /// The raw value expression.
    pub value: String,
    /// How the value may be set.
    #[serde(default)]
    pub resolve: ResolveMode,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Parameter {
    /// Creates an immediate parameter.
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.into(),
            resolve: ResolveMode::Immediate,
            description: String::new(),
        }
    }

    /// Returns this parameter with the given resolution mode.
    pub fn with_resolve(mut self, resolve: ResolveMode) -> Self {
        self.resolve = resolve;
        self
    }
}
