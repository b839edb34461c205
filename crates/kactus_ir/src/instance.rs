//! Instance-specific views of components.

use crate::component_model::{ComponentModel, PortModel};
use serde::{Deserialize, Serialize};

/// A component model specialised for one instance.
///
/// Parameter values are the effective values after overrides, and port and
/// logical bounds are rewritten with them. References into the instantiating
/// component's scope appear as that scope's display names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstanceModel {
    /// The instance name.
    pub name: String,
    /// The instance description, emitted as a comment.
    pub description: String,
    /// The specialised component model.
    pub model: ComponentModel,
}

impl InstanceModel {
    /// Looks up a port of the instance by name.
    pub fn port(&self, name: &str) -> Option<&PortModel> {
        self.model.port(name)
    }
}
