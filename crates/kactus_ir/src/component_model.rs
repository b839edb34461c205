//! The elaborated view of one component.

use crate::arena::Arena;
use crate::bounds::Bounds;
use crate::ids::{ParamId, PortId};
use kactus_common::Vlnv;
use kactus_model::{Direction, InterfaceMode};
use serde::{Deserialize, Serialize};

/// Outcome of resolving one parameter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ParameterStatus {
    /// All references were in scope and the parameter is ordered after them.
    Resolved,
    /// The parameter is part of a reference cycle; its value is the raw expression.
    Cycle,
    /// The expression references an id that is not in scope; its value is the raw expression.
    Unresolved,
}

/// A parameter with its emission-ready value.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ResolvedParameter {
    /// The stable reference id.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The raw expression as found in the model (or the override).
    pub raw: String,
    /// The value to emit, with references rewritten.
    pub value: String,
    /// How resolution went.
    pub status: ParameterStatus,
}

/// A physical port with its declared range.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortModel {
    /// The port name.
    pub name: String,
    /// The port direction.
    pub direction: Direction,
    /// The declared range with references rewritten.
    pub bounds: Bounds,
    /// The default value, used by `default` tie-offs.
    pub default_value: String,
    /// Whether an unconnected pin of this port is tied to its default value.
    pub default_tie_required: bool,
    /// Name of the first bus interface that maps this port, if any.
    pub owner: Option<String>,
}

/// One logical signal of an interface mapped onto a physical port.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SignalMapping {
    /// The logical signal name.
    pub logical: String,
    /// The physical port.
    pub port: PortId,
    /// The physical bits: the part select, or the whole port.
    pub physical: Bounds,
    /// The logical bits the physical slice carries.
    pub logical_bounds: Bounds,
}

/// A bus interface with its resolved signal mappings.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InterfaceModel {
    /// The interface name.
    pub name: String,
    /// The interface mode.
    pub mode: InterfaceMode,
    /// Mappings in port-map order.
    pub signals: Vec<SignalMapping>,
}

impl InterfaceModel {
    /// Returns the mappings of the given logical signal.
    pub fn signal(&self, logical: &str) -> impl Iterator<Item = &SignalMapping> {
        let logical = logical.to_string();
        self.signals.iter().filter(move |s| s.logical == logical)
    }

    /// Returns the distinct logical signal names in first-appearance order.
    pub fn logical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for signal in &self.signals {
            if !names.contains(&signal.logical.as_str()) {
                names.push(&signal.logical);
            }
        }
        names
    }
}

/// The elaborated view of one component.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComponentModel {
    /// The component identity.
    pub vlnv: Vlnv,
    /// The HDL module name.
    pub module_name: String,
    /// Parameters in declaration order (component parameters, then module parameters).
    pub parameters: Arena<ParamId, ResolvedParameter>,
    /// Parameter ids in emission order.
    pub parameter_order: Vec<ParamId>,
    /// Ports in declaration order.
    pub ports: Arena<PortId, PortModel>,
    /// Bus interfaces in declaration order.
    pub interfaces: Vec<InterfaceModel>,
}

impl ComponentModel {
    /// Creates an empty model.
    pub fn new(vlnv: Vlnv, module_name: impl Into<String>) -> Self {
        Self {
            vlnv,
            module_name: module_name.into(),
            parameters: Arena::new(),
            parameter_order: Vec::new(),
            ports: Arena::new(),
            interfaces: Vec::new(),
        }
    }

    /// Iterates over parameters in emission order.
    pub fn ordered_parameters(&self) -> impl Iterator<Item = &ResolvedParameter> {
        self.parameter_order.iter().map(|&id| &self.parameters[id])
    }

    /// Looks up a parameter by reference id.
    pub fn parameter_by_id(&self, id: &str) -> Option<&ResolvedParameter> {
        self.parameters.values().find(|p| p.id == id)
    }

    /// Looks up a port id by name.
    pub fn port_id(&self, name: &str) -> Option<PortId> {
        self.ports.find(|p| p.name == name)
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&PortModel> {
        self.port_id(name).map(|id| &self.ports[id])
    }

    /// Looks up a bus interface by name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceModel> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}
