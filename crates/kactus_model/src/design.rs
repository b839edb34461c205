//! Designs: the netlist of a hierarchical component.

use crate::bus::Range;
use kactus_common::Vlnv;
use serde::{Deserialize, Serialize};

/// An override of one parameter of an instantiated component.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ParameterOverride {
    /// Reference id of the overridden parameter in the instantiated component.
    pub parameter_id: String,
    /// The override expression, in the scope of the instantiating component.
    pub value: String,
}

/// A component instance inside a design.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// The instance name.
    pub name: String,
    /// The instantiated component.
    pub component: Vlnv,
    /// Free-form description, emitted as a comment above the instance.
    #[serde(default)]
    pub description: String,
    /// Parameter overrides.
    #[serde(default)]
    pub overrides: Vec<ParameterOverride>,
    /// The view of the instantiated component to use.
    #[serde(default)]
    pub active_view: Option<String>,
}

impl ComponentInstance {
    /// Creates an instance with no overrides.
    pub fn new(name: impl Into<String>, component: Vlnv) -> Self {
        Self {
            name: name.into(),
            component,
            description: String::new(),
            overrides: Vec::new(),
            active_view: None,
        }
    }

    /// Returns this instance with an added parameter override.
    pub fn with_override(
        mut self,
        parameter_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.overrides.push(ParameterOverride {
            parameter_id: parameter_id.into(),
            value: value.into(),
        });
        self
    }
}

/// One end of an interconnection.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConnectionEndpoint {
    /// A bus interface of a component instance.
    Instance {
        /// The instance name.
        instance: String,
        /// The bus interface name on the instance's component.
        bus_interface: String,
    },
    /// A bus interface of the component the design implements.
    Hierarchical {
        /// The bus interface name on the top component.
        bus_interface: String,
    },
}

impl ConnectionEndpoint {
    /// Creates an instance endpoint.
    pub fn instance(instance: impl Into<String>, bus_interface: impl Into<String>) -> Self {
        ConnectionEndpoint::Instance {
            instance: instance.into(),
            bus_interface: bus_interface.into(),
        }
    }

    /// Creates a hierarchical endpoint.
    pub fn hierarchical(bus_interface: impl Into<String>) -> Self {
        ConnectionEndpoint::Hierarchical {
            bus_interface: bus_interface.into(),
        }
    }

    /// Returns the bus interface name.
    pub fn bus_interface(&self) -> &str {
        match self {
            ConnectionEndpoint::Instance { bus_interface, .. }
            | ConnectionEndpoint::Hierarchical { bus_interface } => bus_interface,
        }
    }

    /// Returns the instance name for instance endpoints.
    pub fn instance_name(&self) -> Option<&str> {
        match self {
            ConnectionEndpoint::Instance { instance, .. } => Some(instance),
            ConnectionEndpoint::Hierarchical { .. } => None,
        }
    }
}

/// A bus-level connection between two or more interfaces.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Interconnection {
    /// The connection name. May be empty.
    #[serde(default)]
    pub name: String,
    /// The connected endpoints.
    pub endpoints: Vec<ConnectionEndpoint>,
}

impl Interconnection {
    /// Creates a connection between the given endpoints.
    pub fn new(name: impl Into<String>, endpoints: Vec<ConnectionEndpoint>) -> Self {
        Self {
            name: name.into(),
            endpoints,
        }
    }
}

/// A reference to a port of a component instance.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortReference {
    /// The instance name.
    pub instance: String,
    /// The port name on the instance's component.
    pub port: String,
    /// Optional part select of the port.
    #[serde(default)]
    pub part_select: Option<Range>,
}

impl PortReference {
    /// References a whole port.
    pub fn new(instance: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            port: port.into(),
            part_select: None,
        }
    }
}

/// A reference to a port of the top component.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ExternalPortReference {
    /// The top-level port name.
    pub port: String,
    /// Optional part select of the port.
    #[serde(default)]
    pub part_select: Option<Range>,
}

impl ExternalPortReference {
    /// References a whole top-level port.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            part_select: None,
        }
    }
}

/// A port-level connection outside any bus interface.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AdHocConnection {
    /// The connection name, also used as the wire name.
    pub name: String,
    /// Tie-off value: `default`, `open`, an expression, or empty for none.
    #[serde(default)]
    pub tie_off: String,
    /// References to instance ports.
    #[serde(default)]
    pub internal: Vec<PortReference>,
    /// References to top-level ports.
    #[serde(default)]
    pub external: Vec<ExternalPortReference>,
}

impl AdHocConnection {
    /// Creates a connection with no references and no tie-off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tie_off: String::new(),
            internal: Vec::new(),
            external: Vec::new(),
        }
    }

    /// Returns this connection with the given tie-off value.
    pub fn with_tie_off(mut self, tie_off: impl Into<String>) -> Self {
        self.tie_off = tie_off.into();
        self
    }

    /// Returns this connection with an added instance port reference.
    pub fn with_internal(mut self, reference: PortReference) -> Self {
        self.internal.push(reference);
        self
    }

    /// Returns this connection with an added top-level port reference.
    pub fn with_external(mut self, reference: ExternalPortReference) -> Self {
        self.external.push(reference);
        self
    }
}

/// The netlist implementing a hierarchical component.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Design {
    /// The design identity.
    pub vlnv: Vlnv,
    /// Component instances in design order.
    #[serde(default)]
    pub instances: Vec<ComponentInstance>,
    /// Bus-level connections.
    #[serde(default)]
    pub interconnections: Vec<Interconnection>,
    /// Port-level connections.
    #[serde(default)]
    pub ad_hoc_connections: Vec<AdHocConnection>,
}

impl Design {
    /// Creates an empty design.
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            instances: Vec::new(),
            interconnections: Vec::new(),
            ad_hoc_connections: Vec::new(),
        }
    }

    /// Looks up an instance by name.
    pub fn instance(&self, name: &str) -> Option<&ComponentInstance> {
        self.instances.iter().find(|i| i.name == name)
    }
}
