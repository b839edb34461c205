//! The fully elaborated module handed to the HDL emitter.

use crate::arena::Arena;
use crate::bounds::Bounds;
use crate::ids::WireId;
use crate::wire::SynthesizedWire;
use kactus_common::Vlnv;
use kactus_model::Direction;
use serde::{Deserialize, Serialize};

/// A `name = value` parameter declaration or override.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ParameterDecl {
    /// The display name.
    pub name: String,
    /// The value expression.
    pub value: String,
}

impl ParameterDecl {
    /// Creates a declaration.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A port declaration in the module header.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortDecl {
    /// The port name.
    pub name: String,
    /// The port direction. Never [`Direction::Phantom`].
    pub direction: Direction,
    /// The declared range.
    pub bounds: Bounds,
}

/// Ports grouped under the interface that owns them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortGroup {
    /// The owning interface, or `None` for ports in no interface.
    pub interface: Option<String>,
    /// Ports sorted inputs first, then outputs, then inouts, each by name.
    pub ports: Vec<PortDecl>,
}

/// What drives or receives one pin of an instance.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PinConnection {
    /// Nothing is connected, rendered `()`.
    Unconnected,
    /// Explicitly left open, rendered `( )`.
    Open,
    /// Driven by a constant expression.
    Tie(String),
    /// Connected to a slice of a synthesized wire.
    Wire {
        /// The wire name.
        name: String,
        /// The slice of the wire; empty for a scalar wire.
        bounds: Bounds,
    },
    /// Connected directly to a port of the enclosing module.
    TopPort {
        /// The top-level port name.
        name: String,
        /// The slice of the port; empty for a scalar port.
        bounds: Bounds,
    },
}

/// One pin of an instance and its connection.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PinDecl {
    /// The port name on the instantiated module.
    pub port: String,
    /// The connection.
    pub connection: PinConnection,
}

/// Pins grouped under the interface that owns them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PinGroup {
    /// The owning interface, or `None` for ports in no interface.
    pub interface: Option<String>,
    /// Pins in the same order as the instantiated module's port list.
    pub pins: Vec<PinDecl>,
}

/// An instantiation of a submodule.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InstanceBlock {
    /// The instance name.
    pub name: String,
    /// The instantiated module name.
    pub module_name: String,
    /// The instantiated component.
    pub vlnv: Vlnv,
    /// The instance description.
    pub description: String,
    /// Effective parameter values in resolved order.
    pub parameters: Vec<ParameterDecl>,
    /// Pin connections grouped by interface.
    pub pin_groups: Vec<PinGroup>,
}

impl InstanceBlock {
    /// Looks up the connection of a pin by port name.
    pub fn pin(&self, port: &str) -> Option<&PinConnection> {
        self.pin_groups
            .iter()
            .flat_map(|g| g.pins.iter())
            .find(|p| p.port == port)
            .map(|p| &p.connection)
    }
}

/// A continuous assignment driving a top-level port with a constant.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TieAssignment {
    /// The driven top-level port, with part select if any.
    pub port: String,
    /// The driving expression.
    pub value: String,
}

/// Everything needed to emit one HDL module.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedModule {
    /// The module name.
    pub name: String,
    /// The originating component.
    pub vlnv: Vlnv,
    /// The component description.
    pub description: String,
    /// Parameter declarations in resolved order.
    pub parameters: Vec<ParameterDecl>,
    /// Port declarations grouped by owning interface.
    pub port_groups: Vec<PortGroup>,
    /// Synthesized wires in first-appearance order.
    pub wires: Arena<WireId, SynthesizedWire>,
    /// Instances in design order.
    pub instances: Vec<InstanceBlock>,
    /// Tie-off assignments sorted by destination port.
    pub tie_offs: Vec<TieAssignment>,
    /// The preserved hand-written body, if any.
    pub implementation: Option<String>,
    /// Text preserved from after `endmodule`, if any.
    pub post_module: Option<String>,
}

impl GeneratedModule {
    /// Creates a module with no contents.
    pub fn new(name: impl Into<String>, vlnv: Vlnv) -> Self {
        Self {
            name: name.into(),
            vlnv,
            description: String::new(),
            parameters: Vec::new(),
            port_groups: Vec::new(),
            wires: Arena::new(),
            instances: Vec::new(),
            tie_offs: Vec::new(),
            implementation: None,
            post_module: None,
        }
    }

    /// Looks up an instance block by name.
    pub fn instance(&self, name: &str) -> Option<&InstanceBlock> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// Looks up a wire by name.
    pub fn wire(&self, name: &str) -> Option<&SynthesizedWire> {
        self.wires.values().find(|w| w.name == name)
    }

    /// Iterates over all port declarations in emission order.
    pub fn ports(&self) -> impl Iterator<Item = &PortDecl> {
        self.port_groups.iter().flat_map(|g| g.ports.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_lookup_across_groups() {
        let block = InstanceBlock {
            name: "receiver".to_string(),
            module_name: "TestReceiver".to_string(),
            vlnv: Vlnv::new("Test", "TestLibrary", "TestReceiver", "1.0"),
            description: String::new(),
            parameters: Vec::new(),
            pin_groups: vec![
                PinGroup {
                    interface: Some("data_bus".to_string()),
                    pins: vec![PinDecl {
                        port: "data_in".to_string(),
                        connection: PinConnection::Wire {
                            name: "sender_to_receiver_DATA".to_string(),
                            bounds: Bounds::new("7", "0"),
                        },
                    }],
                },
                PinGroup {
                    interface: None,
                    pins: vec![PinDecl {
                        port: "zeroTieOff".to_string(),
                        connection: PinConnection::Tie("0".to_string()),
                    }],
                },
            ],
        };
        assert_eq!(block.pin("zeroTieOff"), Some(&PinConnection::Tie("0".to_string())));
        assert!(matches!(block.pin("data_in"), Some(PinConnection::Wire { .. })));
        assert!(block.pin("clk").is_none());
    }

    #[test]
    fn new_module_is_empty() {
        let module = GeneratedModule::new("TestComponent", Vlnv::new("a", "b", "c", "1"));
        assert!(module.wires.is_empty());
        assert_eq!(module.ports().count(), 0);
        assert!(module.wire("x").is_none());
        assert!(module.instance("x").is_none());
    }
}
