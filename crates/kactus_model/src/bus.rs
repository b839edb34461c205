//! Bus interfaces and their logical-to-physical port maps.

use kactus_common::Vlnv;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a bus interface plays on its bus.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterfaceMode {
    /// Initiator side.
    Master,
    /// Target side.
    Slave,
    /// System signals such as clocks and resets.
    System,
    /// The master side seen from inside a bridge or hierarchy.
    MirroredMaster,
    /// The slave side seen from inside a bridge or hierarchy.
    MirroredSlave,
    /// Mirrored system signals.
    MirroredSystem,
    /// A passive observer.
    Monitor,
}

impl InterfaceMode {
    /// Rank used when choosing the width-defining endpoint of a connection.
    ///
    /// Lower ranks win. Modes that never define width return `None`.
    pub fn source_rank(self) -> Option<u8> {
        match self {
            InterfaceMode::Master => Some(0),
            InterfaceMode::MirroredMaster => Some(1),
            InterfaceMode::MirroredSlave => Some(2),
            _ => None,
        }
    }

    /// Returns `true` for the mirrored modes.
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            InterfaceMode::MirroredMaster
                | InterfaceMode::MirroredSlave
                | InterfaceMode::MirroredSystem
        )
    }
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterfaceMode::Master => "master",
            InterfaceMode::Slave => "slave",
            InterfaceMode::System => "system",
            InterfaceMode::MirroredMaster => "mirroredMaster",
            InterfaceMode::MirroredSlave => "mirroredSlave",
            InterfaceMode::MirroredSystem => "mirroredSystem",
            InterfaceMode::Monitor => "monitor",
        };
        f.write_str(s)
    }
}

/// A `[left:right]` bit range given as two expressions.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Range {
    /// The left (usually most significant) bound.
    pub left: String,
    /// The right bound.
    pub right: String,
}

impl Range {
    /// Creates a range from two bound expressions.
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
}

/// Association of one logical bus signal with one physical port.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PortMap {
    /// Name of the logical signal in the abstraction definition.
    pub logical_port: String,
    /// Optional slice of the logical signal.
    #[serde(default)]
    pub logical_range: Option<Range>,
    /// Name of the physical port on the component.
    pub physical_port: String,
    /// Optional part select of the physical port.
    #[serde(default)]
    pub physical_range: Option<Range>,
}

impl PortMap {
    /// Maps a whole physical port to a whole logical signal.
    pub fn new(logical_port: impl Into<String>, physical_port: impl Into<String>) -> Self {
        Self {
            logical_port: logical_port.into(),
            logical_range: None,
            physical_port: physical_port.into(),
            physical_range: None,
        }
    }

    /// Returns this map with an explicit logical range.
    pub fn with_logical_range(mut self, range: Range) -> Self {
        self.logical_range = Some(range);
        self
    }

    /// Returns this map with a physical part select.
    pub fn with_physical_range(mut self, range: Range) -> Self {
        self.physical_range = Some(range);
        self
    }
}

/// A bus interface of a component.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BusInterface {
    /// The interface name.
    pub name: String,
    /// The interface mode.
    pub mode: InterfaceMode,
    /// The system group for `system` and `mirroredSystem` modes.
    #[serde(default)]
    pub system_group: Option<String>,
    /// Reference to the abstraction definition describing the logical signals.
    #[serde(default)]
    pub abstraction: Option<Vlnv>,
    /// Logical-to-physical port maps.
    #[serde(default)]
    pub port_maps: Vec<PortMap>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl BusInterface {
    /// Creates an interface with no port maps and no abstraction reference.
    pub fn new(name: impl Into<String>, mode: InterfaceMode) -> Self {
        Self {
            name: name.into(),
            mode,
            system_group: None,
            abstraction: None,
            port_maps: Vec::new(),
            description: String::new(),
        }
    }

    /// Returns this interface referencing the given abstraction definition.
    pub fn with_abstraction(mut self, vlnv: Vlnv) -> Self {
        self.abstraction = Some(vlnv);
        self
    }

    /// Returns this interface with an added port map.
    pub fn with_port_map(mut self, map: PortMap) -> Self {
        self.port_maps.push(map);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_rank_precedence() {
        assert!(InterfaceMode::Master.source_rank() < InterfaceMode::MirroredMaster.source_rank());
        assert!(
            InterfaceMode::MirroredMaster.source_rank() < InterfaceMode::MirroredSlave.source_rank()
        );
        assert_eq!(InterfaceMode::Slave.source_rank(), None);
        assert_eq!(InterfaceMode::System.source_rank(), None);
    }

    #[test]
    fn mode_serde_is_camel_case() {
        let mode: InterfaceMode = serde_json::from_str("\"mirroredSlave\"").unwrap();
        assert_eq!(mode, InterfaceMode::MirroredSlave);
        assert_eq!(mode.to_string(), "mirroredSlave");
    }

    #[test]
    fn empty_range() {
        assert!(Range::default().is_empty());
        assert!(!Range::new("7", "0").is_empty());
    }

    #[test]
    fn builder_collects_port_maps() {
        let bus = BusInterface::new("data_bus", InterfaceMode::Master)
            .with_port_map(PortMap::new("DATA", "data_out"))
            .with_port_map(PortMap::new("ENABLE", "enable_out"));
        assert_eq!(bus.port_maps.len(), 2);
        assert_eq!(bus.port_maps[1].physical_port, "enable_out");
    }
}
