//! Abstraction definitions: the logical signals of a bus type.

use crate::bus::InterfaceMode;
use crate::port::Direction;
use kactus_common::Vlnv;
use serde::{Deserialize, Serialize};

/// Direction and width of a logical signal for one interface mode.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct WireConstraint {
    /// The required direction, if constrained.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// The width expression. Empty when unconstrained.
    #[serde(default)]
    pub width: String,
}

impl WireConstraint {
    /// Creates a constraint with both a direction and a width.
    pub fn new(direction: Direction, width: impl Into<String>) -> Self {
        Self {
            direction: Some(direction),
            width: width.into(),
        }
    }
}

/// A system-group constraint of a logical signal.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SystemConstraint {
    /// The system group the constraint applies to.
    pub group: String,
    /// The constraint itself.
    pub constraint: WireConstraint,
}

/// One logical signal of an abstraction definition.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LogicalPort {
    /// The logical signal name.
    pub name: String,
    /// Constraint on master interfaces.
    #[serde(default)]
    pub on_master: Option<WireConstraint>,
    /// Constraint on slave interfaces.
    #[serde(default)]
    pub on_slave: Option<WireConstraint>,
    /// Constraints on system interfaces, per group.
    #[serde(default)]
    pub on_system: Vec<SystemConstraint>,
}

impl LogicalPort {
    /// Creates a logical signal with no constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_master: None,
            on_slave: None,
            on_system: Vec::new(),
        }
    }

    /// Returns this signal with a master-side constraint.
    pub fn with_master(mut self, constraint: WireConstraint) -> Self {
        self.on_master = Some(constraint);
        self
    }

    /// Returns this signal with a slave-side constraint.
    pub fn with_slave(mut self, constraint: WireConstraint) -> Self {
        self.on_slave = Some(constraint);
        self
    }

    /// Returns the declared width for the given mode, if any.
    ///
    /// Mirrored modes share the width of the mode they mirror. Monitors
    /// declare no width.
    pub fn width_for(&self, mode: InterfaceMode, group: Option<&str>) -> Option<&str> {
        self.constraint_for(mode, group)
            .map(|c| c.width.as_str())
            .filter(|w| !w.trim().is_empty())
    }

    /// Returns the required direction for the given mode, if any.
    ///
    /// Mirrored modes see the opposite direction of the mode they mirror.
    pub fn direction_for(&self, mode: InterfaceMode, group: Option<&str>) -> Option<Direction> {
        let direction = self.constraint_for(mode, group)?.direction?;
        Some(if mode.is_mirrored() {
            direction.mirrored()
        } else {
            direction
        })
    }

    fn constraint_for(&self, mode: InterfaceMode, group: Option<&str>) -> Option<&WireConstraint> {
        match mode {
            InterfaceMode::Master | InterfaceMode::MirroredMaster => self.on_master.as_ref(),
            InterfaceMode::Slave | InterfaceMode::MirroredSlave => self.on_slave.as_ref(),
            InterfaceMode::System | InterfaceMode::MirroredSystem => {
                let mut candidates = self.on_system.iter();
                match group {
                    Some(group) => candidates.find(|s| s.group == group),
                    None => candidates.next(),
                }
                .map(|s| &s.constraint)
            }
            InterfaceMode::Monitor => None,
        }
    }
}

/// An abstraction definition: the logical view of a bus type.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AbstractionDefinition {
    /// The identity of this definition.
    pub vlnv: Vlnv,
    /// The logical signals.
    #[serde(default)]
    pub logical_ports: Vec<LogicalPort>,
}

impl AbstractionDefinition {
    /// Creates an empty definition.
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            logical_ports: Vec::new(),
        }
    }

    /// Returns this definition with an added logical signal.
    pub fn with_logical_port(mut self, port: LogicalPort) -> Self {
        self.logical_ports.push(port);
        self
    }

    /// Looks up a logical signal by name.
    pub fn logical_port(&self, name: &str) -> Option<&LogicalPort> {
        self.logical_ports.iter().find(|p| p.name == name)
    }
}
