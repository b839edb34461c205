//! Immutable IP-XACT input model consumed by the generation core.
//!
//! These types mirror the subset of IP-XACT the generator reads: components
//! with their parameters, ports, bus interfaces and views; designs with their
//! instances and connections; and abstraction definitions describing logical
//! bus signals. Documents are looked up through the [`Library`] trait.
//!
//! The model is already validated by the time it reaches the generator and is
//! never mutated by it.

#![warn(missing_docs)]

pub mod abstraction;
pub mod bus;
pub mod component;
pub mod design;
pub mod library;
pub mod parameter;
pub mod port;

pub use abstraction::{AbstractionDefinition, LogicalPort, SystemConstraint, WireConstraint};
pub use bus::{BusInterface, InterfaceMode, PortMap, Range};
pub use component::{Component, ComponentInstantiation, View};
pub use design::{
    AdHocConnection, ComponentInstance, ConnectionEndpoint, Design, ExternalPortReference,
    Interconnection, ParameterOverride, PortReference,
};
pub use library::{Library, MemoryLibrary};
pub use parameter::{Parameter, ResolveMode};
pub use port::{Direction, Port};
