//! Derived models built during one generation run.
//!
//! Elaboration turns the immutable input model into these structures:
//! [`ComponentModel`] (resolved parameters, ports and interface mappings of one
//! component), [`InstanceModel`] (the same, specialised for one instance),
//! [`SynthesizedWire`] (an intermediate net and its attachments) and finally
//! [`GeneratedModule`], which the emitter renders into HDL text.
//!
//! Entities owned by a model live in an [`Arena`] and are referenced by typed
//! ids; everything is discarded once the module has been emitted.

#![warn(missing_docs)]

pub mod arena;
pub mod bounds;
pub mod component_model;
pub mod ids;
pub mod instance;
pub mod module;
pub mod wire;

pub use arena::{Arena, ArenaId};
pub use bounds::Bounds;
pub use component_model::{
    ComponentModel, InterfaceModel, ParameterStatus, PortModel, ResolvedParameter, SignalMapping,
};
pub use ids::{ParamId, PortId, WireId};
pub use instance::InstanceModel;
pub use module::{
    GeneratedModule, InstanceBlock, ParameterDecl, PinConnection, PinDecl, PinGroup, PortDecl,
    PortGroup, TieAssignment,
};
pub use wire::{Attachment, PinRef, SynthesizedWire};
