//! Shared foundational types used across the Kactus2 HDL generation crates.
//!
//! This crate provides the IP-XACT [`Vlnv`] identity, [`ElementPath`] locations
//! used to point diagnostics at model elements, and the common result types.

#![warn(missing_docs)]

pub mod path;
pub mod result;
pub mod vlnv;

pub use path::{ElementKind, ElementPath};
pub use result::{InternalError, KactusResult};
pub use vlnv::{ParseVlnvError, Vlnv};
