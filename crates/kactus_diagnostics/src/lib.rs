//! Diagnostic creation, severity management, and rendering.
//!
//! Recoverable model problems found during elaboration (parameter cycles,
//! unknown instances, unmapped signals) never abort generation. They are
//! reported as structured [`Diagnostic`] messages with stable codes and an
//! [`ElementPath`](kactus_common::ElementPath) locating the offending element.
//! The thread-safe [`DiagnosticSink`] accumulates them during a run and
//! [`DiagnosticRenderer`] implementations format them for a terminal or as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
