//! Structured diagnostic messages with severity, codes, labels, and notes.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use kactus_common::ElementPath;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message pointing at a model element.
///
/// Each diagnostic includes:
/// - A severity level and unique code
/// - A primary message and the [`ElementPath`] of the element at fault
/// - Optional secondary labels, notes, and help text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The element where the issue was detected.
    pub location: ElementPath,
    /// Additional labelled elements providing context.
    pub labels: Vec<Label>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic with the given code, message, and location.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, location: ElementPath) -> Self {
        Self::with_severity(Severity::Error, code, message, location)
    }

    /// Creates a new warning diagnostic with the given code, message, and location.
    pub fn warning(
        code: DiagnosticCode,
        message: impl Into<String>,
        location: ElementPath,
    ) -> Self {
        Self::with_severity(Severity::Warning, code, message, location)
    }

    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        location: ElementPath,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            location,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
