//! Locations of elements inside the IP-XACT model.
//!
//! The generator never sees source text, so diagnostics point at model
//! elements instead of byte spans. An [`ElementPath`] is a chain of
//! `(kind, name)` segments from the owning document down to the element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a model element named in an [`ElementPath`] segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ElementKind {
    /// A component document.
    Component,
    /// A design document.
    Design,
    /// A parameter or module parameter.
    Parameter,
    /// A physical port.
    Port,
    /// A bus interface.
    BusInterface,
    /// A component instance inside a design.
    Instance,
    /// An interconnection between bus interfaces.
    Interconnection,
    /// An ad-hoc connection between ports.
    AdHocConnection,
    /// A logical signal of an abstraction definition.
    LogicalPort,
}

impl ElementKind {
    /// Returns the lowercase label used when displaying a path.
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Component => "component",
            ElementKind::Design => "design",
            ElementKind::Parameter => "parameter",
            ElementKind::Port => "port",
            ElementKind::BusInterface => "bus interface",
            ElementKind::Instance => "instance",
            ElementKind::Interconnection => "interconnection",
            ElementKind::AdHocConnection => "ad-hoc connection",
            ElementKind::LogicalPort => "logical port",
        }
    }
}

/// A path of named segments locating an element in the model.
///
/// The empty path is used when no location is available, in the same way a
/// dummy span would be.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct ElementPath {
    segments: Vec<(ElementKind, String)>,
}

impl ElementPath {
    /// The empty path, used when no location is available.
    pub const UNKNOWN: ElementPath = ElementPath {
        segments: Vec::new(),
    };

    /// Creates a path with a single root segment.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            segments: vec![(kind, name.into())],
        }
    }

    /// Returns a new path extended by one child segment.
    pub fn child(&self, kind: ElementKind, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push((kind, name.into()));
        Self { segments }
    }

    /// Returns the segments from root to leaf.
    pub fn segments(&self) -> &[(ElementKind, String)] {
        &self.segments
    }

    /// Returns the innermost segment, if any.
    pub fn leaf(&self) -> Option<&(ElementKind, String)> {
        self.segments.last()
    }

    /// Returns `true` if this is the empty path.
    pub fn is_unknown(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<unknown>");
        }
        for (i, (kind, name)) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{} `{}`", kind.label(), name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_extends_without_mutating_parent() {
        let root = ElementPath::new(ElementKind::Design, "Test:TestLibrary:TestDesign:1.0");
        let inst = root.child(ElementKind::Instance, "sender");
        assert_eq!(root.segments().len(), 1);
        assert_eq!(inst.segments().len(), 2);
        assert_eq!(
            inst.leaf(),
            Some(&(ElementKind::Instance, "sender".to_string()))
        );
    }

    #[test]
    fn display_nested() {
        let path = ElementPath::new(ElementKind::Component, "TestSender")
            .child(ElementKind::Parameter, "width");
        assert_eq!(
            path.to_string(),
            "component `TestSender` > parameter `width`"
        );
    }

    #[test]
    fn unknown_path() {
        assert!(ElementPath::UNKNOWN.is_unknown());
        assert_eq!(ElementPath::default(), ElementPath::UNKNOWN);
        assert_eq!(ElementPath::UNKNOWN.to_string(), "<unknown>");
        assert!(!ElementPath::new(ElementKind::Port, "clk").is_unknown());
    }

    #[test]
    fn serde_roundtrip() {
        let path = ElementPath::new(ElementKind::Design, "d")
            .child(ElementKind::AdHocConnection, "enableAdHoc");
        let json = serde_json::to_string(&path).unwrap();
        let back: ElementPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
