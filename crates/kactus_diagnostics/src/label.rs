//! Labels that point a diagnostic at related model elements.

use kactus_common::ElementPath;
use serde::{Deserialize, Serialize};

/// Whether a label marks the element at fault or only provides context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The element the diagnostic is about.
    Primary,
    /// A related element, e.g. the first of two conflicting connections.
    Secondary,
}

/// An annotated model element within a diagnostic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// The element this label points at.
    pub path: ElementPath,
    /// The message displayed next to the element.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(path: ElementPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(path: ElementPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_common::ElementKind;

    #[test]
    fn primary_label() {
        let label = Label::primary(ElementPath::new(ElementKind::Port, "clk"), "driven twice");
        assert_eq!(label.style, LabelStyle::Primary);
        assert_eq!(label.message, "driven twice");
    }

    #[test]
    fn secondary_label() {
        let label = Label::secondary(ElementPath::UNKNOWN, "first connected here");
        assert_eq!(label.style, LabelStyle::Secondary);
        assert!(label.path.is_unknown());
    }
}
