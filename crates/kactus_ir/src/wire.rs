//! Intermediate wires synthesized from connections.

use crate::bounds::Bounds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pin: one port of one instance.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct PinRef {
    /// The instance name.
    pub instance: String,
    /// The port name.
    pub port: String,
}

impl PinRef {
    /// Creates a pin reference.
    pub fn new(instance: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.instance, self.port)
    }
}

/// Where a pin attaches on a wire.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Attachment {
    /// The attached pin.
    pub pin: PinRef,
    /// The slice of the wire the pin connects to.
    pub range: Bounds,
    /// The number of bits, when the range evaluates to constants.
    pub width: Option<i64>,
}

impl Attachment {
    /// Returns the bit offset of the attachment, its right bound.
    pub fn offset(&self) -> &str {
        &self.range.right
    }
}

/// An intermediate net declared inside the generated module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SynthesizedWire {
    /// The wire name.
    pub name: String,
    /// The widest range among the attached pins.
    pub bounds: Bounds,
    /// Attachments in connection order.
    pub attachments: Vec<Attachment>,
}

impl SynthesizedWire {
    /// Creates a wire with no attachments.
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
            attachments: Vec::new(),
        }
    }

    /// Returns the attachment of the given pin, if any.
    pub fn attachment(&self, pin: &PinRef) -> Option<&Attachment> {
        self.attachments.iter().find(|a| &a.pin == pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_offset_is_right_bound() {
        let a = Attachment {
            pin: PinRef::new("receiver", "data_in"),
            range: Bounds::new("3", "0"),
            width: Some(4),
        };
        assert_eq!(a.offset(), "0");
    }

    #[test]
    fn pin_display() {
        assert_eq!(PinRef::new("sender", "data_out").to_string(), "sender.data_out");
    }

    #[test]
    fn find_attachment() {
        let mut wire = SynthesizedWire::new("sender_to_receiver_DATA", Bounds::new("7", "0"));
        wire.attachments.push(Attachment {
            pin: PinRef::new("sender", "data_out"),
            range: Bounds::new("7", "0"),
            width: Some(8),
        });
        assert!(wire.attachment(&PinRef::new("sender", "data_out")).is_some());
        assert!(wire.attachment(&PinRef::new("receiver", "data_in")).is_none());
    }
}
