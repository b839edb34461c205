//! Accumulated connection decisions of one design.
//!
//! Interconnections and ad-hoc connections both record what each pin is bound
//! to in a [`ConnectionPlan`]. A pin carries at most one net: a second,
//! different binding is rejected with `E310` and the first one is kept.

use std::collections::HashMap;

use kactus_common::ElementPath;
use kactus_ir::{
    Arena, Attachment, Bounds, PinConnection, PinRef, SynthesizedWire, TieAssignment, WireId,
};
use log::trace;

use crate::context::ElaborationContext;
use crate::errors;

#[derive(Debug)]
struct Binding {
    connection: PinConnection,
    origin: ElementPath,
}

/// Wires, pin bindings and tie-off assignments of a design.
#[derive(Debug, Default)]
pub struct ConnectionPlan {
    /// Synthesized wires in creation order.
    pub wires: Arena<WireId, SynthesizedWire>,
    /// Continuous assignments to top-level ports.
    pub tie_offs: Vec<TieAssignment>,
    bindings: HashMap<PinRef, Binding>,
}

impl ConnectionPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a pin to a connection.
    ///
    /// Binding the same connection twice is accepted. Returns `false` and
    /// emits `E310` if the pin is already bound to something else.
    pub fn bind(
        &mut self,
        ctx: &ElaborationContext<'_>,
        pin: PinRef,
        connection: PinConnection,
        origin: &ElementPath,
    ) -> bool {
        if let Some(existing) = self.bindings.get(&pin) {
            if existing.connection == connection {
                return true;
            }
            ctx.sink.emit(errors::error_pin_conflict(
                &pin.to_string(),
                &describe(&existing.connection),
                &describe(&connection),
                origin.clone(),
                existing.origin.clone(),
            ));
            return false;
        }
        trace!("bind {} to {}", pin, describe(&connection));
        self.bindings.insert(
            pin,
            Binding {
                connection,
                origin: origin.clone(),
            },
        );
        true
    }

    /// Binds a pin to a slice of a wire under construction and records where
    /// it attaches. Returns `false` if the pin already carries another net.
    pub fn attach(
        &mut self,
        ctx: &ElaborationContext<'_>,
        wire: &mut SynthesizedWire,
        pin: PinRef,
        range: Bounds,
        origin: &ElementPath,
    ) -> bool {
        let connection = PinConnection::Wire {
            name: wire.name.clone(),
            bounds: range.clone(),
        };
        if !self.bind(ctx, pin.clone(), connection, origin) {
            return false;
        }
        if wire.attachment(&pin).is_none() {
            let width = width_of(ctx, &range);
            wire.attachments.push(Attachment { pin, range, width });
        }
        true
    }

    /// Returns the connection a pin is bound to.
    pub fn connection(&self, pin: &PinRef) -> Option<&PinConnection> {
        self.bindings.get(pin).map(|b| &b.connection)
    }

    /// Returns `true` if a wire with the given name exists.
    pub fn has_wire(&self, name: &str) -> bool {
        self.wires.values().any(|w| w.name == name)
    }
}

/// Widens `current` to also cover `candidate`.
///
/// Symbolic bounds cannot be compared, so the first bounds seen are kept
/// unless both sides evaluate to constants.
pub(crate) fn widen(ctx: &ElaborationContext<'_>, current: Bounds, candidate: &Bounds) -> Bounds {
    if candidate.is_empty() {
        return current;
    }
    if current.is_empty() {
        return candidate.clone();
    }
    let values = (
        ctx.evaluate(&current.left),
        ctx.evaluate(&current.right),
        ctx.evaluate(&candidate.left),
        ctx.evaluate(&candidate.right),
    );
    match values {
        (Some(l1), Some(r1), Some(l2), Some(r2)) => {
            Bounds::new(l1.max(l2).to_string(), r1.min(r2).to_string())
        }
        _ => current,
    }
}

/// The number of bits of a range, if it evaluates. A scalar is one bit.
pub(crate) fn width_of(ctx: &ElaborationContext<'_>, range: &Bounds) -> Option<i64> {
    if range.is_empty() {
        return Some(1);
    }
    let left = ctx.evaluate(&range.left)?;
    let right = ctx.evaluate(&range.right)?;
    left.checked_sub(right)?.checked_abs()?.checked_add(1)
}

fn describe(connection: &PinConnection) -> String {
    match connection {
        PinConnection::Unconnected => "nothing".to_string(),
        PinConnection::Open => "open".to_string(),
        PinConnection::Tie(value) => value.clone(),
        PinConnection::Wire { name, bounds } | PinConnection::TopPort { name, bounds } => {
            format!("{name}{bounds}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_config::GeneratorConfig;
    use kactus_diagnostics::DiagnosticSink;
    use kactus_model::MemoryLibrary;

    fn wire(name: &str) -> PinConnection {
        PinConnection::Wire {
            name: name.to_string(),
            bounds: Bounds::new("7", "0"),
        }
    }

    #[test]
    fn first_binding_wins() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let mut plan = ConnectionPlan::new();
        let pin = PinRef::new("receiver", "data_in");

        assert!(plan.bind(&ctx, pin.clone(), wire("a_DATA"), &ElementPath::UNKNOWN));
        assert!(!plan.bind(&ctx, pin.clone(), wire("b_DATA"), &ElementPath::UNKNOWN));
        assert_eq!(plan.connection(&pin), Some(&wire("a_DATA")));
        assert!(sink.contains_code(errors::E310));
    }

    #[test]
    fn identical_binding_is_accepted() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let mut plan = ConnectionPlan::new();
        let pin = PinRef::new("receiver", "data_in");

        assert!(plan.bind(&ctx, pin.clone(), wire("a_DATA"), &ElementPath::UNKNOWN));
        assert!(plan.bind(&ctx, pin, wire("a_DATA"), &ElementPath::UNKNOWN));
        assert!(!sink.has_errors());
    }

    #[test]
    fn tie_conflicts_with_wire() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let mut plan = ConnectionPlan::new();
        let pin = PinRef::new("receiver", "enable_in");

        plan.bind(&ctx, pin.clone(), wire("a_ENABLE"), &ElementPath::UNKNOWN);
        plan.bind(&ctx, pin, PinConnection::Tie("1".to_string()), &ElementPath::UNKNOWN);
        let d = &sink.diagnostics()[0];
        assert!(d.message.contains("a_ENABLE[7:0]"));
        assert!(d.notes[0].contains("`1`"));
    }

    #[test]
    fn has_wire_by_name() {
        let mut plan = ConnectionPlan::new();
        plan.wires
            .alloc(SynthesizedWire::new("x_DATA", Bounds::default()));
        assert!(plan.has_wire("x_DATA"));
        assert!(!plan.has_wire("y_DATA"));
    }

    #[test]
    fn attach_records_width_once() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let mut plan = ConnectionPlan::new();
        let mut wire = SynthesizedWire::new("a_DATA", Bounds::new("7", "0"));
        let pin = PinRef::new("sender", "data_out");

        assert!(plan.attach(&ctx, &mut wire, pin.clone(), Bounds::new("7", "0"), &ElementPath::UNKNOWN));
        assert!(plan.attach(&ctx, &mut wire, pin.clone(), Bounds::new("7", "0"), &ElementPath::UNKNOWN));
        assert_eq!(wire.attachments.len(), 1);
        assert_eq!(wire.attachment(&pin).unwrap().width, Some(8));
    }

    #[test]
    fn widen_constant_and_symbolic() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);

        let wide = widen(&ctx, Bounds::new("3", "0"), &Bounds::new("7", "4"));
        assert_eq!(wide, Bounds::new("7", "0"));
        let adopted = widen(&ctx, Bounds::default(), &Bounds::new("W-1", "0"));
        assert_eq!(adopted, Bounds::new("W-1", "0"));
        let kept = widen(&ctx, Bounds::new("W-1", "0"), &Bounds::new("15", "0"));
        assert_eq!(kept, Bounds::new("W-1", "0"));
        let scalar = widen(&ctx, Bounds::new("1", "0"), &Bounds::default());
        assert_eq!(scalar, Bounds::new("1", "0"));
    }

    #[test]
    fn width_of_ranges() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        assert_eq!(width_of(&ctx, &Bounds::new("7", "0")), Some(8));
        assert_eq!(width_of(&ctx, &Bounds::new("0", "3")), Some(4));
        assert_eq!(width_of(&ctx, &Bounds::default()), Some(1));
        assert_eq!(width_of(&ctx, &Bounds::new("W-1", "0")), None);
    }

    #[test]
    fn width_of_overflowing_range_is_unknown() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let huge = Bounds::new("9223372036854775807", "-1");
        assert_eq!(width_of(&ctx, &huge), None);
        let full = Bounds::new("9223372036854775807", "0");
        assert_eq!(width_of(&ctx, &full), None);
    }
}
