//! Ad-hoc connections: port-level nets and tie-offs.
//!
//! An ad-hoc connection with a tie-off value drives every referenced port
//! with that value. Without one, the referenced instance pins are joined
//! either to the first referenced top-level port or, when no top-level port
//! takes part, to a wire named after the connection.

use kactus_common::{ElementKind, ElementPath};
use kactus_ir::{Bounds, ComponentModel, PinConnection, PinRef, PortModel, SynthesizedWire, TieAssignment};
use kactus_model::{AdHocConnection, Design, Range};
use log::{debug, trace, warn};

use crate::context::ElaborationContext;
use crate::errors;
use crate::expr::Substitutions;
use crate::instance::ElaboratedInstance;
use crate::plan::{widen, ConnectionPlan};
use crate::registry::InstanceRegistry;
use crate::tieoff::{tie_instance_pin, tie_top_port, PinTie, PortTie, TiePolicy};

struct InternalPin<'r> {
    pin: PinRef,
    port: &'r PortModel,
    instance: &'r ElaboratedInstance,
    physical: Bounds,
}

struct ExternalPort<'r> {
    port: &'r PortModel,
    part_select: Option<Bounds>,
}

impl ExternalPort<'_> {
    fn bounds(&self) -> Bounds {
        self.part_select
            .clone()
            .unwrap_or_else(|| self.port.bounds.clone())
    }
}

fn select(range: Option<&Range>, subs: &Substitutions) -> Option<Bounds> {
    range
        .filter(|r| !r.is_empty())
        .map(|r| Bounds::new(subs.apply(&r.left), subs.apply(&r.right)))
}

/// Binds the pins and collects the tie-offs of every ad-hoc connection.
///
/// `top_names` rewrites ids of the enclosing component, the scope in which
/// tie-off values and top-level part selects are written.
pub fn synthesize_ad_hoc(
    ctx: &ElaborationContext<'_>,
    design: &Design,
    top: &ComponentModel,
    top_names: &Substitutions,
    registry: &InstanceRegistry,
    plan: &mut ConnectionPlan,
    location: &ElementPath,
) {
    for connection in &design.ad_hoc_connections {
        let path = location.child(ElementKind::AdHocConnection, &connection.name);
        let internal = resolve_internal(ctx, connection, registry, &path);
        let external = resolve_external(ctx, connection, top, top_names, &path);

        if internal.is_empty() && external.is_empty() {
            debug!("{}: nothing left to connect", path);
            continue;
        }

        match TiePolicy::parse(&connection.tie_off) {
            Some(policy) => tie_off(ctx, &policy, &internal, &external, top_names, plan, &path),
            None if !external.is_empty() => connect_to_top(ctx, &internal, &external, plan, &path),
            None if internal.len() >= 2 => connect_by_wire(ctx, connection, &internal, plan, &path),
            None => {
                ctx.sink
                    .emit(errors::warning_adhoc_needs_ports(&connection.name, path));
            }
        }
    }
}

fn resolve_internal<'r>(
    ctx: &ElaborationContext<'_>,
    connection: &AdHocConnection,
    registry: &'r InstanceRegistry,
    path: &ElementPath,
) -> Vec<InternalPin<'r>> {
    let mut pins = Vec::with_capacity(connection.internal.len());
    for reference in &connection.internal {
        let Some(instance) = registry.lookup(&reference.instance) else {
            warn!("{}: no instance `{}`", path, reference.instance);
            ctx.sink.emit(errors::warning_unknown_instance(
                &reference.instance,
                path.clone(),
            ));
            continue;
        };
        let Some(port) = instance.model.port(&reference.port) else {
            ctx.sink.emit(errors::warning_unknown_port(
                &reference.instance,
                &reference.port,
                path.clone(),
            ));
            continue;
        };
        let physical = select(reference.part_select.as_ref(), &instance.substitutions)
            .unwrap_or_else(|| port.bounds.clone());
        pins.push(InternalPin {
            pin: PinRef::new(reference.instance.as_str(), reference.port.as_str()),
            port,
            instance,
            physical,
        });
    }
    pins
}

fn resolve_external<'r>(
    ctx: &ElaborationContext<'_>,
    connection: &AdHocConnection,
    top: &'r ComponentModel,
    top_names: &Substitutions,
    path: &ElementPath,
) -> Vec<ExternalPort<'r>> {
    let mut ports = Vec::with_capacity(connection.external.len());
    for reference in &connection.external {
        match top.port(&reference.port) {
            Some(port) => ports.push(ExternalPort {
                port,
                part_select: select(reference.part_select.as_ref(), top_names),
            }),
            None => ctx.sink.emit(errors::warning_unknown_port(
                &top.module_name,
                &reference.port,
                path.clone(),
            )),
        }
    }
    ports
}

fn tie_off(
    ctx: &ElaborationContext<'_>,
    policy: &TiePolicy,
    internal: &[InternalPin<'_>],
    external: &[ExternalPort<'_>],
    top_names: &Substitutions,
    plan: &mut ConnectionPlan,
    path: &ElementPath,
) {
    for pin in internal {
        let tie = tie_instance_pin(policy, pin.port.direction, &pin.port.default_value, |v| {
            pin.instance.substitutions.apply(v)
        });
        match tie {
            PinTie::Bind(connection) => {
                plan.bind(ctx, pin.pin.clone(), connection, path);
            }
            PinTie::MissingDefault => {
                ctx.sink
                    .emit(errors::warning_missing_default(&pin.pin.to_string(), path.clone()));
            }
        }
    }

    for port in external {
        let tie = tie_top_port(policy, port.port.direction, &port.port.default_value, |v| {
            top_names.apply(v)
        });
        match tie {
            PortTie::Assign(value) => {
                let target = match &port.part_select {
                    Some(bounds) => format!("{}{}", port.port.name, bounds),
                    None => port.port.name.clone(),
                };
                trace!("{}: assign {} = {}", path, target, value);
                plan.tie_offs.push(TieAssignment {
                    port: target,
                    value,
                });
            }
            PortTie::InputPort => {
                ctx.sink
                    .emit(errors::warning_tie_on_input(&port.port.name, path.clone()));
            }
            PortTie::MissingDefault => {
                ctx.sink
                    .emit(errors::warning_missing_default(&port.port.name, path.clone()));
            }
            PortTie::Omit => {}
        }
    }
}

fn connect_to_top(
    ctx: &ElaborationContext<'_>,
    internal: &[InternalPin<'_>],
    external: &[ExternalPort<'_>],
    plan: &mut ConnectionPlan,
    path: &ElementPath,
) {
    let Some(first) = external.first() else {
        return;
    };
    if external.len() > 1 {
        debug!(
            "{}: {} top-level port(s) after `{}` are not joined",
            path,
            external.len() - 1,
            first.port.name
        );
    }
    let connection = PinConnection::TopPort {
        name: first.port.name.clone(),
        bounds: first.bounds(),
    };
    for pin in internal {
        plan.bind(ctx, pin.pin.clone(), connection.clone(), path);
    }
}

fn connect_by_wire(
    ctx: &ElaborationContext<'_>,
    connection: &AdHocConnection,
    internal: &[InternalPin<'_>],
    plan: &mut ConnectionPlan,
    path: &ElementPath,
) {
    let name = if connection.name.is_empty() {
        format!("{}_{}", internal[0].pin.instance, internal[0].pin.port)
    } else {
        connection.name.clone()
    };
    let bounds = internal
        .iter()
        .fold(Bounds::default(), |acc, pin| widen(ctx, acc, &pin.physical));
    let mut wire = SynthesizedWire::new(name, bounds);

    for pin in internal {
        plan.attach(ctx, &mut wire, pin.pin.clone(), pin.physical.clone(), path);
    }

    if !wire.attachments.is_empty() {
        debug!("ad-hoc wire {}{}", wire.name, wire.bounds);
        plan.wires.alloc(wire);
    }
}
