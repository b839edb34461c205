//! Mapping of physical ports onto logical bus signals.
//!
//! For every port map of every bus interface the mapper derives two ranges:
//! the physical bits taken from the port (part select, else the whole port)
//! and the logical bits they carry (explicit logical range, else the width the
//! abstraction definition declares for the interface mode, else the physical
//! range shifted down to bit 0).

use kactus_common::{ElementKind, ElementPath};
use kactus_ir::{Bounds, ComponentModel, InterfaceModel, PortModel, SignalMapping};
use kactus_model::{AbstractionDefinition, BusInterface, Component, Direction};
use log::{debug, trace, warn};

use crate::context::ElaborationContext;
use crate::errors;
use crate::expr::{parenthesize, Substitutions};
use crate::params::ResolvedScope;

/// Builds the port and interface model of a component.
///
/// Every expression (bounds, part selects, defaults) is rewritten through the
/// scope's substitutions, so the same function serves the component's own
/// module and each of its instances.
pub fn map_component(
    ctx: &ElaborationContext<'_>,
    component: &Component,
    module_name: impl Into<String>,
    scope: ResolvedScope,
    location: &ElementPath,
) -> ComponentModel {
    let subs = &scope.substitutions;
    let mut model = ComponentModel::new(component.vlnv.clone(), module_name);

    for port in &component.ports {
        model.ports.alloc(PortModel {
            name: port.name.clone(),
            direction: port.direction,
            bounds: Bounds::new(subs.apply(&port.left_bound), subs.apply(&port.right_bound)),
            default_value: subs.apply(&port.default_value),
            default_tie_required: port.default_tie_required,
            owner: None,
        });
    }

    for bus in &component.bus_interfaces {
        let interface = map_interface(ctx, &mut model, bus, subs, location);
        model.interfaces.push(interface);
    }

    model.parameters = scope.parameters;
    model.parameter_order = scope.order;

    debug!(
        "mapped {} port(s) and {} interface(s) of {}",
        model.ports.len(),
        model.interfaces.len(),
        location
    );
    model
}

fn map_interface(
    ctx: &ElaborationContext<'_>,
    model: &mut ComponentModel,
    bus: &BusInterface,
    subs: &Substitutions,
    location: &ElementPath,
) -> InterfaceModel {
    let path = location.child(ElementKind::BusInterface, &bus.name);
    let abstraction = lookup_abstraction(ctx, bus, &path);
    let group = bus.system_group.as_deref();
    let mut signals = Vec::with_capacity(bus.port_maps.len());

    for map in &bus.port_maps {
        let Some(port_id) = model.port_id(&map.physical_port) else {
            warn!("{}: no port `{}`", path, map.physical_port);
            ctx.sink.emit(errors::warning_unknown_port(
                &model.module_name,
                &map.physical_port,
                path.clone(),
            ));
            continue;
        };

        let port = &mut model.ports[port_id];
        if port.owner.is_none() {
            port.owner = Some(bus.name.clone());
        }

        let physical = match &map.physical_range {
            Some(range) if !range.is_empty() => {
                Bounds::new(subs.apply(&range.left), subs.apply(&range.right))
            }
            _ => port.bounds.clone(),
        };

        let logical_port = abstraction.and_then(|a| a.logical_port(&map.logical_port));
        let logical_bounds = match &map.logical_range {
            Some(range) if !range.is_empty() => {
                Bounds::new(subs.apply(&range.left), subs.apply(&range.right))
            }
            _ => match logical_port.and_then(|l| l.width_for(bus.mode, group)) {
                Some(width) => width_bounds(ctx, &subs.apply(width)),
                None => normalize(ctx, &physical),
            },
        };

        if let Some(expected) = logical_port.and_then(|l| l.direction_for(bus.mode, group)) {
            if port.direction != expected && port.direction != Direction::Phantom {
                ctx.sink.emit(errors::warning_direction_mismatch(
                    &port.name,
                    &port.direction.to_string(),
                    &expected.to_string(),
                    path.child(ElementKind::Port, &port.name),
                ));
            }
        }

        trace!(
            "{}: {}{} -> {}{}",
            path,
            port.name,
            physical,
            map.logical_port,
            logical_bounds
        );
        signals.push(SignalMapping {
            logical: map.logical_port.clone(),
            port: port_id,
            physical,
            logical_bounds,
        });
    }

    InterfaceModel {
        name: bus.name.clone(),
        mode: bus.mode,
        signals,
    }
}

fn lookup_abstraction<'l>(
    ctx: &ElaborationContext<'l>,
    bus: &BusInterface,
    path: &ElementPath,
) -> Option<&'l AbstractionDefinition> {
    let vlnv = bus.abstraction.as_ref()?;
    let found = ctx.library.abstraction(vlnv);
    if found.is_none() {
        ctx.sink.emit(errors::warning_missing_abstraction(
            &bus.name,
            &vlnv.to_string(),
            path.clone(),
        ));
    }
    found
}

/// Bounds `[width-1:0]` for a width expression.
pub(crate) fn width_bounds(ctx: &ElaborationContext<'_>, width: &str) -> Bounds {
    match ctx.evaluate(width).and_then(|w| w.checked_sub(1)) {
        Some(msb) => Bounds::new(msb.to_string(), "0"),
        None => Bounds::new(format!("{}-1", parenthesize(width)), "0"),
    }
}

/// Shifts a range down so that it starts at bit 0: `[left-right:0]`.
pub(crate) fn normalize(ctx: &ElaborationContext<'_>, physical: &Bounds) -> Bounds {
    if physical.is_empty() {
        return Bounds::default();
    }
    let left = ctx.evaluate(&physical.left);
    let right = ctx.evaluate(&physical.right);
    let span = left
        .zip(right)
        .and_then(|(l, r)| l.checked_sub(r))
        .and_then(i64::checked_abs);
    match (right, span) {
        (Some(0), _) => Bounds::new(physical.left.clone(), "0"),
        (_, Some(span)) => Bounds::new(span.to_string(), "0"),
        _ => Bounds::new(
            format!("({})-({})", physical.left, physical.right),
            "0",
        ),
    }
}
