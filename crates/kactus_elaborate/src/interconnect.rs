//! Wire synthesis for bus-level interconnections.
//!
//! Interconnections are grouped by their source endpoint: one master (or
//! mirrored slave) interface that drives several targets produces one set of
//! wires, named after the group, with one wire per logical signal. A
//! connection to a bus interface of the enclosing component needs no wire:
//! the instance pins connect directly to the top-level ports mapped to the
//! same logical signals.

use indexmap::IndexMap;
use kactus_common::{ElementKind, ElementPath};
use kactus_ir::{Bounds, ComponentModel, InterfaceModel, PinConnection, PinRef, SynthesizedWire};
use kactus_model::{ConnectionEndpoint, Design, Interconnection};
use log::{debug, trace, warn};

use crate::context::ElaborationContext;
use crate::errors;
use crate::plan::{widen, ConnectionPlan};
use crate::registry::InstanceRegistry;

/// An endpoint whose instance and interface were found.
#[derive(Clone, Copy)]
struct Endpoint<'r> {
    /// `None` for a bus interface of the enclosing component.
    instance: Option<&'r str>,
    component: &'r ComponentModel,
    interface: &'r InterfaceModel,
}

impl<'r> Endpoint<'r> {
    fn key(&self) -> (&'r str, &'r str) {
        (self.instance.unwrap_or(""), &self.interface.name)
    }

    fn pins(&self, logical: &str) -> impl Iterator<Item = (PinRef, &'r Bounds, &'r Bounds)> + 'r {
        let component = self.component;
        let instance = self.instance.unwrap_or("");
        self.interface.signal(logical).map(move |signal| {
            let port = &component.ports[signal.port];
            (
                PinRef::new(instance, port.name.as_str()),
                &signal.physical,
                &signal.logical_bounds,
            )
        })
    }
}

/// Interconnections sharing a source endpoint.
struct Group<'r> {
    name: String,
    source: Endpoint<'r>,
    targets: Vec<Endpoint<'r>>,
    location: ElementPath,
}

impl<'r> Group<'r> {
    fn add_target(&mut self, target: Endpoint<'r>) {
        if !self.targets.iter().any(|t| t.key() == target.key()) {
            self.targets.push(target);
        }
    }

    fn members(&self) -> impl Iterator<Item = &Endpoint<'r>> {
        std::iter::once(&self.source).chain(self.targets.iter())
    }

    /// Distinct logical signal names, source first.
    fn logical_names(&self) -> Vec<&'r str> {
        let mut names: Vec<&'r str> = Vec::new();
        for member in self.members() {
            for name in member.interface.logical_names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Binds the pins of every interconnection of the design.
///
/// Endpoints naming an unknown instance or interface are dropped with a
/// warning; a connection left with fewer than two endpoints produces nothing.
pub fn synthesize_interconnections(
    ctx: &ElaborationContext<'_>,
    design: &Design,
    top: &ComponentModel,
    registry: &InstanceRegistry,
    plan: &mut ConnectionPlan,
    location: &ElementPath,
) {
    let mut groups: IndexMap<(&str, &str), Group<'_>> = IndexMap::new();

    for connection in &design.interconnections {
        let path = location.child(ElementKind::Interconnection, &connection.name);
        let endpoints = resolve_endpoints(ctx, connection, top, registry, &path);
        if endpoints.len() < 2 {
            ctx.sink.emit(errors::warning_too_few_endpoints(
                &connection.name,
                endpoints.len(),
                path,
            ));
            continue;
        }

        if let Some(hierarchical) = endpoints.iter().find(|e| e.instance.is_none()) {
            connect_to_top(ctx, hierarchical, &endpoints, plan, &path);
            continue;
        }

        let source_index = choose_source(&endpoints);
        let source = endpoints[source_index];
        let targets = endpoints
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != source_index)
            .map(|(_, e)| *e);

        let group = groups.entry(source.key()).or_insert_with(|| Group {
            name: String::new(),
            source,
            targets: Vec::new(),
            location: path.clone(),
        });
        for target in targets {
            group.add_target(target);
        }
        if group.name.is_empty() {
            group.name = if connection.name.is_empty() {
                let first = group.targets.first().and_then(|t| t.instance).unwrap_or("");
                format!("{}_to_{}", source.instance.unwrap_or(""), first)
            } else {
                connection.name.clone()
            };
        }
    }

    for group in groups.values() {
        synthesize_group(ctx, group, plan);
    }
}

fn resolve_endpoints<'r>(
    ctx: &ElaborationContext<'_>,
    connection: &Interconnection,
    top: &'r ComponentModel,
    registry: &'r InstanceRegistry,
    path: &ElementPath,
) -> Vec<Endpoint<'r>> {
    let mut resolved = Vec::with_capacity(connection.endpoints.len());

    for endpoint in &connection.endpoints {
        let (instance, component) = match endpoint {
            ConnectionEndpoint::Instance { instance, .. } => match registry.lookup(instance) {
                Some(found) => (Some(found.model.name.as_str()), &found.model.model),
                None => {
                    warn!("{}: no instance `{}`", path, instance);
                    ctx.sink
                        .emit(errors::warning_unknown_instance(instance, path.clone()));
                    continue;
                }
            },
            ConnectionEndpoint::Hierarchical { .. } => (None, top),
        };

        let name = endpoint.bus_interface();
        match component.interface(name) {
            Some(interface) => resolved.push(Endpoint {
                instance,
                component,
                interface,
            }),
            None => {
                let owner = instance.unwrap_or(&top.module_name);
                ctx.sink
                    .emit(errors::warning_unknown_interface(owner, name, path.clone()));
            }
        }
    }

    resolved
}

/// Picks the endpoint that names the group.
///
/// A driving mode wins, then the first endpoint with a logical width, then
/// the first endpoint.
fn choose_source(endpoints: &[Endpoint<'_>]) -> usize {
    let ranked = endpoints
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.interface.mode.source_rank().map(|rank| (rank, i)))
        .min();
    if let Some((_, index)) = ranked {
        return index;
    }
    endpoints
        .iter()
        .position(|e| e.interface.signals.iter().any(|s| !s.logical_bounds.is_empty()))
        .unwrap_or(0)
}

/// Connects instance pins straight to the top-level ports that carry the same
/// logical signals.
fn connect_to_top(
    ctx: &ElaborationContext<'_>,
    top: &Endpoint<'_>,
    endpoints: &[Endpoint<'_>],
    plan: &mut ConnectionPlan,
    path: &ElementPath,
) {
    for endpoint in endpoints.iter().filter(|e| e.instance.is_some()) {
        for signal in &endpoint.interface.signals {
            let Some(top_signal) = top.interface.signal(&signal.logical).next() else {
                trace!(
                    "{}: `{}` has no counterpart on `{}`",
                    path,
                    signal.logical,
                    top.interface.name
                );
                continue;
            };
            let pin = PinRef::new(
                endpoint.instance.unwrap_or(""),
                endpoint.component.ports[signal.port].name.as_str(),
            );
            let connection = PinConnection::TopPort {
                name: top.component.ports[top_signal.port].name.clone(),
                bounds: top_signal.physical.clone(),
            };
            plan.bind(ctx, pin, connection, path);
        }
    }
}

fn synthesize_group(ctx: &ElaborationContext<'_>, group: &Group<'_>, plan: &mut ConnectionPlan) {
    for logical in group.logical_names() {
        let mut pins: Vec<(PinRef, &Bounds)> = Vec::new();
        for member in group.members() {
            for (pin, _, logical_bounds) in member.pins(logical) {
                pins.push((pin, logical_bounds));
            }
        }

        let mut distinct: Vec<&PinRef> = pins.iter().map(|(p, _)| p).collect();
        distinct.sort();
        distinct.dedup();
        if distinct.len() < 2 {
            trace!("{}: `{}` has a single pin", group.name, logical);
            continue;
        }

        let bounds = pins
            .iter()
            .fold(Bounds::default(), |acc, (_, b)| widen(ctx, acc, b));
        let mut wire = SynthesizedWire::new(format!("{}_{}", group.name, logical), bounds);

        for (pin, logical_bounds) in pins {
            plan.attach(ctx, &mut wire, pin, logical_bounds.clone(), &group.location);
        }

        if wire.attachments.is_empty() {
            continue;
        }
        debug!(
            "wire {}{} with {} pin(s)",
            wire.name,
            wire.bounds,
            wire.attachments.len()
        );
        plan.wires.alloc(wire);
    }
}
