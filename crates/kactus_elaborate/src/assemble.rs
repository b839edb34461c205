//! Assembly of the emitter-ready module.
//!
//! Ports are grouped under the first bus interface that maps them, in
//! interface declaration order, followed by the ports outside any interface.
//! Within a group, inputs come first, then outputs, then inouts, each sorted
//! by name. Instance pins use the same grouping as the instantiated module.

use indexmap::IndexSet;
use kactus_common::{InternalError, KactusResult};
use kactus_ir::{
    ComponentModel, GeneratedModule, InstanceBlock, InstanceModel, ParameterDecl, PinConnection,
    PinDecl, PinGroup, PinRef, PortDecl, PortGroup, PortModel,
};
use kactus_model::Direction;

use crate::plan::ConnectionPlan;
use crate::registry::InstanceRegistry;

fn direction_rank(direction: Direction) -> u8 {
    match direction {
        Direction::In => 0,
        Direction::Out => 1,
        Direction::InOut => 2,
        Direction::Phantom => 3,
    }
}

/// Groups the non-phantom ports of a model by owning interface.
fn grouped_ports(model: &ComponentModel) -> Vec<(Option<String>, Vec<&PortModel>)> {
    let mut owners: IndexSet<Option<String>> = model
        .interfaces
        .iter()
        .map(|i| Some(i.name.clone()))
        .collect();
    owners.insert(None);

    owners
        .into_iter()
        .filter_map(|owner| {
            let mut ports: Vec<&PortModel> = model
                .ports
                .values()
                .filter(|p| p.owner == owner && p.direction != Direction::Phantom)
                .collect();
            if ports.is_empty() {
                return None;
            }
            ports.sort_by(|a, b| {
                direction_rank(a.direction)
                    .cmp(&direction_rank(b.direction))
                    .then_with(|| a.name.cmp(&b.name))
            });
            Some((owner, ports))
        })
        .collect()
}

/// Builds the port declarations of a module.
pub fn port_groups(model: &ComponentModel) -> Vec<PortGroup> {
    grouped_ports(model)
        .into_iter()
        .map(|(interface, ports)| PortGroup {
            interface,
            ports: ports
                .into_iter()
                .map(|p| PortDecl {
                    name: p.name.clone(),
                    direction: p.direction,
                    bounds: p.bounds.clone(),
                })
                .collect(),
        })
        .collect()
}

/// The declaration of each parameter in resolved order.
pub fn parameter_decls(model: &ComponentModel) -> Vec<ParameterDecl> {
    model
        .ordered_parameters()
        .map(|p| ParameterDecl::new(p.name.clone(), p.value.clone()))
        .collect()
}

/// Builds the instantiation of one instance from the connection plan.
///
/// Pins the plan does not bind are tied to their default value when the port
/// requires it and has one, and left unconnected otherwise.
pub fn instance_block(instance: &InstanceModel, plan: &ConnectionPlan) -> InstanceBlock {
    let pin_groups = grouped_ports(&instance.model)
        .into_iter()
        .map(|(interface, ports)| PinGroup {
            interface,
            pins: ports
                .into_iter()
                .map(|port| PinDecl {
                    port: port.name.clone(),
                    connection: pin_connection(instance, port, plan),
                })
                .collect(),
        })
        .collect();

    InstanceBlock {
        name: instance.name.clone(),
        module_name: instance.model.module_name.clone(),
        vlnv: instance.model.vlnv.clone(),
        description: instance.description.clone(),
        parameters: parameter_decls(&instance.model),
        pin_groups,
    }
}

fn pin_connection(instance: &InstanceModel, port: &PortModel, plan: &ConnectionPlan) -> PinConnection {
    let pin = PinRef::new(instance.name.as_str(), port.name.as_str());
    match plan.connection(&pin) {
        Some(connection) => connection.clone(),
        None if port.default_tie_required && !port.default_value.is_empty() => {
            PinConnection::Tie(port.default_value.clone())
        }
        None => PinConnection::Unconnected,
    }
}

/// Assembles the module of a top component from its elaborated instances and
/// connection plan.
///
/// Fails with an [`InternalError`] if a wire attaches a pin of an instance
/// that was never elaborated.
pub fn assemble_module(
    top: &ComponentModel,
    description: &str,
    registry: &InstanceRegistry,
    plan: ConnectionPlan,
) -> KactusResult<GeneratedModule> {
    for wire in plan.wires.values() {
        for attachment in &wire.attachments {
            if registry.lookup(&attachment.pin.instance).is_none() {
                return Err(InternalError::new(format!(
                    "wire `{}` attaches `{}` of an instance that was not elaborated",
                    wire.name, attachment.pin
                )));
            }
        }
    }

    let mut module = GeneratedModule::new(top.module_name.clone(), top.vlnv.clone());
    module.description = description.to_string();
    module.parameters = parameter_decls(top);
    module.port_groups = port_groups(top);
    module.instances = registry
        .models()
        .map(|instance| instance_block(instance, &plan))
        .collect();

    let mut tie_offs = plan.tie_offs;
    tie_offs.sort_by(|a, b| a.port.cmp(&b.port));
    module.tie_offs = tie_offs;
    module.wires = plan.wires;
    Ok(module)
}
