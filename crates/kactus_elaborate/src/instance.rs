//! Instance-specific elaboration of component instances.
//!
//! An instance sees the parameters of its component with overrides applied.
//! Overrides are written in the scope of the instantiating component, so they
//! are rewritten to that component's display names; every other reference to
//! a sibling parameter is replaced by the sibling's effective value. The
//! resulting substitutions then rewrite the port bounds and logical ranges.

use kactus_common::ElementPath;
use kactus_ir::InstanceModel;
use kactus_model::ComponentInstance;
use log::{debug, warn};

use crate::component::{module_name, parameter_inputs};
use crate::context::ElaborationContext;
use crate::errors;
use crate::expr::Substitutions;
use crate::params::{resolve_parameters, RewriteMode};
use crate::ports::map_component;

/// An elaborated instance and the substitutions of its scope.
#[derive(Debug)]
pub struct ElaboratedInstance {
    /// The instance-specific model.
    pub model: InstanceModel,
    /// Rewrites ids of the instance's component and of the top scope.
    pub substitutions: Substitutions,
}

/// Elaborates one component instance.
///
/// `top_names` maps the ids of the instantiating component to its display
/// names. Returns `None` if the instantiated component is not in the library.
pub fn elaborate_instance(
    ctx: &ElaborationContext<'_>,
    instance: &ComponentInstance,
    top_names: &Substitutions,
    location: &ElementPath,
) -> Option<ElaboratedInstance> {
    let Some(component) = ctx.library.component(&instance.component) else {
        warn!("{}: component {} not found", location, instance.component);
        ctx.sink.emit(errors::warning_unknown_component(
            &instance.name,
            &instance.component.to_string(),
            location.clone(),
        ));
        return None;
    };

    let instantiation = component.active_instantiation(instance.active_view.as_deref());
    let mut inputs = parameter_inputs(component, instantiation);
    for input in &mut inputs {
        if let Some(found) = instance
            .overrides
            .iter()
            .find(|o| o.parameter_id == input.id)
        {
            input.expr = found.value.clone();
            input.overridden = true;
        }
    }

    let scope = resolve_parameters(ctx, &inputs, top_names, RewriteMode::Values, location);
    let substitutions = scope.substitutions.clone();
    let model = map_component(
        ctx,
        component,
        module_name(component, instantiation),
        scope,
        location,
    );
    debug!("elaborated instance {} of {}", instance.name, model.vlnv);

    Some(ElaboratedInstance {
        model: InstanceModel {
            name: instance.name.clone(),
            description: instance.description.clone(),
            model,
        },
        substitutions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_common::{ElementKind, Vlnv};
    use kactus_config::GeneratorConfig;
    use kactus_diagnostics::DiagnosticSink;
    use kactus_ir::Bounds;
    use kactus_model::{Component, Direction, MemoryLibrary, Parameter, Port};

    fn sender_vlnv() -> Vlnv {
        Vlnv::new("Test", "TestLibrary", "TestSender", "1.0")
    }

    fn library() -> MemoryLibrary {
        let mut sender = Component::new(sender_vlnv());
        sender.parameters.push(Parameter::new("uuid_sid", "senderID", "1"));
        sender.parameters.push(Parameter::new("uuid_x", "scaledID", "7*uuid_sid"));
        sender.parameters.push(Parameter::new("uuid_w", "WIDTH", "8"));
        sender
            .ports
            .push(Port::new("data_out", Direction::Out, "uuid_w-1", "0"));
        let mut lib = MemoryLibrary::new();
        lib.add_component(sender);
        lib
    }

    fn elaborate(instance: &ComponentInstance, sink: &DiagnosticSink) -> Option<ElaboratedInstance> {
        let lib = library();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, sink, &config);
        let mut top_names = Substitutions::new();
        top_names.insert("uuid_top", "topParameter");
        let location = ElementPath::new(ElementKind::Instance, instance.name.clone());
        elaborate_instance(&ctx, instance, &top_names, &location)
    }

    fn values(elaborated: &ElaboratedInstance) -> Vec<(String, String)> {
        elaborated
            .model
            .model
            .ordered_parameters()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }

    #[test]
    fn defaults_are_substituted() {
        let sink = DiagnosticSink::new();
        let inst = ComponentInstance::new("sender", sender_vlnv());
        let elaborated = elaborate(&inst, &sink).unwrap();
        assert_eq!(
            values(&elaborated),
            vec![
                ("senderID".to_string(), "1".to_string()),
                ("scaledID".to_string(), "7*1".to_string()),
                ("WIDTH".to_string(), "8".to_string()),
            ]
        );
        assert_eq!(
            elaborated.model.port("data_out").unwrap().bounds,
            Bounds::new("8-1", "0")
        );
    }

    #[test]
    fn override_propagates_to_top_names() {
        let sink = DiagnosticSink::new();
        let inst = ComponentInstance::new("sender", sender_vlnv()).with_override("uuid_sid", "uuid_top");
        let elaborated = elaborate(&inst, &sink).unwrap();
        let vals = values(&elaborated);
        assert_eq!(vals[0], ("senderID".to_string(), "topParameter".to_string()));
        assert_eq!(vals[1], ("scaledID".to_string(), "7*topParameter".to_string()));
        assert!(!sink.has_errors());
    }

    #[test]
    fn compound_override_is_parenthesized_in_bounds() {
        let sink = DiagnosticSink::new();
        let inst = ComponentInstance::new("sender", sender_vlnv()).with_override("uuid_w", "uuid_top*2");
        let elaborated = elaborate(&inst, &sink).unwrap();
        assert_eq!(
            elaborated.model.port("data_out").unwrap().bounds,
            Bounds::new("(topParameter*2)-1", "0")
        );
        assert_eq!(elaborated.substitutions.get("uuid_top"), Some("topParameter"));
    }

    #[test]
    fn elaboration_is_idempotent() {
        let sink = DiagnosticSink::new();
        let inst = ComponentInstance::new("sender", sender_vlnv()).with_override("uuid_sid", "uuid_top");
        let first = elaborate(&inst, &sink).unwrap();
        let second = elaborate(&inst, &sink).unwrap();
        assert_eq!(values(&first), values(&second));
    }

    #[test]
    fn unknown_component_is_skipped() {
        let sink = DiagnosticSink::new();
        let inst = ComponentInstance::new("ghost", Vlnv::new("Test", "TestLibrary", "Nothing", "1.0"));
        assert!(elaborate(&inst, &sink).is_none());
        assert!(sink.contains_code(errors::W300));
        assert!(!sink.has_errors());
    }
}
