//! Elaboration of the component a module is generated for.

use kactus_common::{ElementKind, ElementPath};
use kactus_ir::ComponentModel;
use kactus_model::{Component, ComponentInstantiation};

use crate::context::ElaborationContext;
use crate::expr::Substitutions;
use crate::params::{resolve_parameters, ParameterInput, RewriteMode};
use crate::ports::map_component;

/// Returns the module name of a component under the given instantiation.
pub(crate) fn module_name(component: &Component, instantiation: Option<&ComponentInstantiation>) -> String {
    instantiation
        .and_then(|i| i.module_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| component.vlnv.name.clone())
}

/// Lists the parameters of a component in declaration order: component
/// parameters first, then the module parameters of the instantiation.
pub(crate) fn parameter_inputs<'m>(
    component: &'m Component,
    instantiation: Option<&'m ComponentInstantiation>,
) -> Vec<ParameterInput<'m>> {
    component
        .parameters
        .iter()
        .chain(instantiation.into_iter().flat_map(|i| i.module_parameters.iter()))
        .map(ParameterInput::from_parameter)
        .collect()
}

/// Elaborates a component for its own module declaration.
///
/// Parameter references become display names. The view selects the component
/// instantiation whose module parameters and module name apply.
pub fn elaborate_component_model(
    ctx: &ElaborationContext<'_>,
    component: &Component,
    view: Option<&str>,
) -> ComponentModel {
    let location = ElementPath::new(ElementKind::Component, component.vlnv.to_string());
    let instantiation = component.active_instantiation(view);
    let inputs = parameter_inputs(component, instantiation);
    let scope = resolve_parameters(
        ctx,
        &inputs,
        &Substitutions::new(),
        RewriteMode::Names,
        &location,
    );
    map_component(
        ctx,
        component,
        module_name(component, instantiation),
        scope,
        &location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_common::Vlnv;
    use kactus_config::GeneratorConfig;
    use kactus_diagnostics::DiagnosticSink;
    use kactus_model::{MemoryLibrary, Parameter, View};

    fn component() -> Component {
        let mut c = Component::new(Vlnv::new("Test", "TestLibrary", "TestComponent", "1.0"));
        c.parameters.push(Parameter::new("uuid_a", "componentParameter", "uuid_m+1"));
        c.instantiations.push(ComponentInstantiation {
            name: "rtl".to_string(),
            module_name: Some("test_rtl".to_string()),
            module_parameters: vec![Parameter::new("uuid_m", "moduleParameter", "2")],
        });
        c.instantiations.push(ComponentInstantiation {
            name: "plain".to_string(),
            module_name: None,
            module_parameters: Vec::new(),
        });
        c.views.push(View {
            name: "rtl".to_string(),
            component_instantiation: Some("rtl".to_string()),
        });
        c.views.push(View {
            name: "plain".to_string(),
            component_instantiation: Some("plain".to_string()),
        });
        c
    }

    #[test]
    fn view_selects_module_name_and_parameters() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let model = elaborate_component_model(&ctx, &component(), Some("rtl"));
        assert_eq!(model.module_name, "test_rtl");
        let params: Vec<_> = model
            .ordered_parameters()
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![("moduleParameter", "2"), ("componentParameter", "moduleParameter+1")]
        );
    }

    #[test]
    fn module_name_defaults_to_component_name() {
        let lib = MemoryLibrary::new();
        let sink = DiagnosticSink::new();
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, &sink, &config);
        let model = elaborate_component_model(&ctx, &component(), Some("plain"));
        assert_eq!(model.module_name, "TestComponent");
        // The module parameter is out of scope, so the reference is unresolved.
        assert!(sink.contains_code(crate::errors::E301));
    }
}
