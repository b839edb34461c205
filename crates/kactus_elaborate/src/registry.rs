//! Registry of the elaborated instances of a design.
//!
//! The [`InstanceRegistry`] elaborates every instance of a design once, in
//! design order, and provides lookup by instance name. Duplicate instance
//! names are reported and only the first instance with a name is kept.

use indexmap::IndexMap;
use kactus_common::{ElementKind, ElementPath};
use kactus_ir::InstanceModel;
use kactus_model::Design;

use crate::context::ElaborationContext;
use crate::errors;
use crate::expr::Substitutions;
use crate::instance::{elaborate_instance, ElaboratedInstance};

/// Elaborated instances by name, in design order.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: IndexMap<String, ElaboratedInstance>,
}

impl InstanceRegistry {
    /// Elaborates every instance of the design.
    ///
    /// Emits `W304` for duplicate instance names and `W300` for instances of
    /// components missing from the library; neither ends up in the registry.
    pub fn build(
        ctx: &ElaborationContext<'_>,
        design: &Design,
        top_names: &Substitutions,
        location: &ElementPath,
    ) -> Self {
        let mut registry = Self::default();
        let mut seen: Vec<&str> = Vec::new();

        for instance in &design.instances {
            let path = location.child(ElementKind::Instance, &instance.name);
            if seen.contains(&instance.name.as_str()) {
                ctx.sink
                    .emit(errors::warning_duplicate_instance(&instance.name, path));
                continue;
            }
            seen.push(&instance.name);

            if let Some(elaborated) = elaborate_instance(ctx, instance, top_names, &path) {
                registry.instances.insert(instance.name.clone(), elaborated);
            }
        }

        registry
    }

    /// Looks up an elaborated instance by name.
    pub fn lookup(&self, name: &str) -> Option<&ElaboratedInstance> {
        self.instances.get(name)
    }

    /// Looks up the model of an instance by name.
    pub fn model(&self, name: &str) -> Option<&InstanceModel> {
        self.lookup(name).map(|e| &e.model)
    }

    /// Iterates over instance models in design order.
    pub fn models(&self) -> impl Iterator<Item = &InstanceModel> {
        self.instances.values().map(|e| &e.model)
    }

    /// Returns the number of elaborated instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if no instance was elaborated.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_common::Vlnv;
    use kactus_config::GeneratorConfig;
    use kactus_diagnostics::DiagnosticSink;
    use kactus_model::{Component, ComponentInstance, MemoryLibrary};

    fn build(design: &Design, sink: &DiagnosticSink) -> InstanceRegistry {
        let mut lib = MemoryLibrary::new();
        lib.add_component(Component::new(Vlnv::new("v", "l", "leaf", "1")));
        let config = GeneratorConfig::default();
        let ctx = ElaborationContext::new(&lib, sink, &config);
        InstanceRegistry::build(
            &ctx,
            design,
            &Substitutions::new(),
            &ElementPath::new(ElementKind::Design, "d"),
        )
    }

    #[test]
    fn instances_in_design_order() {
        let sink = DiagnosticSink::new();
        let mut design = Design::new(Vlnv::new("v", "l", "d", "1"));
        for name in ["b", "a", "c"] {
            design
                .instances
                .push(ComponentInstance::new(name, Vlnv::new("v", "l", "leaf", "1")));
        }
        let registry = build(&design, &sink);
        let names: Vec<_> = registry.models().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn duplicate_names_keep_first() {
        let sink = DiagnosticSink::new();
        let mut design = Design::new(Vlnv::new("v", "l", "d", "1"));
        let mut first = ComponentInstance::new("a", Vlnv::new("v", "l", "leaf", "1"));
        first.description = "first".to_string();
        let mut second = first.clone();
        second.description = "second".to_string();
        design.instances.push(first);
        design.instances.push(second);
        let registry = build(&design, &sink);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.model("a").unwrap().description, "first");
        assert!(sink.contains_code(errors::W304));
    }

    #[test]
    fn unknown_components_are_left_out() {
        let sink = DiagnosticSink::new();
        let mut design = Design::new(Vlnv::new("v", "l", "d", "1"));
        design
            .instances
            .push(ComponentInstance::new("ghost", Vlnv::new("v", "l", "missing", "1")));
        let registry = build(&design, &sink);
        assert!(registry.is_empty());
        assert!(registry.lookup("ghost").is_none());
    }
}
