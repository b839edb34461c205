//! Lookup of IP-XACT documents by identity.

use crate::abstraction::AbstractionDefinition;
use crate::component::Component;
use indexmap::IndexMap;
use kactus_common::Vlnv;

/// Read-only access to the documents a generation run may reference.
///
/// Implementations must be shareable across threads so that independent runs
/// can use the same library snapshot in parallel.
pub trait Library: Sync {
    /// Looks up a component by identity.
    fn component(&self, vlnv: &Vlnv) -> Option<&Component>;

    /// Looks up an abstraction definition by identity.
    fn abstraction(&self, vlnv: &Vlnv) -> Option<&AbstractionDefinition>;
}

/// An in-memory [`Library`] keyed by identity.
#[derive(Debug, Default, Clone)]
pub struct MemoryLibrary {
    components: IndexMap<Vlnv, Component>,
    abstractions: IndexMap<Vlnv, AbstractionDefinition>,
}

impl MemoryLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a component. Returns the previous entry, if any.
    pub fn add_component(&mut self, component: Component) -> Option<Component> {
        self.components.insert(component.vlnv.clone(), component)
    }

    /// Adds or replaces an abstraction definition. Returns the previous entry, if any.
    pub fn add_abstraction(
        &mut self,
        definition: AbstractionDefinition,
    ) -> Option<AbstractionDefinition> {
        self.abstractions.insert(definition.vlnv.clone(), definition)
    }

    /// Returns the number of components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl Library for MemoryLibrary {
    fn component(&self, vlnv: &Vlnv) -> Option<&Component> {
        self.components.get(vlnv)
    }

    fn abstraction(&self, vlnv: &Vlnv) -> Option<&AbstractionDefinition> {
        self.abstractions.get(vlnv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_lookup_component() {
        let vlnv = Vlnv::new("Test", "TestLibrary", "TestSender", "1.0");
        let mut lib = MemoryLibrary::new();
        assert!(lib.add_component(Component::new(vlnv.clone())).is_none());
        assert!(lib.component(&vlnv).is_some());
        assert_eq!(lib.component_count(), 1);
    }

    #[test]
    fn replace_returns_previous() {
        let vlnv = Vlnv::new("Test", "TestLibrary", "TestSender", "1.0");
        let mut lib = MemoryLibrary::new();
        lib.add_component(Component::new(vlnv.clone()));
        let mut updated = Component::new(vlnv.clone());
        updated.description = "second".to_string();
        assert!(lib.add_component(updated).is_some());
        assert_eq!(lib.component(&vlnv).unwrap().description, "second");
    }

    #[test]
    fn missing_abstraction_is_none() {
        let lib = MemoryLibrary::new();
        assert!(lib
            .abstraction(&Vlnv::new("Test", "TestLibrary", "bus.absDef", "1.0"))
            .is_none());
    }
}
