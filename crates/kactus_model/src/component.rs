//! Components, their views and their HDL instantiations.

use crate::bus::BusInterface;
use crate::parameter::Parameter;
use crate::port::Port;
use kactus_common::Vlnv;
use serde::{Deserialize, Serialize};

/// A view of a component, selecting one component instantiation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct View {
    /// The view name.
    pub name: String,
    /// Name of the component instantiation the view refers to.
    #[serde(default)]
    pub component_instantiation: Option<String>,
}

/// An HDL-level instantiation of a component.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ComponentInstantiation {
    /// The instantiation name.
    pub name: String,
    /// Overrides the module name, which otherwise is the component name.
    #[serde(default)]
    pub module_name: Option<String>,
    /// Module parameters emitted after the component parameters.
    #[serde(default)]
    pub module_parameters: Vec<Parameter>,
}

/// An IP-XACT component.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Component {
    /// The component identity.
    pub vlnv: Vlnv,
    /// Free-form description, written into the file header.
    #[serde(default)]
    pub description: String,
    /// Component parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Physical ports in declaration order.
    #[serde(default)]
    pub ports: Vec<Port>,
    /// Bus interfaces in declaration order.
    #[serde(default)]
    pub bus_interfaces: Vec<BusInterface>,
    /// Views.
    #[serde(default)]
    pub views: Vec<View>,
    /// Component instantiations referenced by views.
    #[serde(default)]
    pub instantiations: Vec<ComponentInstantiation>,
}

impl Component {
    /// Creates an empty component.
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            description: String::new(),
            parameters: Vec::new(),
            ports: Vec::new(),
            bus_interfaces: Vec::new(),
            views: Vec::new(),
            instantiations: Vec::new(),
        }
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Looks up a bus interface by name.
    pub fn bus_interface(&self, name: &str) -> Option<&BusInterface> {
        self.bus_interfaces.iter().find(|b| b.name == name)
    }

    /// Returns the instantiation selected by the named view.
    ///
    /// An unknown or missing view name falls back to the first view. Returns
    /// `None` if the component has no views or the view names no existing
    /// instantiation.
    pub fn active_instantiation(&self, view: Option<&str>) -> Option<&ComponentInstantiation> {
        let view = view
            .and_then(|name| self.views.iter().find(|v| v.name == name))
            .or_else(|| self.views.first())?;
        let name = view.component_instantiation.as_deref()?;
        self.instantiations.iter().find(|i| i.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component_with_views() -> Component {
        let mut c = Component::new(Vlnv::new("Test", "TestLibrary", "TestComponent", "1.0"));
        c.instantiations.push(ComponentInstantiation {
            name: "rtl_inst".to_string(),
            module_name: Some("test_rtl".to_string()),
            module_parameters: vec![Parameter::new("uuid_m", "moduleParam", "1")],
        });
        c.instantiations.push(ComponentInstantiation {
            name: "sim_inst".to_string(),
            module_name: None,
            module_parameters: Vec::new(),
        });
        c.views.push(View {
            name: "rtl".to_string(),
            component_instantiation: Some("rtl_inst".to_string()),
        });
        c.views.push(View {
            name: "sim".to_string(),
            component_instantiation: Some("sim_inst".to_string()),
        });
        c
    }

    #[test]
    fn named_view_selects_instantiation() {
        let c = component_with_views();
        assert_eq!(c.active_instantiation(Some("sim")).unwrap().name, "sim_inst");
    }

    #[test]
    fn unknown_view_falls_back_to_first() {
        let c = component_with_views();
        assert_eq!(c.active_instantiation(Some("gate")).unwrap().name, "rtl_inst");
        assert_eq!(c.active_instantiation(None).unwrap().name, "rtl_inst");
    }

    #[test]
    fn no_views_means_no_instantiation() {
        let c = Component::new(Vlnv::new("a", "b", "c", "1"));
        assert!(c.active_instantiation(None).is_none());
    }

    #[test]
    fn deserialize_minimal_component() {
        let c: Component = serde_json::from_str(
            r#"{"vlnv":{"vendor":"v","library":"l","name":"n","version":"1"}}"#,
        )
        .unwrap();
        assert!(c.ports.is_empty());
        assert!(c.port("clk").is_none());
    }
}
