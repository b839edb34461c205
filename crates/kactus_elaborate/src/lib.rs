//! IP-XACT elaboration: from component and design documents to an
//! emitter-ready [`GeneratedModule`].
//!
//! Elaboration resolves parameter dependencies, maps physical ports onto
//! logical bus signals, specialises every component instance with its
//! parameter overrides, and turns interconnections and ad-hoc connections
//! into wires, direct port connections and tie-offs.
//!
//! # Usage
//!
//! ```ignore
//! let ctx = ElaborationContext::new(&library, &sink, &config);
//! let module = elaborate_design(&ctx, &component, Some(&design), None)?;
//! ```

#![warn(missing_docs)]

pub mod adhoc;
pub mod assemble;
pub mod component;
pub mod const_eval;
pub mod context;
pub mod errors;
pub mod expr;
pub mod instance;
pub mod interconnect;
pub mod params;
pub mod plan;
pub mod ports;
pub mod registry;
pub mod tieoff;

use kactus_common::{ElementKind, ElementPath, KactusResult};
use kactus_ir::GeneratedModule;
use kactus_model::{Component, Design};
use log::debug;

pub use component::elaborate_component_model;
pub use const_eval::{ExpressionEvaluator, IntegerEvaluator};
pub use context::ElaborationContext;
pub use plan::ConnectionPlan;
pub use registry::InstanceRegistry;
pub use tieoff::TiePolicy;

use assemble::assemble_module;
use params::name_table;

/// Elaborates a hierarchical component and the design implementing it.
///
/// `view` selects the component instantiation of the top component. With no
/// design the module has ports and parameters but no contents. Problems in
/// the model are reported to the context's sink; only internal bugs return
/// `Err`.
pub fn elaborate_design(
    ctx: &ElaborationContext<'_>,
    top: &Component,
    design: Option<&Design>,
    view: Option<&str>,
) -> KactusResult<GeneratedModule> {
    let top_model = elaborate_component_model(ctx, top, view);

    let Some(design) = design else {
        return assemble_module(
            &top_model,
            &top.description,
            &InstanceRegistry::default(),
            ConnectionPlan::new(),
        );
    };

    let location = ElementPath::new(ElementKind::Design, design.vlnv.to_string());
    let top_names = name_table(&top_model);
    let registry = InstanceRegistry::build(ctx, design, &top_names, &location);
    let mut plan = ConnectionPlan::new();

    interconnect::synthesize_interconnections(
        ctx,
        design,
        &top_model,
        &registry,
        &mut plan,
        &location,
    );
    adhoc::synthesize_ad_hoc(
        ctx,
        design,
        &top_model,
        &top_names,
        &registry,
        &mut plan,
        &location,
    );

    debug!(
        "design {}: {} instance(s), {} wire(s), {} tie-off(s)",
        design.vlnv,
        registry.len(),
        plan.wires.len(),
        plan.tie_offs.len()
    );
    assemble_module(&top_model, &top.description, &registry, plan)
}

/// Elaborates a flat component: its module declaration with no instances.
pub fn elaborate_component(
    ctx: &ElaborationContext<'_>,
    component: &Component,
    view: Option<&str>,
) -> KactusResult<GeneratedModule> {
    elaborate_design(ctx, component, None, view)
}
