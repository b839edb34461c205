//! Dependency ordering and reference rewriting of parameters.
//!
//! Parameters reference each other by id. [`resolve_parameters`] builds a
//! graph with an edge from every referenced parameter to the parameter that
//! references it, collapses strongly connected components, and emits the
//! components in topological order. Ties are broken by declaration order, so
//! the same input always yields the same order.
//!
//! Members of a cycle and parameters referencing an unknown id keep their raw
//! expression and get a diagnostic; everything else resolves normally.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use kactus_common::{ElementKind, ElementPath};
use kactus_ir::{Arena, ComponentModel, ParamId, ParameterStatus, ResolvedParameter};
use log::{debug, trace};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::context::ElaborationContext;
use crate::errors;
use crate::expr::{identifiers, parenthesize, Substitutions};

/// One parameter to resolve.
#[derive(Clone, Debug)]
pub struct ParameterInput<'m> {
    /// The reference id.
    pub id: &'m str,
    /// The display name.
    pub name: &'m str,
    /// The expression: the parameter's own value or an override.
    pub expr: String,
    /// Whether `expr` is an override, written in the outer scope.
    pub overridden: bool,
}

impl<'m> ParameterInput<'m> {
    /// Creates an input from a parameter's own value.
    pub fn from_parameter(parameter: &'m kactus_model::Parameter) -> Self {
        Self {
            id: &parameter.id,
            name: &parameter.name,
            expr: parameter.value.clone(),
            overridden: false,
        }
    }
}

/// What references to sibling parameters are rewritten into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RewriteMode {
    /// Display names, for declarations inside the component's own module.
    Names,
    /// Effective values, for instantiations where sibling names are not visible.
    Values,
}

/// The outcome of resolving one parameter scope.
#[derive(Debug)]
pub struct ResolvedScope {
    /// Parameters in declaration order.
    pub parameters: Arena<ParamId, ResolvedParameter>,
    /// Parameter ids in dependency order.
    pub order: Vec<ParamId>,
    /// Rewrites ids of this scope and the outer scope for other expressions
    /// of the same component (port bounds, part selects, defaults).
    pub substitutions: Substitutions,
}

/// Orders parameters by dependency and rewrites their references.
///
/// `outer` maps ids of the instantiating scope to their replacements; it is
/// the only scope override expressions may reference.
pub fn resolve_parameters(
    ctx: &ElaborationContext<'_>,
    inputs: &[ParameterInput<'_>],
    outer: &Substitutions,
    mode: RewriteMode,
    location: &ElementPath,
) -> ResolvedScope {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, input) in inputs.iter().enumerate() {
        index.entry(input.id).or_insert(i);
    }

    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(inputs.len(), inputs.len());
    let nodes: Vec<NodeIndex> = (0..inputs.len()).map(|i| graph.add_node(i)).collect();
    let mut unresolved: Vec<Option<&str>> = vec![None; inputs.len()];

    for (i, input) in inputs.iter().enumerate() {
        for token in identifiers(&input.expr) {
            let sibling = if input.overridden {
                None
            } else {
                index.get(token).copied()
            };
            match sibling {
                Some(j) => {
                    if graph.find_edge(nodes[j], nodes[i]).is_none() {
                        graph.add_edge(nodes[j], nodes[i], ());
                    }
                }
                None if !outer.contains(token) && ctx.is_reference_id(token) => {
                    unresolved[i].get_or_insert(token);
                }
                None => {}
            }
        }
    }

    let (order, cyclic) = stable_topological_order(&graph);

    let mut own = Substitutions::new();
    if mode == RewriteMode::Names {
        for input in inputs {
            own.insert(input.id, input.name);
        }
    }

    let mut resolved: Vec<Option<ResolvedParameter>> = vec![None; inputs.len()];
    for &i in &order {
        let input = &inputs[i];
        let path = location.child(ElementKind::Parameter, input.name);

        let status = if let Some(members) = &cyclic[i] {
            let names: Vec<&str> = members
                .iter()
                .chain(members.first())
                .map(|&m| inputs[m].name)
                .collect();
            ctx.sink
                .emit(errors::error_parameter_cycle(input.name, &names, path));
            ParameterStatus::Cycle
        } else if let Some(reference) = unresolved[i] {
            ctx.sink.emit(errors::error_unresolved_reference(
                input.name, reference, path,
            ));
            ParameterStatus::Unresolved
        } else {
            ParameterStatus::Resolved
        };

        let value = match status {
            ParameterStatus::Resolved if input.overridden => outer.apply(&input.expr),
            ParameterStatus::Resolved => {
                let mut table = own.clone();
                table.extend_missing(outer);
                table.apply(&input.expr)
            }
            ParameterStatus::Cycle | ParameterStatus::Unresolved => input.expr.clone(),
        };
        trace!("parameter {} = {} ({:?})", input.name, value, status);

        if mode == RewriteMode::Values {
            let replacement = match status {
                ParameterStatus::Resolved => parenthesize(&value),
                ParameterStatus::Cycle | ParameterStatus::Unresolved => input.name.to_string(),
            };
            own.insert(input.id, replacement);
        }

        resolved[i] = Some(ResolvedParameter {
            id: input.id.to_string(),
            name: input.name.to_string(),
            raw: input.expr.clone(),
            value,
            status,
        });
    }

    let mut parameters = Arena::new();
    let ids: Vec<ParamId> = resolved
        .into_iter()
        .flatten()
        .map(|p| parameters.alloc(p))
        .collect();
    let order: Vec<ParamId> = order.into_iter().map(|i| ids[i]).collect();

    own.extend_missing(outer);
    debug!(
        "resolved {} parameter(s) at {}",
        parameters.len(),
        location
    );

    ResolvedScope {
        parameters,
        order,
        substitutions: own,
    }
}

/// Maps every parameter id of a model to its display name.
pub fn name_table(model: &ComponentModel) -> Substitutions {
    let mut table = Substitutions::new();
    for parameter in model.parameters.values() {
        table.insert(parameter.id.clone(), parameter.name.clone());
    }
    table
}

/// Topologically orders the nodes of a dependency graph.
///
/// Returns the node weights in order, plus for every node the members of its
/// cycle (in declaration order) if it is on one. Strongly connected
/// components are emitted as a unit, and among the components that are ready
/// the one with the earliest declared member goes first.
fn stable_topological_order(
    graph: &DiGraph<usize, ()>,
) -> (Vec<usize>, Vec<Option<Vec<usize>>>) {
    let components = tarjan_scc(graph);
    let mut component_of = vec![0usize; graph.node_count()];
    let mut members: Vec<Vec<usize>> = Vec::with_capacity(components.len());
    let mut cyclic = vec![None; graph.node_count()];

    for (c, component) in components.iter().enumerate() {
        let mut weights: Vec<usize> = component.iter().map(|&n| graph[n]).collect();
        weights.sort_unstable();
        for &n in component {
            component_of[graph[n]] = c;
        }
        let is_cycle = component.len() > 1
            || component
                .first()
                .is_some_and(|&n| graph.find_edge(n, n).is_some());
        if is_cycle {
            for &w in &weights {
                cyclic[w] = Some(weights.clone());
            }
        }
        members.push(weights);
    }

    let mut in_degree = vec![0usize; components.len()];
    for edge in graph.edge_references() {
        let from = component_of[graph[edge.source()]];
        let to = component_of[graph[edge.target()]];
        if from != to {
            in_degree[to] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<(usize, usize)>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(c, _)| Reverse((members[c][0], c)))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse((_, c))) = ready.pop() {
        for &w in &members[c] {
            order.push(w);
            for edge in graph.edges(NodeIndex::new(w)) {
                let to = component_of[graph[edge.target()]];
                if to != c {
                    in_degree[to] -= 1;
                    if in_degree[to] == 0 {
                        ready.push(Reverse((members[to][0], to)));
                    }
                }
            }
        }
    }

    (order, cyclic)
}
