//! Condensation: one node per strongly connected component.
//!
//! Every original edge whose endpoints fall in different components becomes
//! a component-level edge. Parallel edges collapse and intra-component edges
//! vanish, so the reduced graph has no self-loops. Acyclicity follows from
//! the components being maximal; [`ReducedGraph::is_acyclic`] checks it
//! rather than the builder.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet};

use cinegraph_core::{Edge, GraphError};
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, instrument};

/// Component-level adjacency. Components with no outgoing edges have no
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReducedGraph {
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl ReducedGraph {
    /// Successors of component `c`, ascending.
    pub fn targets(&self, c: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(&c).into_iter().flatten().copied()
    }

    /// `(component, successors)` pairs in ascending component order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> {
        self.adjacency.iter().map(|(c, targets)| (*c, targets))
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    #[must_use]
    pub fn has_self_loop(&self) -> bool {
        self.adjacency
            .iter()
            .any(|(c, targets)| targets.contains(c))
    }

    /// Petgraph view with node `i` standing for component `i`.
    ///
    /// The node count is `component_count`, widened if an edge refers past
    /// it, so isolated components still appear as nodes.
    #[must_use]
    pub fn to_digraph(&self, component_count: usize) -> DiGraph<usize, ()> {
        let highest = self
            .adjacency
            .iter()
            .flat_map(|(c, targets)| std::iter::once(*c).chain(targets.iter().copied()))
            .max()
            .map_or(0, |c| c + 1);
        let nodes = component_count.max(highest);

        let mut digraph = DiGraph::with_capacity(nodes, self.edge_count());
        for c in 0..nodes {
            digraph.add_node(c);
        }
        for (c, targets) in &self.adjacency {
            for t in targets {
                digraph.add_edge(NodeIndex::new(*c), NodeIndex::new(*t), ());
            }
        }
        digraph
    }

    #[must_use]
    pub fn is_acyclic(&self, component_count: usize) -> bool {
        !is_cyclic_directed(&self.to_digraph(component_count))
    }

    /// Components in an order where every edge points forward, or `None`
    /// if the reduced graph has a cycle.
    #[must_use]
    pub fn topological_order(&self, component_count: usize) -> Option<Vec<usize>> {
        let digraph = self.to_digraph(component_count);
        toposort(&digraph, None)
            .ok()
            .map(|order| order.into_iter().map(NodeIndex::index).collect())
    }
}

impl<'a> IntoIterator for &'a ReducedGraph {
    type Item = (&'a usize, &'a BTreeSet<usize>);
    type IntoIter = std::collections::btree_map::Iter<'a, usize, BTreeSet<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.adjacency.iter()
    }
}

/// Build the condensation from the original edges and a component mapping.
///
/// # Errors
///
/// [`GraphError::UnknownVertex`] if an edge endpoint has no component.
#[instrument(skip_all, fields(edges = edges.len(), vertices = vertex_to_component.len()))]
pub fn build_condensation(
    edges: &[Edge],
    vertex_to_component: &BTreeMap<String, usize>,
) -> Result<ReducedGraph, GraphError> {
    let component = |id: &str| {
        vertex_to_component
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(id.to_owned()))
    };

    let mut adjacency: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for edge in edges {
        let from = component(&edge.source)?;
        let to = component(&edge.target)?;
        if from != to {
            adjacency.entry(from).or_default().insert(to);
        }
    }

    let reduced = ReducedGraph { adjacency };
    debug!(reduced_edges = reduced.edge_count(), "condensation built");
    Ok(reduced)
}
