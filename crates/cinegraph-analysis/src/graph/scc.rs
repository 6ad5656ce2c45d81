//! Strongly connected components via Kosaraju's two-pass DFS.
//!
//! # Algorithm
//!
//! 1. **Finish order**: DFS over forward adjacency, starting a new root at
//!    every unvisited vertex in id order. A vertex is pushed onto the finish
//!    stack once all of its descendants have finished.
//! 2. **Assignment**: DFS over reverse adjacency. Pop the finish stack; each
//!    vertex not yet assigned opens a new component and claims everything
//!    still unassigned that it reaches.
//!
//! Both passes use the explicit frame stack from [`super::dfs`].
//!
//! # Component Indices
//!
//! Components are numbered in the order pass 2 discovers them. That order is
//! an artifact of the finish stack, not a guarantee: compare results by set
//! membership, never by index.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet};

use cinegraph_core::{Graph, GraphError, Orientation};
use serde::Serialize;
use tracing::{debug, instrument};

use super::dfs::depth_first;
use super::index::{Adjacency, Traversal, VertexIndex};
use super::require_orientation;

/// Output of [`find_sccs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SccResult {
    /// Components in discovery order. Each is a set of vertex ids.
    pub components: Vec<BTreeSet<String>>,
    /// Vertex id to index into `components`, ascending by id.
    pub vertex_to_component: BTreeMap<String, usize>,
}

impl SccResult {
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// `true` when there is exactly one component.
    #[must_use]
    pub fn is_strongly_connected(&self) -> bool {
        self.components.len() == 1
    }

    #[must_use]
    pub fn component_of(&self, id: &str) -> Option<usize> {
        self.vertex_to_component.get(id).copied()
    }

    /// `true` if both vertices exist and share a component.
    #[must_use]
    pub fn same_component(&self, a: &str, b: &str) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    /// Components as a set of sets, for index-independent comparison.
    #[must_use]
    pub fn partition(&self) -> BTreeSet<BTreeSet<String>> {
        self.components.iter().cloned().collect()
    }
}

/// Find the strongly connected components of a directed graph.
///
/// # Errors
///
/// [`GraphError::WrongGraphType`] if `graph` is undirected.
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn find_sccs(graph: &Graph) -> Result<SccResult, GraphError> {
    require_orientation(graph, Orientation::Directed)?;

    let index = VertexIndex::new(graph);
    let n = index.len();

    // Pass 1: finish order over forward edges.
    let forward = Adjacency::build(graph, &index, Traversal::Forward);
    let mut visited = vec![false; n];
    let mut finish_stack: Vec<usize> = Vec::with_capacity(n);
    for root in 0..n {
        depth_first(&forward, root, &mut visited, |_| {}, |v| finish_stack.push(v));
    }
    drop(forward);

    // Pass 2: claim components over reverse edges.
    let reverse = Adjacency::build(graph, &index, Traversal::Reverse);
    let mut assigned = vec![false; n];
    let mut components: Vec<BTreeSet<String>> = Vec::new();
    let mut vertex_to_component: BTreeMap<String, usize> = BTreeMap::new();

    while let Some(start) = finish_stack.pop() {
        if assigned[start] {
            continue;
        }
        let component = components.len();
        let mut members = BTreeSet::new();
        depth_first(
            &reverse,
            start,
            &mut assigned,
            |v| {
                let id = index.id(v);
                members.insert(id.to_owned());
                vertex_to_component.insert(id.to_owned(), component);
            },
            |_| {},
        );
        components.push(members);
    }

    debug!(components = components.len(), "kosaraju complete");
    Ok(SccResult {
        components,
        vertex_to_component,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
