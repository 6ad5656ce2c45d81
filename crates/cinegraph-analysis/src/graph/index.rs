//! Dense vertex indices and adjacency lists derived from a [`Graph`].

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use cinegraph_core::Graph;

/// Bidirectional mapping between vertex ids and `0..n` indices.
///
/// Index order is the graph's vertex iteration order (ascending id), so
/// index 0 is the first vertex any traversal considers.
#[derive(Debug, Clone)]
pub struct VertexIndex<'g> {
    ids: Vec<&'g str>,
    positions: HashMap<&'g str, usize>,
}

impl<'g> VertexIndex<'g> {
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        let ids: Vec<&'g str> = graph.vertex_ids().collect();
        let positions = ids.iter().enumerate().map(|(idx, id)| (*id, idx)).collect();
        Self { ids, positions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Id at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`; indices only come from this mapping.
    #[must_use]
    pub fn id(&self, idx: usize) -> &'g str {
        self.ids[idx]
    }
}

/// Which way stored edges are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// `source -> target`.
    Forward,
    /// `target -> source`.
    Reverse,
    /// Both ways, for undirected reachability.
    Both,
}

/// Per-vertex neighbor lists in edge insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    lists: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Build adjacency for `graph` following edges per `traversal`.
    ///
    /// Edges whose endpoints are missing from `index` are skipped; a valid
    /// [`Graph`] never stores one.
    #[must_use]
    pub fn build(graph: &Graph, index: &VertexIndex<'_>, traversal: Traversal) -> Self {
        let mut lists = vec![Vec::new(); index.len()];
        for edge in graph.edges() {
            let (Some(source), Some(target)) =
                (index.position(&edge.source), index.position(&edge.target))
            else {
                continue;
            };
            match traversal {
                Traversal::Forward => lists[source].push(target),
                Traversal::Reverse => lists[target].push(source),
                Traversal::Both => {
                    lists[source].push(target);
                    lists[target].push(source);
                }
            }
        }
        Self { lists }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    #[must_use]
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.lists.get(vertex).map(Vec::as_slice).unwrap_or_default()
    }
}
