//! In-memory movie graph: vertices, edges and mutation primitives.
//!
//! # Orientation
//!
//! Graph files carry an integer type code on their first line. Codes `0..=3`
//! describe undirected graphs and every other code a directed one. The code is
//! mapped to an [`Orientation`] exactly once, in [`Orientation::from_type_code`];
//! nothing else in the workspace compares type codes.
//!
//! # Ordering
//!
//! Vertices iterate in ascending identifier order. Edges keep insertion order,
//! which is also the order in which traversals visit neighbors.
//!
//! # Atomicity
//!
//! Every mutation validates before it touches state, so a failed call leaves
//! the graph exactly as it was.
//!
//! # Representable Fields
//!
//! [`Graph::add_vertex`] only accepts ids and labels that the text format in
//! [`crate::format`] writes back unchanged: ids are non-empty with no
//! whitespace or `|`, labels have no line breaks and no surrounding
//! whitespace. Any graph built through this API therefore survives a save
//! and reload.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::GraphError;

/// Type code written for undirected graphs built in memory.
pub const UNDIRECTED_TYPE_CODE: u32 = 0;
/// Type code written for directed graphs built in memory.
pub const DIRECTED_TYPE_CODE: u32 = 4;

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Whether a graph's edges are directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Undirected,
    Directed,
}

impl Orientation {
    /// Map a persisted type code to an orientation.
    #[must_use]
    pub const fn from_type_code(code: u32) -> Self {
        match code {
            0..=3 => Self::Undirected,
            _ => Self::Directed,
        }
    }

    /// Canonical type code for graphs created without a file.
    #[must_use]
    pub const fn default_type_code(self) -> u32 {
        match self {
            Self::Undirected => UNDIRECTED_TYPE_CODE,
            Self::Directed => DIRECTED_TYPE_CODE,
        }
    }

    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::Directed)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => f.write_str("undirected"),
            Self::Directed => f.write_str("directed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Why `id` cannot be stored, if it cannot.
pub(crate) fn vertex_id_problem(id: &str) -> Option<&'static str> {
    if id.is_empty() {
        Some("must not be empty")
    } else if id.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if id.contains('|') {
        Some("must not contain '|'")
    } else {
        None
    }
}

/// Why `label` cannot be stored, if it cannot.
pub(crate) fn label_problem(label: &str) -> Option<&'static str> {
    if label.contains(['\n', '\r']) {
        Some("must not contain line breaks")
    } else if label.trim() != label {
        Some("must not start or end with whitespace")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Vertex / Edge
// ---------------------------------------------------------------------------

/// A movie: identifier, display label and genre tag codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub id: String,
    pub label: String,
    pub tags: BTreeSet<u32>,
}

impl Vertex {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        tags: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tags: tags.into_iter().collect(),
        }
    }

    /// Smallest tag code shared with `other`, if any.
    #[must_use]
    pub fn min_shared_tag(&self, other: &Self) -> Option<u32> {
        // BTreeSet intersection yields ascending codes.
        self.tags.intersection(&other.tags).next().copied()
    }
}

/// A stored edge. Whether it is read as `source -> target` or as an
/// unordered pair depends on the owning graph's [`Orientation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns `true` if `id` is either endpoint.
    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    #[must_use]
    pub fn is(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Vertices keyed by id plus an ordered edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    orientation: Orientation,
    type_code: u32,
    vertices: BTreeMap<String, Vertex>,
    edges: Vec<Edge>,
    /// Stored `(source, target)` pairs, mirrors `edges`.
    edge_keys: HashSet<(String, String)>,
}

impl Graph {
    /// Create an empty graph with the canonical type code for `orientation`.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self::from_type_code(orientation.default_type_code())
    }

    /// Create an empty graph from a persisted type code, keeping the code
    /// so it can be written back unchanged.
    #[must_use]
    pub fn from_type_code(type_code: u32) -> Self {
        Self {
            orientation: Orientation::from_type_code(type_code),
            type_code,
            vertices: BTreeMap::new(),
            edges: Vec::new(),
            edge_keys: HashSet::new(),
        }
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn type_code(&self) -> u32 {
        self.type_code
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    #[must_use]
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    /// Vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` if the edge exists, honoring orientation: undirected
    /// graphs match either direction.
    #[must_use]
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.has_key(source, target)
            || (!self.orientation.is_directed() && self.has_key(target, source))
    }

    // -- mutation -----------------------------------------------------------

    /// Insert a vertex.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidField`] if the id or label cannot be written
    ///   to a graph file unchanged.
    /// - [`GraphError::DuplicateVertex`] if the id is already present.
    pub fn add_vertex(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        tags: impl IntoIterator<Item = u32>,
    ) -> Result<(), GraphError> {
        let vertex = Vertex::new(id, label, tags);
        if let Some(reason) = vertex_id_problem(&vertex.id) {
            return Err(GraphError::InvalidField {
                field: "vertex id",
                value: vertex.id,
                reason,
            });
        }
        if let Some(reason) = label_problem(&vertex.label) {
            return Err(GraphError::InvalidField {
                field: "label",
                value: vertex.label,
                reason,
            });
        }
        if self.vertices.contains_key(&vertex.id) {
            return Err(GraphError::DuplicateVertex(vertex.id));
        }
        trace!(id = %vertex.id, "add vertex");
        self.vertices.insert(vertex.id.clone(), vertex);
        Ok(())
    }

    /// Remove a vertex and every edge incident to it.
    ///
    /// Returns the removed vertex and how many edges went with it.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexNotFound`] if the id is absent.
    pub fn remove_vertex(&mut self, id: &str) -> Result<(Vertex, usize), GraphError> {
        let vertex = self
            .vertices
            .remove(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))?;
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        self.edge_keys.retain(|(source, target)| source != id && target != id);
        let removed = before - self.edges.len();
        trace!(id, removed_edges = removed, "remove vertex");
        Ok((vertex, removed))
    }

    /// Replace a vertex's tag set.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexNotFound`] if the id is absent.
    pub fn set_tags(
        &mut self,
        id: &str,
        tags: impl IntoIterator<Item = u32>,
    ) -> Result<(), GraphError> {
        let vertex = self
            .vertices
            .get_mut(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))?;
        vertex.tags = tags.into_iter().collect();
        Ok(())
    }

    /// Insert an edge between two existing vertices.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownVertex`] if either endpoint is absent.
    /// - [`GraphError::DuplicateEdge`] if the edge exists (either direction
    ///   for undirected graphs, the exact direction for directed graphs).
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<(), GraphError> {
        let edge = Edge::new(source, target);
        for endpoint in [&edge.source, &edge.target] {
            if !self.vertices.contains_key(endpoint) {
                return Err(GraphError::UnknownVertex(endpoint.clone()));
            }
        }
        if self.contains_edge(&edge.source, &edge.target) {
            return Err(GraphError::DuplicateEdge {
                from: edge.source,
                to: edge.target,
            });
        }
        trace!(source = %edge.source, target = %edge.target, "add edge");
        self.edge_keys.insert((edge.source.clone(), edge.target.clone()));
        self.edges.push(edge);
        Ok(())
    }

    /// Remove an edge. An exact match is preferred; otherwise the first
    /// reverse match is removed.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] if neither orientation is stored.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<Edge, GraphError> {
        let position = self
            .edges
            .iter()
            .position(|edge| edge.is(source, target))
            .or_else(|| self.edges.iter().position(|edge| edge.is(target, source)))
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: source.to_string(),
                to: target.to_string(),
            })?;
        trace!(source, target, "remove edge");
        let edge = self.edges.remove(position);
        self.edge_keys.remove(&(edge.source.clone(), edge.target.clone()));
        Ok(edge)
    }

    // -- derived views ------------------------------------------------------

    /// Neighbors of `id` in edge order. Undirected edges are followed from
    /// both ends.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let undirected = !self.orientation.is_directed();
        self.edges
            .iter()
            .filter_map(|edge| {
                if edge.source == id {
                    Some(edge.target.as_str())
                } else if undirected && edge.target == id {
                    Some(edge.source.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Adjacency listing for every vertex, including isolated ones.
    #[must_use]
    pub fn adjacency_list(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut adjacency: BTreeMap<&str, Vec<&str>> =
            self.vertex_ids().map(|id| (id, Vec::new())).collect();
        for edge in &self.edges {
            if let Some(list) = adjacency.get_mut(edge.source.as_str()) {
                list.push(edge.target.as_str());
            }
            if self.orientation.is_directed() {
                continue;
            }
            if let Some(list) = adjacency.get_mut(edge.target.as_str()) {
                list.push(edge.source.as_str());
            }
        }
        adjacency
    }

    /// Weight of the pair `(source, target)`: the smallest tag code both
    /// endpoints share.
    ///
    /// Derived from current tags on every call. Returns `None` when either
    /// vertex is absent or the two share no tag.
    #[must_use]
    pub fn edge_weight(&self, source: &str, target: &str) -> Option<u32> {
        let a = self.vertices.get(source)?;
        let b = self.vertices.get(target)?;
        a.min_shared_tag(b)
    }

    fn has_key(&self, source: &str, target: &str) -> bool {
        self.edge_keys.contains(&(source.to_owned(), target.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
