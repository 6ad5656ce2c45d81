//! Connectivity of undirected graphs.
//!
//! A single DFS from the anchor vertex, following every stored edge in both
//! directions. The anchor is the first vertex in iteration order (the
//! smallest id). A graph with no vertices is vacuously connected.

#![allow(clippy::module_name_repetitions)]

use cinegraph_core::{Graph, GraphError, Orientation};
use serde::Serialize;
use tracing::{debug, instrument};

use super::dfs::reachable_from;
use super::index::{Adjacency, Traversal, VertexIndex};
use super::require_orientation;

/// Reachability from the anchor vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    /// Traversal start, `None` for an empty graph.
    pub anchor: Option<String>,
    /// Vertices reached from the anchor, anchor included.
    pub reached: usize,
    /// Vertices in the graph.
    pub total: usize,
}

impl ConnectivityReport {
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.reached == self.total
    }

    /// Fraction of vertices reached; `1.0` for an empty graph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.reached as f64 / self.total as f64
        }
    }
}

/// Returns `true` if every vertex is reachable from the anchor.
///
/// # Errors
///
/// [`GraphError::WrongGraphType`] if `graph` is directed.
pub fn check_connectivity(graph: &Graph) -> Result<bool, GraphError> {
    connectivity_report(graph).map(|report| report.is_connected())
}

/// Run the connectivity traversal and report how much of the graph it
/// reached.
///
/// # Errors
///
/// [`GraphError::WrongGraphType`] if `graph` is directed.
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn connectivity_report(graph: &Graph) -> Result<ConnectivityReport, GraphError> {
    require_orientation(graph, Orientation::Undirected)?;

    let index = VertexIndex::new(graph);
    if index.is_empty() {
        return Ok(ConnectivityReport {
            anchor: None,
            reached: 0,
            total: 0,
        });
    }

    let adjacency = Adjacency::build(graph, &index, Traversal::Both);
    let reached = reachable_from(&adjacency, 0).len();
    let report = ConnectivityReport {
        anchor: Some(index.id(0).to_owned()),
        reached,
        total: index.len(),
    };

    debug!(
        anchor = index.id(0),
        reached = report.reached,
        total = report.total,
        "connectivity traversal complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new(Orientation::Undirected);
        for id in ids {
            graph.add_vertex(*id, *id, []).expect("add vertex");
        }
        for (a, b) in edges {
            graph.add_edge(*a, *b).expect("add edge");
        }
        graph
    }

    #[test]
    fn empty_graph_is_vacuously_connected() {
        let graph = Graph::new(Orientation::Undirected);
        assert!(check_connectivity(&graph).expect("check"));
        let report = connectivity_report(&graph).expect("report");
        assert_eq!(report.anchor, None);
        assert!((report.ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_vertex_is_connected() {
        assert!(check_connectivity(&undirected(&["only"], &[])).expect("check"));
    }

    #[test]
    fn two_isolated_vertices_are_disconnected() {
        let report = connectivity_report(&undirected(&["a", "b"], &[])).expect("report");
        assert!(!report.is_connected());
        assert_eq!(report.reached, 1);
        assert!((report.ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn path_is_connected() {
        let graph = undirected(&["1", "2", "3"], &[("1", "2"), ("2", "3")]);
        assert!(check_connectivity(&graph).expect("check"));
    }

    #[test]
    fn edges_are_followed_against_storage_direction() {
        // Anchor "a" only appears as an edge target.
        let graph = undirected(&["a", "b", "c"], &[("b", "a"), ("c", "b")]);
        let report = connectivity_report(&graph).expect("report");
        assert_eq!(report.anchor.as_deref(), Some("a"));
        assert!(report.is_connected());
    }

    #[test]
    fn anchor_is_smallest_id() {
        let graph = undirected(&["m", "c", "x"], &[("c", "x")]);
        let report = connectivity_report(&graph).expect("report");
        assert_eq!(report.anchor.as_deref(), Some("c"));
        assert_eq!(report.reached, 2);
        assert_eq!(report.total, 3);
    }

    #[test]
    fn directed_graph_is_rejected() {
        let err = check_connectivity(&Graph::new(Orientation::Directed)).unwrap_err();
        assert!(matches!(err, GraphError::WrongGraphType { .. }));
        assert!(!err.is_structural());
    }
}
