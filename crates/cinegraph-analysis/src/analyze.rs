//! Orientation-driven dispatch over the analyses in [`crate::graph`].

use cinegraph_core::{Graph, GraphError, Orientation};
use serde::Serialize;
use tracing::instrument;

use crate::graph::{
    ConnectivityReport, ReducedGraph, SccResult, build_condensation, connectivity_report,
    find_sccs,
};

/// Result of [`analyze`]: connectivity for undirected graphs, components and
/// their condensation for directed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "orientation", rename_all = "lowercase")]
pub enum Analysis {
    Undirected(ConnectivityReport),
    Directed {
        sccs: SccResult,
        reduced: ReducedGraph,
    },
}

impl Analysis {
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        match self {
            Self::Undirected(_) => Orientation::Undirected,
            Self::Directed { .. } => Orientation::Directed,
        }
    }
}

/// Run the analysis that fits the graph's orientation.
///
/// # Errors
///
/// Propagates [`GraphError`] from the underlying analysis. For a graph
/// produced by [`Graph`]'s own mutators none is expected.
#[instrument(skip(graph), fields(orientation = %graph.orientation()))]
pub fn analyze(graph: &Graph) -> Result<Analysis, GraphError> {
    match graph.orientation() {
        Orientation::Undirected => connectivity_report(graph).map(Analysis::Undirected),
        Orientation::Directed => {
            let sccs = find_sccs(graph)?;
            let reduced = build_condensation(graph.edges(), &sccs.vertex_to_component)?;
            Ok(Analysis::Directed { sccs, reduced })
        }
    }
}
