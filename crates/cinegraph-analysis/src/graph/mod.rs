//! Connectivity analysis for movie graphs.
//!
//! # Overview
//!
//! Every analysis first maps vertex ids to dense indices ([`index`]) and
//! derives the adjacency it needs from the graph's ordered edge list. All
//! traversals run on an explicit frame stack ([`dfs`]), so recursion depth
//! never depends on graph size.
//!
//! ## Pipeline
//!
//! ```text
//! Graph (cinegraph-core)
//!   ├─ undirected ─→ connectivity::check_connectivity()  → bool / ConnectivityReport
//!   └─ directed ───→ scc::find_sccs()                    → SccResult
//!                        ↓  condensation::build_condensation()
//!                     ReducedGraph (component → components reached)
//!                        ↓  ReducedGraph::topological_order()
//!                     DAG view via petgraph
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use cinegraph_analysis::graph::{build_condensation, find_sccs};
//!
//! let sccs = find_sccs(&graph)?;
//! let reduced = build_condensation(graph.edges(), &sccs.vertex_to_component)?;
//! println!("components={} reduced_edges={}", sccs.component_count(), reduced.edge_count());
//! ```

pub mod condensation;
pub mod connectivity;
pub mod dfs;
pub mod index;
pub mod scc;

// Re-export primary types at module level for convenience.
pub use condensation::{ReducedGraph, build_condensation};
pub use connectivity::{ConnectivityReport, check_connectivity, connectivity_report};
pub use scc::{SccResult, find_sccs};

use cinegraph_core::{Graph, GraphError, Orientation};

/// Fail with [`GraphError::WrongGraphType`] unless `graph` has `expected`
/// orientation.
pub(crate) fn require_orientation(graph: &Graph, expected: Orientation) -> Result<(), GraphError> {
    let actual = graph.orientation();
    if actual == expected {
        Ok(())
    } else {
        Err(GraphError::WrongGraphType { expected, actual })
    }
}
