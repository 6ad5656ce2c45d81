#![forbid(unsafe_code)]
//! cinegraph-analysis library.
//!
//! # Conventions
//!
//! - **Errors**: analyses return `Result<_, cinegraph_core::GraphError>`.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`); entry points are
//!   `#[instrument]`ed with vertex/edge counts.
//! - **Purity**: every analysis borrows the graph immutably and returns an
//!   owned result.

pub mod analyze;
pub mod graph;

pub use analyze::{Analysis, analyze};
pub use graph::{
    ConnectivityReport, ReducedGraph, SccResult, build_condensation, check_connectivity,
    connectivity_report, find_sccs,
};
