//! Subcommand handlers.
//!
//! Each handler takes its parsed args, the [`GraphFile`] it operates on and
//! the resolved output mode. Mutating commands load, change and save the
//! whole file; a failed mutation never reaches the save.

pub mod analyze;
pub mod cat;
pub mod edge;
pub mod export;
pub mod init;
pub mod link;
pub mod show;
pub mod vertex;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cinegraph_core::Graph;
use cinegraph_core::format::{read_graph, write_graph};
use tracing::debug;

/// Location of the graph file a command works on.
#[derive(Debug, Clone)]
pub struct GraphFile {
    path: PathBuf,
}

impl GraphFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Graph> {
        let graph = read_graph(&self.path)
            .with_context(|| format!("cannot load graph from {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "loaded graph"
        );
        Ok(graph)
    }

    pub fn save(&self, graph: &Graph) -> Result<()> {
        write_graph(&self.path, graph)
            .with_context(|| format!("cannot save graph to {}", self.path.display()))
    }
}
