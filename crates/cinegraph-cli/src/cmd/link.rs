use anyhow::{Context as _, Result};
use cinegraph_core::link::link_shared_tags;
use serde::Serialize;
use std::io::Write;
use tracing::info;

use super::GraphFile;
use crate::output::{OutputMode, render};

#[derive(Debug, Serialize)]
struct LinkReport {
    added: usize,
    edge_count: usize,
}

/// Execute `cg link`: connect every pair of movies sharing a genre tag.
///
/// The file is rewritten only when at least one edge was added.
///
/// # Errors
///
/// Returns an error if the graph cannot be loaded, linked or saved.
pub fn run_link(file: &GraphFile, output: OutputMode) -> Result<()> {
    let mut graph = file.load()?;
    let added = link_shared_tags(&mut graph).context("cannot link shared tags")?;
    if added > 0 {
        file.save(&graph)?;
    }
    info!(added, "linked shared tags");

    let report = LinkReport {
        added,
        edge_count: graph.edge_count(),
    };
    render(output, &report, |r, w| {
        writeln!(w, "✓ Linked {} new edge(s), {} total", r.added, r.edge_count)
    })
}
