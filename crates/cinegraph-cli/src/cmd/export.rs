use anyhow::{Context as _, Result};
use cinegraph_core::format::{render_weighted_edge_list, write_atomic};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::GraphFile;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output path. Defaults to `[export] file` from the project config.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    path: String,
    edges: usize,
}

/// Execute `cg export`: write the weighted edge list for online graph
/// viewers, one `u-(w)-v` or `u-v` line per edge.
///
/// # Errors
///
/// Returns an error if the graph cannot be loaded or the list cannot be
/// written.
pub fn run_export(
    args: &ExportArgs,
    file: &GraphFile,
    default_out: &Path,
    output: OutputMode,
) -> Result<()> {
    let graph = file.load()?;
    let out = args.out.as_deref().unwrap_or(default_out);
    write_atomic(out, &render_weighted_edge_list(&graph))
        .with_context(|| format!("cannot export edge list to {}", out.display()))?;

    let report = ExportReport {
        path: out.display().to_string(),
        edges: graph.edge_count(),
    };
    render(output, &report, |r, w| {
        writeln!(w, "✓ Exported {} edge(s) to {}", r.edges, r.path)
    })
}
