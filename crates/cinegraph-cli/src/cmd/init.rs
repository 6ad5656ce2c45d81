use anyhow::Result;
use cinegraph_core::{Graph, Orientation};
use clap::Args;
use serde::Serialize;
use std::io::Write;

use super::GraphFile;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Create a directed graph (type code 4).
    #[arg(long, conflicts_with = "type_code")]
    pub directed: bool,

    /// Explicit graph type code: 0-3 undirected, anything else directed.
    #[arg(long)]
    pub type_code: Option<u32>,

    /// Overwrite an existing graph file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    fn type_code(&self) -> u32 {
        self.type_code.unwrap_or_else(|| {
            let orientation = if self.directed {
                Orientation::Directed
            } else {
                Orientation::Undirected
            };
            orientation.default_type_code()
        })
    }
}

#[derive(Debug, Serialize)]
struct InitReport {
    path: String,
    type_code: u32,
    orientation: Orientation,
}

/// Execute `cg init`: write an empty graph file.
///
/// # Errors
///
/// Returns an error if the file exists and `--force` is not set, or if the
/// write fails.
pub fn run_init(args: &InitArgs, file: &GraphFile, output: OutputMode) -> Result<()> {
    if file.path().exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use `cg init --force` to overwrite it.",
            file.path().display()
        );
    }

    let graph = Graph::from_type_code(args.type_code());
    file.save(&graph)?;

    let report = InitReport {
        path: file.path().display().to_string(),
        type_code: graph.type_code(),
        orientation: graph.orientation(),
    };
    render(output, &report, |r, w| {
        writeln!(
            w,
            "✓ Initialized {} graph in {} (type code {})",
            r.orientation, r.path, r.type_code
        )
    })
}
