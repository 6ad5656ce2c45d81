//! `cg edge add` and `cg edge rm`.

use anyhow::{Context as _, Result};
use cinegraph_core::Orientation;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write;
use tracing::info;

use super::GraphFile;
use crate::output::{OutputMode, render};

#[derive(Subcommand, Debug)]
pub enum EdgeCommand {
    /// Insert an edge between two existing vertices.
    Add(EdgeArgs),
    /// Remove an edge. For undirected graphs either endpoint order works.
    #[command(alias = "remove")]
    Rm(EdgeArgs),
}

#[derive(Args, Debug)]
pub struct EdgeArgs {
    /// Source vertex id.
    pub source: String,
    /// Target vertex id.
    pub target: String,
}

#[derive(Debug, Serialize)]
struct EdgeChange {
    action: &'static str,
    source: String,
    target: String,
    orientation: Orientation,
    /// Smallest shared tag code, derived from current tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
}

impl EdgeChange {
    const fn connector(&self) -> &'static str {
        if self.orientation.is_directed() { "->" } else { "--" }
    }
}

pub fn run_edge(command: &EdgeCommand, file: &GraphFile, output: OutputMode) -> Result<()> {
    let mut graph = file.load()?;

    let change = match command {
        EdgeCommand::Add(args) => {
            graph
                .add_edge(args.source.as_str(), args.target.as_str())
                .with_context(|| format!("cannot add edge {} {}", args.source, args.target))?;
            EdgeChange {
                action: "added",
                weight: graph.edge_weight(&args.source, &args.target),
                source: args.source.clone(),
                target: args.target.clone(),
                orientation: graph.orientation(),
            }
        }
        EdgeCommand::Rm(args) => {
            let edge = graph
                .remove_edge(&args.source, &args.target)
                .with_context(|| format!("cannot remove edge {} {}", args.source, args.target))?;
            EdgeChange {
                action: "removed",
                weight: None,
                source: edge.source,
                target: edge.target,
                orientation: graph.orientation(),
            }
        }
    };

    file.save(&graph)?;
    info!(action = change.action, source = %change.source, target = %change.target, "edge changed");

    render(output, &change, |c, w| {
        write!(w, "✓ {} edge {} {} {}", capitalize(c.action), c.source, c.connector(), c.target)?;
        match c.weight {
            Some(weight) => writeln!(w, " (weight {weight})"),
            None => writeln!(w),
        }
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
