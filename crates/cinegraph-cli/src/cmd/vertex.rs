//! `cg vertex add` and `cg vertex rm`.

use anyhow::{Context as _, Result};
use cinegraph_core::format::{check_label, check_vertex_id, parse_tags};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::info;

use super::GraphFile;
use crate::output::{OutputMode, render};

#[derive(Subcommand, Debug)]
pub enum VertexCommand {
    /// Insert a movie.
    Add(VertexAddArgs),
    /// Remove a movie and every edge touching it.
    #[command(alias = "remove")]
    Rm(VertexRmArgs),
}

#[derive(Args, Debug)]
pub struct VertexAddArgs {
    /// Vertex id (no whitespace or `|`).
    pub id: String,

    /// Display label.
    #[arg(long, short)]
    pub label: String,

    /// Comma-separated genre tag codes, e.g. `28,80`.
    #[arg(long, short, default_value = "")]
    pub tags: String,
}

#[derive(Args, Debug)]
pub struct VertexRmArgs {
    /// Vertex id.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct VertexAdded {
    id: String,
    label: String,
    tags: BTreeSet<u32>,
}

#[derive(Debug, Serialize)]
struct VertexRemoved {
    id: String,
    label: String,
    removed_edges: usize,
}

pub fn run_vertex(command: &VertexCommand, file: &GraphFile, output: OutputMode) -> Result<()> {
    match command {
        VertexCommand::Add(args) => run_add(args, file, output),
        VertexCommand::Rm(args) => run_rm(args, file, output),
    }
}

fn run_add(args: &VertexAddArgs, file: &GraphFile, output: OutputMode) -> Result<()> {
    check_vertex_id(&args.id)?;
    let label = args.label.trim();
    check_label(label)?;
    let tags = parse_tags(&args.tags)?;

    let mut graph = file.load()?;
    graph
        .add_vertex(args.id.as_str(), label, tags)
        .with_context(|| format!("cannot add vertex '{}'", args.id))?;
    file.save(&graph)?;

    let added = graph
        .vertex(&args.id)
        .map(|vertex| VertexAdded {
            id: vertex.id.clone(),
            label: vertex.label.clone(),
            tags: vertex.tags.clone(),
        })
        .context("vertex missing after insert")?;
    info!(id = %added.id, "vertex added");

    render(output, &added, |v, w| {
        writeln!(w, "✓ Added vertex {} ({})", v.id, v.label)
    })
}

fn run_rm(args: &VertexRmArgs, file: &GraphFile, output: OutputMode) -> Result<()> {
    let mut graph = file.load()?;
    let (vertex, removed_edges) = graph
        .remove_vertex(&args.id)
        .with_context(|| format!("cannot remove vertex '{}'", args.id))?;
    file.save(&graph)?;
    info!(id = %vertex.id, removed_edges, "vertex removed");

    let removed = VertexRemoved {
        id: vertex.id,
        label: vertex.label,
        removed_edges,
    };
    render(output, &removed, |v, w| {
        writeln!(
            w,
            "✓ Removed vertex {} ({}) and {} edge(s)",
            v.id, v.label, v.removed_edges
        )
    })
}
