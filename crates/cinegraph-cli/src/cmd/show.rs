//! `cg show`: adjacency listing of the whole graph.

use anyhow::Result;
use cinegraph_core::{Graph, Orientation};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

use super::GraphFile;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct Listing {
    type_code: u32,
    orientation: Orientation,
    vertex_count: usize,
    edge_count: usize,
    vertices: Vec<ListedVertex>,
}

#[derive(Debug, Serialize)]
struct ListedVertex {
    id: String,
    label: String,
    tags: BTreeSet<u32>,
    /// Outgoing neighbors for directed graphs, all neighbors otherwise.
    neighbors: Vec<String>,
}

fn listing(graph: &Graph) -> Listing {
    let adjacency = graph.adjacency_list();
    let vertices = graph
        .vertices()
        .map(|vertex| ListedVertex {
            id: vertex.id.clone(),
            label: vertex.label.clone(),
            tags: vertex.tags.clone(),
            neighbors: adjacency
                .get(vertex.id.as_str())
                .map(|list| list.iter().map(|id| (*id).to_owned()).collect())
                .unwrap_or_default(),
        })
        .collect();
    Listing {
        type_code: graph.type_code(),
        orientation: graph.orientation(),
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        vertices,
    }
}

fn join_tags(tags: &BTreeSet<u32>) -> String {
    tags.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
}

const fn arrow(orientation: Orientation) -> &'static str {
    if orientation.is_directed() { "->" } else { "--" }
}

/// Execute `cg show`.
///
/// # Errors
///
/// Returns an error if the graph file cannot be loaded.
pub fn run_show(file: &GraphFile, output: OutputMode) -> Result<()> {
    let graph = file.load()?;
    let listing = listing(&graph);

    render_mode(
        output,
        &listing,
        |l, w| {
            for vertex in &l.vertices {
                writeln!(w, "{}: {}", vertex.id, vertex.neighbors.join(" "))?;
            }
            Ok(())
        },
        |l, w| {
            pretty_section(w, &format!("Movie graph ({})", l.orientation))?;
            pretty_kv(w, "Type code", l.type_code.to_string())?;
            pretty_kv(w, "Vertices", l.vertex_count.to_string())?;
            pretty_kv(w, "Edges", l.edge_count.to_string())?;
            pretty_rule(w)?;
            for vertex in &l.vertices {
                writeln!(w, "{} {} [{}]", vertex.id, vertex.label, join_tags(&vertex.tags))?;
                for neighbor in &vertex.neighbors {
                    writeln!(w, "    {} {neighbor}", arrow(l.orientation))?;
                }
            }
            Ok(())
        },
    )
}
