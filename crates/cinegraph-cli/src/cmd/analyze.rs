//! `cg analyze`: connectivity for undirected graphs, strongly connected
//! components and the reduced graph for directed ones.

use anyhow::{Context as _, Result};
use cinegraph_analysis::{Analysis, ConnectivityReport, ReducedGraph, SccResult, analyze};
use serde::Serialize;
use std::io::{self, Write};

use super::GraphFile;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// JSON payload: the analysis plus the reduced graph's topological order
/// when there is one.
#[derive(Debug, Serialize)]
struct AnalyzeReport {
    #[serde(flatten)]
    analysis: Analysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    topological_order: Option<Vec<usize>>,
}

fn write_connectivity(w: &mut dyn Write, report: &ConnectivityReport) -> io::Result<()> {
    let verdict = if report.is_connected() {
        "connected"
    } else {
        "disconnected"
    };
    writeln!(w, "{verdict} {}/{}", report.reached, report.total)
}

fn write_components(w: &mut dyn Write, sccs: &SccResult) -> io::Result<()> {
    for (idx, component) in sccs.components.iter().enumerate() {
        let members: Vec<&str> = component.iter().map(String::as_str).collect();
        writeln!(w, "{idx}: {}", members.join(" "))?;
    }
    Ok(())
}

fn write_reduced(w: &mut dyn Write, reduced: &ReducedGraph) -> io::Result<()> {
    for (component, targets) in reduced.iter() {
        let targets: Vec<String> = targets.iter().map(usize::to_string).collect();
        writeln!(w, "{component} -> {}", targets.join(" "))?;
    }
    Ok(())
}

fn text(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    match &report.analysis {
        Analysis::Undirected(connectivity) => write_connectivity(w, connectivity),
        Analysis::Directed { sccs, reduced } => {
            writeln!(w, "components {}", sccs.component_count())?;
            write_components(w, sccs)?;
            writeln!(w, "reduced edges {}", reduced.edge_count())?;
            write_reduced(w, reduced)
        }
    }
}

fn pretty(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    match &report.analysis {
        Analysis::Undirected(connectivity) => {
            pretty_section(w, "Connectivity")?;
            pretty_kv(
                w,
                "Anchor",
                connectivity.anchor.as_deref().unwrap_or("(empty graph)"),
            )?;
            pretty_kv(
                w,
                "Reached",
                format!(
                    "{}/{} ({:.0}%)",
                    connectivity.reached,
                    connectivity.total,
                    connectivity.ratio() * 100.0
                ),
            )?;
            let verdict = if connectivity.is_connected() {
                "✓ graph is connected"
            } else {
                "✗ graph is not connected"
            };
            writeln!(w, "{verdict}")
        }
        Analysis::Directed { sccs, reduced } => {
            pretty_section(w, "Strongly connected components")?;
            pretty_kv(w, "Components", sccs.component_count().to_string())?;
            if sccs.is_strongly_connected() {
                writeln!(w, "✓ graph is strongly connected")?;
            }
            pretty_rule(w)?;
            write_components(w, sccs)?;
            writeln!(w)?;
            pretty_section(w, "Reduced graph")?;
            pretty_kv(w, "Edges", reduced.edge_count().to_string())?;
            if let Some(order) = &report.topological_order {
                let order: Vec<String> = order.iter().map(usize::to_string).collect();
                pretty_kv(w, "Order", order.join(" "))?;
            }
            pretty_rule(w)?;
            write_reduced(w, reduced)
        }
    }
}

/// Execute `cg analyze`.
///
/// # Errors
///
/// Returns an error if the graph file cannot be loaded or the analysis
/// fails.
pub fn run_analyze(file: &GraphFile, output: OutputMode) -> Result<()> {
    let graph = file.load()?;
    let analysis = analyze(&graph).context("analysis failed")?;
    let topological_order = match &analysis {
        Analysis::Directed { sccs, reduced } => reduced.topological_order(sccs.component_count()),
        Analysis::Undirected(_) => None,
    };

    let report = AnalyzeReport {
        analysis,
        topological_order,
    };
    render_mode(output, &report, text, pretty)
}
