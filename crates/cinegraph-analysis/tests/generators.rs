//! Random graph strategies shared by the property tests.

#![allow(dead_code)]

use cinegraph_core::{Graph, Orientation};
use proptest::prelude::*;

/// A graph together with the index-level edges it was built from.
#[derive(Debug, Clone)]
pub struct Sample {
    pub graph: Graph,
    pub n: usize,
    pub edges: Vec<(usize, usize)>,
}

pub fn vertex_id(i: usize) -> String {
    format!("v{i:03}")
}

/// Build a graph over `n` vertices, skipping duplicate edges.
pub fn build(orientation: Orientation, n: usize, raw: &[(usize, usize)]) -> Sample {
    let mut graph = Graph::new(orientation);
    for i in 0..n {
        graph
            .add_vertex(vertex_id(i), format!("Movie {i}"), [])
            .expect("add vertex");
    }
    let mut edges = Vec::new();
    for &(a, b) in raw {
        let (a, b) = (a % n, b % n);
        if graph.contains_edge(&vertex_id(a), &vertex_id(b)) {
            continue;
        }
        graph
            .add_edge(vertex_id(a), vertex_id(b))
            .expect("add edge");
        edges.push((a, b));
    }
    Sample { graph, n, edges }
}

fn arb_sample(orientation: Orientation, max_vertices: usize) -> impl Strategy<Value = Sample> {
    (1..=max_vertices).prop_flat_map(move |n| {
        prop::collection::vec((0..n, 0..n), 0..n * 3)
            .prop_map(move |raw| build(orientation, n, &raw))
    })
}

pub fn arb_directed(max_vertices: usize) -> impl Strategy<Value = Sample> {
    arb_sample(Orientation::Directed, max_vertices)
}

pub fn arb_undirected(max_vertices: usize) -> impl Strategy<Value = Sample> {
    arb_sample(Orientation::Undirected, max_vertices)
}

/// Brute-force reachability matrix: `reach[a][b]` if `b` is reachable from
/// `a` following `edges` forward (every vertex reaches itself).
pub fn reachability(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<bool>> {
    let mut reach = vec![vec![false; n]; n];
    for (a, row) in reach.iter_mut().enumerate() {
        row[a] = true;
    }
    for &(a, b) in edges {
        reach[a][b] = true;
    }
    // Floyd-Warshall closure.
    for k in 0..n {
        for i in 0..n {
            if reach[i][k] {
                for j in 0..n {
                    if reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
    }
    reach
}
