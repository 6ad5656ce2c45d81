//! Build edges from shared tags.
//!
//! Two movies are related when they share at least one genre. Pairs are
//! visited as `(i, j)` with `i < j` in vertex iteration order, so each pair
//! is considered once and the lower id becomes the edge source.

use tracing::debug;

use crate::error::GraphError;
use crate::model::Graph;

/// Add an edge for every vertex pair sharing a tag.
///
/// Pairs that already have an edge (in either direction for undirected
/// graphs, the `i -> j` direction for directed graphs) are skipped. Returns
/// the number of edges added.
///
/// # Errors
///
/// Any [`GraphError`] from [`Graph::add_edge`]. On error the graph is
/// unchanged.
pub fn link_shared_tags(graph: &mut Graph) -> Result<usize, GraphError> {
    let ids: Vec<String> = graph.vertex_ids().map(str::to_owned).collect();

    let mut pending: Vec<(usize, usize)> = Vec::new();
    for (i, a) in ids.iter().enumerate() {
        for (offset, b) in ids[i + 1..].iter().enumerate() {
            if graph.edge_weight(a, b).is_some() && !graph.contains_edge(a, b) {
                pending.push((i, i + 1 + offset));
            }
        }
    }

    let mut linked = graph.clone();
    for &(i, j) in &pending {
        linked.add_edge(ids[i].as_str(), ids[j].as_str())?;
    }
    *graph = linked;

    let added = pending.len();
    debug!(added, vertices = ids.len(), "linked shared tags");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Orientation};

    fn catalog(orientation: Orientation) -> Graph {
        let mut graph = Graph::new(orientation);
        graph.add_vertex("1", "Heat", [28, 80]).expect("add");
        graph.add_vertex("2", "Toy Story", [16, 35]).expect("add");
        graph.add_vertex("3", "Se7en", [80, 53]).expect("add");
        graph.add_vertex("4", "Up", [16, 12]).expect("add");
        graph.add_vertex("5", "Koyaanisqatsi", [99]).expect("add");
        graph
    }

    #[test]
    fn links_pairs_sharing_a_tag() {
        let mut graph = catalog(Orientation::Undirected);
        let added = link_shared_tags(&mut graph).expect("link");
        assert_eq!(added, 2);
        assert_eq!(graph.edges(), &[Edge::new("1", "3"), Edge::new("2", "4")]);
    }

    #[test]
    fn existing_reverse_edge_is_kept_and_not_duplicated() {
        let mut graph = catalog(Orientation::Undirected);
        graph.add_edge("3", "1").expect("add");
        let added = link_shared_tags(&mut graph).expect("link");
        assert_eq!(added, 1);
        assert_eq!(graph.edges(), &[Edge::new("3", "1"), Edge::new("2", "4")]);
    }

    #[test]
    fn linking_twice_adds_nothing() {
        let mut graph = catalog(Orientation::Directed);
        link_shared_tags(&mut graph).expect("link");
        assert_eq!(link_shared_tags(&mut graph), Ok(0));
    }

    #[test]
    fn untagged_vertices_stay_isolated() {
        let mut graph = Graph::new(Orientation::Undirected);
        graph.add_vertex("a", "A", []).expect("add");
        graph.add_vertex("b", "B", []).expect("add");
        assert_eq!(link_shared_tags(&mut graph), Ok(0));
    }

    #[test]
    fn directed_graph_links_lower_id_to_higher() {
        let mut graph = catalog(Orientation::Directed);
        graph.add_edge("3", "1").expect("add");
        // 3 -> 1 does not cover 1 -> 3 in a directed graph.
        assert_eq!(link_shared_tags(&mut graph), Ok(2));
        assert!(graph.contains_edge("1", "3"));
        assert!(graph.contains_edge("3", "1"));
    }
}
