//! Iterative depth-first search over an [`Adjacency`].
//!
//! Each stack frame is `(vertex, next neighbor position)`, so a traversal can
//! be suspended at any neighbor and resumed after a child finishes. Visit
//! order matches the recursive formulation exactly: neighbors are tried in
//! adjacency order and a vertex finishes only after all its descendants.

use super::index::Adjacency;

/// Traverse everything reachable from `root` that is not yet `visited`.
///
/// `on_enter` runs when a vertex is first discovered (preorder) and
/// `on_finish` when all its descendants are done (postorder). Vertices
/// already marked in `visited` are neither entered nor expanded; if `root`
/// itself is visited this is a no-op.
///
/// # Panics
///
/// Panics if `visited` is shorter than the adjacency.
pub fn depth_first(
    adjacency: &Adjacency,
    root: usize,
    visited: &mut [bool],
    mut on_enter: impl FnMut(usize),
    mut on_finish: impl FnMut(usize),
) {
    if visited[root] {
        return;
    }
    visited[root] = true;
    on_enter(root);

    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    while let Some(frame) = stack.last_mut() {
        let (vertex, next) = *frame;
        if let Some(&neighbor) = adjacency.neighbors(vertex).get(next) {
            frame.1 += 1;
            if !visited[neighbor] {
                visited[neighbor] = true;
                on_enter(neighbor);
                stack.push((neighbor, 0));
            }
        } else {
            stack.pop();
            on_finish(vertex);
        }
    }
}

/// Vertices reachable from `root`, in discovery order.
#[must_use]
pub fn reachable_from(adjacency: &Adjacency, root: usize) -> Vec<usize> {
    let mut visited = vec![false; adjacency.len()];
    let mut reached = Vec::new();
    depth_first(adjacency, root, &mut visited, |v| reached.push(v), |_| {});
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::index::{Traversal, VertexIndex};
    use cinegraph_core::{Graph, Orientation};

    fn directed(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new(Orientation::Directed);
        for id in ids {
            graph.add_vertex(*id, *id, []).expect("add vertex");
        }
        for (a, b) in edges {
            graph.add_edge(*a, *b).expect("add edge");
        }
        graph
    }

    fn forward(graph: &Graph) -> Adjacency {
        Adjacency::build(graph, &VertexIndex::new(graph), Traversal::Forward)
    }

    #[test]
    fn preorder_and_postorder_match_recursive_dfs() {
        // a → b → d, a → c
        let graph = directed(&["a", "b", "c", "d"], &[("a", "b"), ("b", "d"), ("a", "c")]);
        let adjacency = forward(&graph);

        let mut visited = vec![false; 4];
        let mut pre = Vec::new();
        let mut post = Vec::new();
        depth_first(&adjacency, 0, &mut visited, |v| pre.push(v), |v| post.push(v));

        assert_eq!(pre, vec![0, 1, 3, 2]);
        assert_eq!(post, vec![3, 1, 2, 0]);
    }

    #[test]
    fn cycles_terminate() {
        let graph = directed(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(reachable_from(&forward(&graph), 1), vec![1, 2, 0]);
    }

    #[test]
    fn visited_root_is_noop() {
        let graph = directed(&["a", "b"], &[("a", "b")]);
        let adjacency = forward(&graph);
        let mut visited = vec![true, false];
        let mut entered = 0;
        depth_first(&adjacency, 0, &mut visited, |_| entered += 1, |_| {});
        assert_eq!(entered, 0);
        assert!(!visited[1]);
    }

    #[test]
    fn self_loop_is_harmless() {
        let graph = directed(&["a"], &[("a", "a")]);
        assert_eq!(reachable_from(&forward(&graph), 0), vec![0]);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let n = 200_000;
        let ids: Vec<String> = (0..n).map(|i| format!("v{i:06}")).collect();
        let mut graph = Graph::new(Orientation::Directed);
        for id in &ids {
            graph.add_vertex(id.as_str(), "", []).expect("add vertex");
        }
        for pair in ids.windows(2) {
            graph.add_edge(pair[0].as_str(), pair[1].as_str()).expect("add edge");
        }
        assert_eq!(reachable_from(&forward(&graph), 0).len(), n);
    }
}
