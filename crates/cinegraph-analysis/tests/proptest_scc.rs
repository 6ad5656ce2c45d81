use std::collections::BTreeSet;

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use proptest::prelude::*;

use cinegraph_analysis::{
    Analysis, analyze, build_condensation, check_connectivity, connectivity_report, find_sccs,
};

#[path = "generators.rs"]
mod generators;
use generators::*;

fn oracle_partition(sample: &Sample) -> BTreeSet<BTreeSet<String>> {
    let mut digraph = DiGraph::<usize, ()>::with_capacity(sample.n, sample.edges.len());
    for i in 0..sample.n {
        digraph.add_node(i);
    }
    for &(a, b) in &sample.edges {
        digraph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
    kosaraju_scc(&digraph)
        .into_iter()
        .map(|component| component.into_iter().map(|idx| vertex_id(idx.index())).collect())
        .collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    // Every vertex lands in exactly one component and the mapping agrees
    // with the component lists.
    #[test]
    fn components_partition_vertices(sample in arb_directed(24)) {
        let result = find_sccs(&sample.graph).expect("sccs");

        let total: usize = result.components.iter().map(BTreeSet::len).sum();
        prop_assert_eq!(total, sample.n);
        prop_assert_eq!(result.vertex_to_component.len(), sample.n);
        prop_assert!(result.components.iter().all(|c| !c.is_empty()));

        for (idx, component) in result.components.iter().enumerate() {
            for id in component {
                prop_assert_eq!(result.component_of(id), Some(idx));
            }
        }
    }

    #[test]
    fn same_component_iff_mutually_reachable(sample in arb_directed(16)) {
        let result = find_sccs(&sample.graph).expect("sccs");
        let reach = reachability(sample.n, &sample.edges);

        for a in 0..sample.n {
            for b in 0..sample.n {
                let mutual = reach[a][b] && reach[b][a];
                prop_assert_eq!(
                    result.same_component(&vertex_id(a), &vertex_id(b)),
                    mutual,
                    "{} vs {}", a, b
                );
            }
        }
    }

    #[test]
    fn partition_matches_petgraph(sample in arb_directed(40)) {
        let result = find_sccs(&sample.graph).expect("sccs");
        prop_assert_eq!(result.partition(), oracle_partition(&sample));
    }

    #[test]
    fn rerun_gives_same_partition(sample in arb_directed(24)) {
        let first = find_sccs(&sample.graph).expect("sccs");
        let second = find_sccs(&sample.graph).expect("sccs");
        prop_assert_eq!(first.partition(), second.partition());
    }

    #[test]
    fn condensation_is_loop_free_and_acyclic(sample in arb_directed(24)) {
        let result = find_sccs(&sample.graph).expect("sccs");
        let reduced = build_condensation(sample.graph.edges(), &result.vertex_to_component)
            .expect("condensation");

        prop_assert!(!reduced.has_self_loop());
        prop_assert!(reduced.is_acyclic(result.component_count()));

        let order = reduced
            .topological_order(result.component_count())
            .expect("topological order");
        prop_assert_eq!(order.len(), result.component_count());
    }

    // A reduced edge exists exactly when some original edge crosses the two
    // components.
    #[test]
    fn condensation_edges_come_from_crossing_edges(sample in arb_directed(20)) {
        let result = find_sccs(&sample.graph).expect("sccs");
        let reduced = build_condensation(sample.graph.edges(), &result.vertex_to_component)
            .expect("condensation");

        let expected: BTreeSet<(usize, usize)> = sample
            .edges
            .iter()
            .filter_map(|&(a, b)| {
                let ca = result.component_of(&vertex_id(a))?;
                let cb = result.component_of(&vertex_id(b))?;
                (ca != cb).then_some((ca, cb))
            })
            .collect();
        let actual: BTreeSet<(usize, usize)> = reduced
            .iter()
            .flat_map(|(c, targets)| targets.iter().map(move |t| (c, *t)))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn connectivity_matches_brute_force(sample in arb_undirected(20)) {
        let both: Vec<(usize, usize)> = sample
            .edges
            .iter()
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect();
        let reach = reachability(sample.n, &both);
        let expected = reach[0].iter().all(|&r| r);

        prop_assert_eq!(check_connectivity(&sample.graph).expect("connectivity"), expected);

        let report = connectivity_report(&sample.graph).expect("report");
        prop_assert_eq!(report.reached, reach[0].iter().filter(|&&r| r).count());
        prop_assert_eq!(report.anchor, Some(vertex_id(0)));
    }

    #[test]
    fn analyze_dispatches_on_orientation(sample in arb_directed(12)) {
        match analyze(&sample.graph).expect("analyze") {
            Analysis::Directed { sccs, reduced } => {
                prop_assert_eq!(sccs.partition(), oracle_partition(&sample));
                prop_assert!(!reduced.has_self_loop());
            }
            Analysis::Undirected(_) => prop_assert!(false, "directed graph analyzed as undirected"),
        }
    }
}
