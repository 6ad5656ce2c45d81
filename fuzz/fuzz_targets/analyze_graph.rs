#![no_main]

use cinegraph_analysis::{Analysis, analyze};
use cinegraph_core::format::parse_graph;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph) = parse_graph(text) else {
        return;
    };
    match analyze(&graph).expect("parsed graphs always analyze") {
        Analysis::Undirected(report) => assert!(report.reached <= report.total),
        Analysis::Directed { sccs, reduced } => {
            assert_eq!(sccs.vertex_to_component.len(), graph.vertex_count());
            assert!(!reduced.has_self_loop());
            assert!(reduced.is_acyclic(sccs.component_count()));
        }
    }
});
