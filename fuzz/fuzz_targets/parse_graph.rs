#![no_main]

use cinegraph_core::format::{parse_graph, render_graph};
use libfuzzer_sys::fuzz_target;

// Anything that parses must render to text that parses to the same graph.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph) = parse_graph(text) else {
        return;
    };
    let rendered = render_graph(&graph);
    let reparsed = parse_graph(&rendered).expect("rendered graph must parse");
    assert_eq!(graph, reparsed);
});
