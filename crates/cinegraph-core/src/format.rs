//! Flat text format for movie graphs.
//!
//! ```text
//! 0                       <- type code (0..=3 undirected, otherwise directed)
//! 3                       <- vertex count
//! 550|Fight Club|18,53    <- id|label|comma-separated tag codes
//! 603|The Matrix|28,878
//! 680|Pulp Fiction|53,80
//! 1                       <- edge count
//! 550 680                 <- source target
//! ```
//!
//! Lines are trimmed before parsing. Blank lines after the last edge are
//! ignored; any other trailing content is rejected. Edges are inserted through
//! [`Graph::add_edge`], so dangling endpoints and duplicate pairs surface as
//! [`ParseError::Structural`] with the offending line number.
//!
//! The label field may itself contain `|`: the id ends at the first separator
//! and the tag list starts after the last one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ErrorCode, GraphError};
use crate::model::{Graph, label_problem, vertex_id_problem};

/// Errors raised while reading, parsing or writing a graph file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: {source}")]
    Structural {
        line: usize,
        #[source]
        source: GraphError,
    },

    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Malformed { .. } => ErrorCode::MalformedGraphFile,
            Self::InvalidField { .. } => ErrorCode::InvalidField,
            Self::Structural { source, .. } => source.code(),
            Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::GraphFileMissing
            }
            Self::Read { .. } => ErrorCode::InternalUnexpected,
            Self::Write { .. } => ErrorCode::GraphFileWriteFailed,
        }
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Check that a vertex id can be written to and read back from the format.
///
/// # Errors
///
/// [`ParseError::InvalidField`] for empty ids or ids containing whitespace
/// or `|`.
pub fn check_vertex_id(id: &str) -> Result<(), ParseError> {
    vertex_id_problem(id).map_or(Ok(()), |reason| {
        Err(ParseError::InvalidField {
            field: "vertex id",
            value: id.to_string(),
            reason,
        })
    })
}

/// Check that a label fits on one line and survives trimming.
///
/// # Errors
///
/// [`ParseError::InvalidField`] for labels with line breaks or surrounding
/// whitespace.
pub fn check_label(label: &str) -> Result<(), ParseError> {
    label_problem(label).map_or(Ok(()), |reason| {
        Err(ParseError::InvalidField {
            field: "label",
            value: label.to_string(),
            reason,
        })
    })
}

/// Parse a comma-separated tag list. Empty entries are skipped.
///
/// # Errors
///
/// [`ParseError::InvalidField`] if an entry is not an unsigned integer.
pub fn parse_tags(raw: &str) -> Result<Vec<u32>, ParseError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| ParseError::InvalidField {
                field: "tag code",
                value: part.to_string(),
                reason: "must be an unsigned integer",
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }

    /// Next trimmed line with its 1-based number.
    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str), ParseError> {
        match self.inner.next() {
            Some((idx, line)) => Ok((idx + 1, line.trim())),
            None => Err(ParseError::Malformed {
                line: 0,
                message: format!("unexpected end of file, expected {expected}"),
            }),
        }
    }

    fn next_number<T: std::str::FromStr>(&mut self, expected: &str) -> Result<T, ParseError> {
        let (line, text) = self.next_line(expected)?;
        text.parse::<T>().map_err(|_| ParseError::Malformed {
            line,
            message: format!("expected {expected}, found '{text}'"),
        })
    }
}

/// Parse a graph from its text form.
///
/// # Errors
///
/// Returns [`ParseError`] with the 1-based line number of the first problem.
pub fn parse_graph(text: &str) -> Result<Graph, ParseError> {
    let mut lines = Lines::new(text);

    let type_code: u32 = lines.next_number("graph type code")?;
    let mut graph = Graph::from_type_code(type_code);

    let vertex_count: usize = lines.next_number("vertex count")?;
    for _ in 0..vertex_count {
        let (line, text) = lines.next_line("vertex line")?;
        let (id, label, tags) = split_vertex_line(text).ok_or_else(|| ParseError::Malformed {
            line,
            message: format!("expected 'id|label|tags', found '{text}'"),
        })?;
        let at_line = |err: ParseError| match err {
            ParseError::InvalidField { field, value, reason } => ParseError::Malformed {
                line,
                message: format!("invalid {field} '{value}': {reason}"),
            },
            other => other,
        };
        let label = label.trim();
        check_vertex_id(id).map_err(at_line)?;
        check_label(label).map_err(at_line)?;
        let tags = parse_tags(tags).map_err(at_line)?;
        graph
            .add_vertex(id, label, tags)
            .map_err(|source| ParseError::Structural { line, source })?;
    }

    let edge_count: usize = lines.next_number("edge count")?;
    for _ in 0..edge_count {
        let (line, text) = lines.next_line("edge line")?;
        let mut parts = text.split_whitespace();
        let (Some(source), Some(target), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseError::Malformed {
                line,
                message: format!("expected 'source target', found '{text}'"),
            });
        };
        graph
            .add_edge(source, target)
            .map_err(|source| ParseError::Structural { line, source })?;
    }

    for (idx, rest) in lines.inner {
        if !rest.trim().is_empty() {
            return Err(ParseError::Malformed {
                line: idx + 1,
                message: format!("unexpected content after {edge_count} edges"),
            });
        }
    }

    debug!(
        type_code,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "parsed graph"
    );
    Ok(graph)
}

fn split_vertex_line(text: &str) -> Option<(&str, &str, &str)> {
    let (id, rest) = text.split_once('|')?;
    let (label, tags) = rest.rsplit_once('|')?;
    Some((id.trim(), label, tags))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a graph in the text format.
#[must_use]
pub fn render_graph(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", graph.type_code()));
    out.push_str(&format!("{}\n", graph.vertex_count()));
    for vertex in graph.vertices() {
        let tags: Vec<String> = vertex.tags.iter().map(u32::to_string).collect();
        out.push_str(&format!("{}|{}|{}\n", vertex.id, vertex.label, tags.join(",")));
    }
    out.push_str(&format!("{}\n", graph.edge_count()));
    for edge in graph.edges() {
        out.push_str(&format!("{} {}\n", edge.source, edge.target));
    }
    out
}

/// Render the extended edge list: one `source-(weight)-target` line per edge,
/// or `source-target` when the endpoints share no tag.
///
/// Weights are derived from the tags at call time.
#[must_use]
pub fn render_weighted_edge_list(graph: &Graph) -> String {
    let mut out = String::new();
    for edge in graph.edges() {
        match graph.edge_weight(&edge.source, &edge.target) {
            Some(weight) => out.push_str(&format!("{}-({weight})-{}\n", edge.source, edge.target)),
            None => out.push_str(&format!("{}-{}\n", edge.source, edge.target)),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read and parse a graph file.
///
/// # Errors
///
/// [`ParseError::Read`] on I/O failure, otherwise any parse error.
pub fn read_graph(path: &Path) -> Result<Graph, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(&text)
}

/// Write a graph file, replacing any existing file atomically.
///
/// # Errors
///
/// [`ParseError::Write`] on I/O failure.
pub fn write_graph(path: &Path, graph: &Graph) -> Result<(), ParseError> {
    write_atomic(path, &render_graph(graph))
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
///
/// # Errors
///
/// [`ParseError::Write`] on I/O failure.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ParseError> {
    let wrap = |source: std::io::Error| ParseError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp_name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, contents).map_err(wrap)?;
    fs::rename(&tmp, path).map_err(wrap)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Orientation};

    const SAMPLE: &str = "\
0
3
550|Fight Club|18,53
603|The Matrix|28,878
680|Pulp Fiction|53,80
1
550 680
";

    #[test]
    fn parses_sample_file() {
        let graph = parse_graph(SAMPLE).expect("parse");
        assert_eq!(graph.orientation(), Orientation::Undirected);
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edges(), &[Edge::new("550", "680")]);
        let matrix = graph.vertex("603").expect("vertex");
        assert_eq!(matrix.label, "The Matrix");
        assert!(matrix.tags.contains(&878));
    }

    #[test]
    fn render_round_trips() {
        let graph = parse_graph(SAMPLE).expect("parse");
        assert_eq!(render_graph(&graph), SAMPLE);
    }

    #[test]
    fn directed_type_code_preserved() {
        let text = "6\n2\na|A|\nb|B|1\n2\na b\nb a\n";
        let graph = parse_graph(text).expect("parse");
        assert_eq!(graph.orientation(), Orientation::Directed);
        assert_eq!(graph.type_code(), 6);
        assert!(graph.vertex("a").expect("a").tags.is_empty());
        assert_eq!(render_graph(&graph), text);
    }

    #[test]
    fn label_may_contain_separator() {
        let graph = parse_graph("0\n1\n7|Me | You|35\n0\n").expect("parse");
        assert_eq!(graph.vertex("7").expect("vertex").label, "Me | You");
    }

    #[test]
    fn surrounding_whitespace_and_trailing_blank_lines_ignored() {
        let graph = parse_graph("  0 \n1\n 1|One|1 \n0\n\n\n").expect("parse");
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn truncated_file_is_malformed() {
        let err = parse_graph("0\n2\n1|One|1\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 0, .. }), "{err}");
    }

    #[test]
    fn bad_count_reports_line() {
        let err = parse_graph("0\nthree\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 2, .. }), "{err}");
        assert_eq!(err.code(), ErrorCode::MalformedGraphFile);
    }

    #[test]
    fn bad_tag_reports_line() {
        let err = parse_graph("0\n1\n1|One|1,x\n0\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 3, .. }), "{err}");
    }

    #[test]
    fn dangling_edge_is_structural() {
        let err = parse_graph("0\n1\n1|One|1\n1\n1 2\n").unwrap_err();
        match err {
            ParseError::Structural { line, source } => {
                assert_eq!(line, 5);
                assert_eq!(source, GraphError::UnknownVertex("2".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_undirected_edge_is_structural() {
        let err = parse_graph("0\n2\n1|One|1\n2|Two|1\n2\n1 2\n2 1\n").unwrap_err();
        assert!(matches!(err, ParseError::Structural { line: 7, .. }), "{err}");
        assert_eq!(err.code(), ErrorCode::DuplicateEdge);
    }

    #[test]
    fn edge_line_with_extra_token_is_malformed() {
        let err = parse_graph("0\n2\n1|One|1\n2|Two|1\n1\n1 2 3\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 6, .. }), "{err}");
    }

    #[test]
    fn trailing_content_rejected() {
        let err = parse_graph("0\n0\n0\nextra\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 4, .. }), "{err}");
    }

    #[test]
    fn weighted_edge_list_uses_smallest_shared_tag() {
        let mut graph = parse_graph(SAMPLE).expect("parse");
        graph.add_edge("550", "603").expect("add");
        assert_eq!(
            render_weighted_edge_list(&graph),
            "550-(53)-680\n550-603\n"
        );
    }

    #[test]
    fn vertex_id_checks() {
        assert!(check_vertex_id("550").is_ok());
        assert!(check_vertex_id("").is_err());
        assert!(check_vertex_id("a b").is_err());
        assert!(check_vertex_id("a|b").is_err());
        assert!(check_label("Fight Club").is_ok());
        assert!(check_label("two\nlines").is_err());
        assert!(check_label(" padded").is_err());
        assert_eq!(check_vertex_id("").unwrap_err().code(), ErrorCode::InvalidField);
    }

    #[test]
    fn parse_tags_skips_empty_entries() {
        assert_eq!(parse_tags("28, 12,,").expect("tags"), vec![28, 12]);
        assert!(parse_tags("").expect("tags").is_empty());
        assert!(parse_tags("-1").is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("grafo.txt");
        let graph = parse_graph(SAMPLE).expect("parse");
        write_graph(&path, &graph).expect("write");
        let loaded = read_graph(&path).expect("read");
        assert_eq!(loaded, graph);
    }

    #[test]
    fn api_built_graph_survives_save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("grafo.txt");
        let mut graph = Graph::new(Orientation::Directed);
        assert!(graph.add_vertex("The Matrix", "x", [1]).is_err());
        assert!(graph.add_vertex("b", "  Padded  ", [1]).is_err());
        graph.add_vertex("603", "The Matrix", [28, 878]).expect("add");
        graph.add_vertex("b", "Padded | Inside", []).expect("add");
        graph.add_edge("b", "603").expect("add");

        write_graph(&path, &graph).expect("write");
        assert_eq!(read_graph(&path).expect("read"), graph);
    }

    #[test]
    fn lone_carriage_return_in_label_is_malformed() {
        let err = parse_graph("0\n1\n1|One\rTwo|1\n0\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 3, .. }), "{err}");
    }

    #[test]
    fn missing_file_maps_to_missing_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_graph(&dir.path().join("absent.txt")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::GraphFileMissing);
    }
}
