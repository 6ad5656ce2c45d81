use std::fmt;

use crate::model::Orientation;

/// Machine-readable error codes for scripts and JSON consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    GraphFileMissing,
    ConfigParseError,
    MalformedGraphFile,
    InvalidField,
    DuplicateVertex,
    VertexNotFound,
    UnknownVertex,
    DuplicateEdge,
    EdgeNotFound,
    WrongGraphType,
    GraphFileWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GraphFileMissing => "E1001",
            Self::ConfigParseError => "E1002",
            Self::MalformedGraphFile => "E1003",
            Self::InvalidField => "E1004",
            Self::DuplicateVertex => "E2001",
            Self::VertexNotFound => "E2002",
            Self::UnknownVertex => "E2003",
            Self::DuplicateEdge => "E2004",
            Self::EdgeNotFound => "E2005",
            Self::WrongGraphType => "E3001",
            Self::GraphFileWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::GraphFileMissing => "Graph file not found",
            Self::ConfigParseError => "Config file parse error",
            Self::MalformedGraphFile => "Malformed graph file",
            Self::InvalidField => "Invalid vertex id, label or tag list",
            Self::DuplicateVertex => "Vertex already exists",
            Self::VertexNotFound => "Vertex not found",
            Self::UnknownVertex => "Edge endpoint does not exist",
            Self::DuplicateEdge => "Edge already exists",
            Self::EdgeNotFound => "Edge not found",
            Self::WrongGraphType => "Analysis does not apply to this graph type",
            Self::GraphFileWriteFailed => "Graph file write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users and scripts.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::GraphFileMissing => Some("Run `cg init` or pass `--file` to point at an existing graph."),
            Self::ConfigParseError => Some("Fix syntax in .cinegraph/config.toml and retry."),
            Self::MalformedGraphFile => {
                Some("Check the header counts and the `id|label|tags` / `u v` line shapes.")
            }
            Self::InvalidField => Some(
                "Ids take no whitespace or `|`, labels fit on one line without surrounding spaces, tags are unsigned integers.",
            ),
            Self::DuplicateVertex => Some("Pick an unused vertex id."),
            Self::VertexNotFound | Self::EdgeNotFound => None,
            Self::UnknownVertex => Some("Add both endpoints with `cg vertex add` first."),
            Self::DuplicateEdge => {
                Some("Undirected graphs store each pair once; the reverse edge already counts.")
            }
            Self::WrongGraphType => {
                Some("Connectivity applies to undirected graphs, SCCs to directed graphs.")
            }
            Self::GraphFileWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised by graph mutation and analysis.
///
/// Structural variants are always recoverable: the graph is left untouched
/// and the caller may retry with corrected input. [`GraphError::WrongGraphType`]
/// is fatal to the call that raised it, never to the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("vertex '{0}' already exists")]
    DuplicateVertex(String),

    #[error("vertex '{0}' not found")]
    VertexNotFound(String),

    #[error("edge endpoint '{0}' does not exist")]
    UnknownVertex(String),

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },

    #[error("edge {from} -> {to} not found")]
    EdgeNotFound { from: String, to: String },

    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("expected {expected} graph, found {actual} graph")]
    WrongGraphType {
        expected: Orientation,
        actual: Orientation,
    },
}

impl GraphError {
    /// Returns `true` for duplicate/missing vertex or edge errors.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DuplicateVertex(_)
                | Self::VertexNotFound(_)
                | Self::UnknownVertex(_)
                | Self::DuplicateEdge { .. }
                | Self::EdgeNotFound { .. }
        )
    }

    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateVertex(_) => ErrorCode::DuplicateVertex,
            Self::VertexNotFound(_) => ErrorCode::VertexNotFound,
            Self::UnknownVertex(_) => ErrorCode::UnknownVertex,
            Self::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
            Self::EdgeNotFound { .. } => ErrorCode::EdgeNotFound,
            Self::InvalidField { .. } => ErrorCode::InvalidField,
            Self::WrongGraphType { .. } => ErrorCode::WrongGraphType,
        }
    }
}
