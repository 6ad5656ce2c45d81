use anyhow::{Context as _, Result};
use serde::Serialize;
use std::io::Write;

use super::GraphFile;
use crate::output::{OutputMode, render};

#[derive(Debug, Serialize)]
struct RawFile {
    path: String,
    contents: String,
}

/// Execute `cg cat`: print the graph file exactly as stored.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn run_cat(file: &GraphFile, output: OutputMode) -> Result<()> {
    let contents = std::fs::read_to_string(file.path())
        .map_err(|source| cinegraph_core::format::ParseError::Read {
            path: file.path().to_path_buf(),
            source,
        })
        .with_context(|| format!("cannot read {}", file.path().display()))?;

    let raw = RawFile {
        path: file.path().display().to_string(),
        contents,
    };
    render(output, &raw, |r, w| write!(w, "{}", r.contents))
}
