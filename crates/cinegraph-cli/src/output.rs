//! Shared output layer for pretty/text/JSON parity across all commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its result
//! accordingly: framed output for humans, compact lines for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format`
//! 2. `--json`
//! 3. `FORMAT` env var, then the user config `output` key
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY, [`OutputMode::Text`] if piped.
//!
//! Steps 3 and 4 are resolved by `cinegraph_core::config`; this module only
//! layers the flags on top.

use cinegraph_core::ErrorCode;
use cinegraph_core::format::ParseError;
use cinegraph_core::GraphError;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 60;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-oriented output with headings and separators.
    Pretty,
    /// One fact per line, for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Layer the CLI flags over the mode already resolved from env, user config
/// and TTY detection.
///
/// An unrecognised `configured` value falls back to text.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    configured: &str,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }
    if json_flag {
        return OutputMode::Json;
    }
    OutputMode::from_str(configured, true).unwrap_or(OutputMode::Text)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render a serializable value, sharing one renderer between pretty and
/// text modes.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// The human form used by text and pretty modes, one line per field.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut text = match &self.error_code {
            Some(code) => format!("error[{code}]: {}\n", self.message),
            None => format!("error: {}\n", self.message),
        };
        if let Some(suggestion) = &self.suggestion {
            text.push_str(&format!("  suggestion: {suggestion}\n"));
        }
        text
    }

    /// Attach the code and hint of a known [`ErrorCode`].
    pub fn with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_owned),
            error_code: Some(code.code().to_owned()),
        }
    }
}

/// Find the first [`ErrorCode`] carried anywhere in the error chain.
fn error_code_of(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<ParseError>()
            .map(ParseError::code)
            .or_else(|| cause.downcast_ref::<GraphError>().map(GraphError::code))
    })
}

impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        match error_code_of(err) {
            Some(code) => Self::with_code(message, code),
            None => Self::new(message),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => out.write_all(error.to_plain_text().as_bytes())?,
    }
    Ok(())
}
