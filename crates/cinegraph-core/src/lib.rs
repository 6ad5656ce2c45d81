#![forbid(unsafe_code)]
//! cinegraph-core library.
//!
//! Movie graphs: vertices carry genre tag codes, edges connect movies, and
//! the graph's [`Orientation`] says whether edges are read as ordered pairs.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums ([`GraphError`], [`format::ParseError`]);
//!   `anyhow::Result` only in [`config`].
//! - **Logging**: `tracing` macros at `debug!`/`trace!` level. Failures are
//!   returned, never logged here.

pub mod config;
pub mod error;
pub mod format;
pub mod link;
pub mod model;

pub use error::{ErrorCode, GraphError};
pub use model::{Edge, Graph, Orientation, Vertex};
