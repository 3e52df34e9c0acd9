#![forbid(unsafe_code)]

//! Sankey-style layout for the selkie relationship graph.
//!
//! Consumes a normalized [`selkie_core::SankeyGraph`] and produces final
//! geometry for a renderer:
//!
//! - integer breadth columns from topological order, rescaled to the
//!   container width
//! - vertical depths via damped bidirectional relaxation with per-column
//!   collision resolution
//! - stacked per-link attachment offsets and a cubic-Bezier path string per
//!   link
//!
//! The pipeline is a pure function of (graph, config): single-threaded,
//! synchronous, and deterministic for a fixed iteration count.

pub mod config;
pub mod model;
pub mod path;
pub mod pipeline;

pub use config::SankeyConfig;
pub use model::{LinkLayout, NodeLayout, SankeyLayout};
pub use path::link_path;
pub use pipeline::{layout, relayout};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("circular link: breadth assignment did not terminate")]
    CircularLink,
}
