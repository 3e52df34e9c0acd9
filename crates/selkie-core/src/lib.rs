#![forbid(unsafe_code)]

//! Chronological tag-flow graph model (headless).
//!
//! Given a set of dated, tagged records, this crate derives the minimal
//! relationship graph a renderer needs:
//!
//! - [`csv`] loads records from tabular input (only rows flagged for display)
//! - [`relate`] discovers every candidate relationship between records that
//!   share a tag, later-to-earlier pairs excluded
//! - [`prune`] drops relationships dominated by a chronologically nearer one
//!   of the same origin and tag
//! - [`graph`] deduplicates node identities and reindexes links to integer
//!   node handles
//!
//! Layout (columns, depths, link stacking) lives in `selkie-layout`; this
//! crate is deterministic, synchronous, and renderer-agnostic.

pub mod csv;
pub mod error;
pub mod graph;
pub mod model;
pub mod prune;
pub mod relate;

pub use error::{Error, Result};
pub use graph::{GraphLink, GraphNode, SankeyGraph, normalize};
pub use model::{CandidateLink, NodeInfo, Record, Relations};
pub use prune::prune;
pub use relate::candidate_links;

/// Load records, discover and prune relationships, and normalize the result
/// into an index-based graph in one call.
pub fn build_graph(records: &[Record]) -> SankeyGraph {
    let relations = candidate_links(records);
    let surviving = prune(relations.links);
    normalize(&surviving, &relations.node_info)
}
