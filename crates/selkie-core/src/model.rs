//! Core record and relationship types.
//!
//! These are intentionally lightweight and `Clone`-friendly so that graph
//! construction stays deterministic and easy to assert against in tests.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// One timestamped input item. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub month: i32,
    pub year: i32,
    /// Up to three category tags; unused slots are empty strings.
    pub tags: [String; 3],
    pub url: String,
    pub img: String,
}

impl Record {
    /// The record's tags in declaration order, empty slots included as-is.
    pub fn tags(&self) -> [&str; 3] {
        [&self.tags[0], &self.tags[1], &self.tags[2]]
    }

    /// Months from `self` to `other`. Positive when `other` is strictly
    /// later; zero for same-month pairs.
    pub fn months_until(&self, other: &Record) -> i32 {
        (other.year - self.year) * 12 + (other.month - self.month)
    }
}

/// Renderer-facing extras carried alongside a node identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    pub url: String,
    pub img: String,
}

/// A potential relationship between two records sharing a tag, before
/// pruning. `duration > 0` is enforced at creation: reversed and same-month
/// pairs never become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub source: String,
    pub target: String,
    pub tag: String,
    pub duration: i32,
}

/// Everything relationship discovery produces: the candidate links plus the
/// per-name info lookup for every record that appears in at least one
/// candidate.
#[derive(Debug, Clone, Default)]
pub struct Relations {
    pub links: Vec<CandidateLink>,
    pub node_info: FxHashMap<String, NodeInfo>,
}
