//! Graph normalization: names to integer node handles.

use crate::model::{CandidateLink, NodeInfo};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A node identity plus the renderer-facing extras registered during
/// relationship discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub name: String,
    pub url: String,
    pub img: String,
}

/// A surviving relationship with endpoints resolved to node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: usize,
    pub target: usize,
    pub tag: String,
    pub duration: i32,
}

/// The normalized relationship graph handed to the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Collect the distinct node names referenced by the surviving links, in
/// first-appearance order (source before target, link order preserved), and
/// reindex the links against that list.
///
/// Records that survive in no link contribute no node; a graph with no links
/// is empty.
pub fn normalize(links: &[CandidateLink], node_info: &FxHashMap<String, NodeInfo>) -> SankeyGraph {
    let mut names: IndexSet<&str> = IndexSet::new();
    for link in links {
        names.insert(link.source.as_str());
        names.insert(link.target.as_str());
    }

    let nodes: Vec<GraphNode> = names
        .iter()
        .map(|&name| {
            let info = node_info.get(name).cloned().unwrap_or_default();
            GraphNode {
                name: name.to_string(),
                url: info.url,
                img: info.img,
            }
        })
        .collect();

    let graph_links: Vec<GraphLink> = links
        .iter()
        .map(|link| GraphLink {
            source: names
                .get_index_of(link.source.as_str())
                .expect("link source interned above"),
            target: names
                .get_index_of(link.target.as_str())
                .expect("link target interned above"),
            tag: link.tag.clone(),
            duration: link.duration,
        })
        .collect();

    SankeyGraph {
        nodes,
        links: graph_links,
    }
}
