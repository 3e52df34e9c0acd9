//! Layout configuration.

use std::collections::BTreeMap;

/// Immutable layout parameters passed to [`crate::layout`]. A plain struct
/// instead of d3-style chained getter/setter accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyConfig {
    /// Horizontal extent of every node, in px.
    pub node_width: f64,
    /// Minimum vertical gap between nodes in a column, in px.
    pub node_padding: f64,
    /// Container `[width, height]` the layout is scaled into.
    pub size: [f64; 2],
    /// Relaxation rounds for vertical placement.
    pub iterations: usize,
    /// Horizontal flatness of link curves, 0..1.
    pub curvature: f64,
    /// Tag to CSS color, carried through to the renderer handoff.
    pub tag_colors: BTreeMap<String, String>,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            node_width: 50.0,
            node_padding: 8.0,
            size: [1.0, 1.0],
            iterations: 32,
            curvature: 0.6,
            tag_colors: default_tag_colors(),
        }
    }
}

fn default_tag_colors() -> BTreeMap<String, String> {
    [
        ("memory", "#E6B48C"),
        ("modularity", "#E66AC2"),
        ("vitality", "#87E677"),
        ("planarity", "#E68C81"),
        ("ephemerality", "#6AD4E6"),
    ]
    .into_iter()
    .map(|(tag, color)| (tag.to_string(), color.to_string()))
    .collect()
}
