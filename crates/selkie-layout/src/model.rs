//! Serializable layout output consumed by a renderer.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub name: String,
    pub url: String,
    pub img: String,
    /// Left edge, px from container left.
    pub x: f64,
    /// Top edge, px from container top.
    pub y: f64,
    /// Horizontal extent (the configured node width).
    pub dx: f64,
    /// Vertical extent.
    pub dy: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLayout {
    /// Index into [`SankeyLayout::nodes`].
    pub source: usize,
    /// Index into [`SankeyLayout::nodes`].
    pub target: usize,
    pub tag: String,
    pub value: f64,
    /// Stroke thickness.
    pub dy: f64,
    /// Stacking offset into the source node's vertical extent.
    pub sy: f64,
    /// Stacking offset into the target node's vertical extent.
    pub ty: f64,
    /// SVG cubic-Bezier path data for the link body.
    pub path: String,
}

/// Finalized diagram geometry. The renderer draws this as-is; selkie keeps
/// no further state once it is produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyLayout {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    pub node_padding: f64,
    pub tag_colors: BTreeMap<String, String>,
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
}
