//! The layout pipeline.
//!
//! Five ordered phases, each feeding the next: node/link wiring, uniform
//! node values, breadth (column) assignment, depth relaxation, and link
//! stacking. [`layout`] runs all five; [`relayout`] re-runs only the link
//! stacking, for callers that mutate node positions between renders.

use crate::config::SankeyConfig;
use crate::model::{LinkLayout, NodeLayout, SankeyLayout};
use crate::path::link_path;
use crate::{Error, Result};
use selkie_core::SankeyGraph;
use std::cmp::Ordering;

/// Every node gets the same value: this diagram draws uniform image tiles,
/// not throughput-proportional bars.
const NODE_VALUE: f64 = 30.0;

#[derive(Debug, Clone, Default)]
struct Node {
    source_links: Vec<usize>,
    target_links: Vec<usize>,
    value: f64,
    column: usize,
    x: f64,
    dx: f64,
    y: f64,
    dy: f64,
}

#[derive(Debug, Clone)]
struct Link {
    source: usize,
    target: usize,
    value: f64,
    dy: f64,
    sy: f64,
    ty: f64,
}

fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compute the full layout for a normalized graph.
///
/// Deterministic for a fixed config; an empty graph lays out to an empty
/// [`SankeyLayout`]. Returns [`Error::CircularLink`] if breadth assignment
/// fails to terminate, which a graph built by `selkie-core` cannot trigger
/// (every link moves strictly forward in time).
pub fn layout(graph: &SankeyGraph, config: &SankeyConfig) -> Result<SankeyLayout> {
    let mut nodes: Vec<Node> = vec![Node::default(); graph.nodes.len()];
    let mut links: Vec<Link> = graph
        .links
        .iter()
        .map(|l| Link {
            source: l.source,
            target: l.target,
            value: NODE_VALUE,
            dy: 0.0,
            sy: 0.0,
            ty: 0.0,
        })
        .collect();

    compute_node_links(&mut nodes, &links);
    compute_node_values(&mut nodes);
    let columns = compute_node_breadths(&mut nodes, &links, config)?;
    compute_node_depths(&mut nodes, &mut links, &columns, config);
    compute_link_depths(&mut nodes, &mut links);

    tracing::debug!(
        nodes = nodes.len(),
        links = links.len(),
        columns = columns.len(),
        "layout complete"
    );

    let layout_nodes: Vec<NodeLayout> = graph
        .nodes
        .iter()
        .zip(&nodes)
        .map(|(seed, n)| NodeLayout {
            name: seed.name.clone(),
            url: seed.url.clone(),
            img: seed.img.clone(),
            x: n.x,
            y: n.y,
            dx: n.dx,
            dy: n.dy,
            value: n.value,
        })
        .collect();

    let layout_links: Vec<LinkLayout> = graph
        .links
        .iter()
        .zip(&links)
        .map(|(seed, l)| LinkLayout {
            source: l.source,
            target: l.target,
            tag: seed.tag.clone(),
            value: l.value,
            dy: l.dy,
            sy: l.sy,
            ty: l.ty,
            path: node_pair_path(&nodes[l.source], &nodes[l.target], config),
        })
        .collect();

    Ok(SankeyLayout {
        width: config.size[0],
        height: config.size[1],
        node_width: config.node_width,
        node_padding: config.node_padding,
        tag_colors: config.tag_colors.clone(),
        nodes: layout_nodes,
        links: layout_links,
    })
}

/// Re-run only link stacking (and path regeneration) over a finished layout.
///
/// Useful when node positions were nudged externally; with unchanged inputs
/// this is idempotent.
pub fn relayout(layout: &mut SankeyLayout, config: &SankeyConfig) {
    let node_count = layout.nodes.len();

    for node in 0..node_count {
        let mut outgoing: Vec<usize> = (0..layout.links.len())
            .filter(|&li| layout.links[li].source == node)
            .collect();
        outgoing.sort_by(|&a, &b| {
            let ya = layout.nodes[layout.links[a].target].y;
            let yb = layout.nodes[layout.links[b].target].y;
            f64_cmp(ya, yb).then_with(|| a.cmp(&b))
        });
        let mut sy = 0.0;
        for li in outgoing {
            layout.links[li].sy = sy;
            sy += layout.links[li].dy;
        }

        let mut incoming: Vec<usize> = (0..layout.links.len())
            .filter(|&li| layout.links[li].target == node)
            .collect();
        incoming.sort_by(|&a, &b| {
            let ya = layout.nodes[layout.links[a].source].y;
            let yb = layout.nodes[layout.links[b].source].y;
            f64_cmp(ya, yb).then_with(|| a.cmp(&b))
        });
        let mut ty = 0.0;
        for li in incoming {
            layout.links[li].ty = ty;
            ty += layout.links[li].dy;
        }
    }

    for li in 0..layout.links.len() {
        let source = &layout.nodes[layout.links[li].source];
        let target = &layout.nodes[layout.links[li].target];
        layout.links[li].path = link_path(
            source.x,
            source.y,
            source.dx,
            target.x,
            target.y,
            config.node_width,
            config.curvature,
        );
    }
}

fn node_pair_path(source: &Node, target: &Node, config: &SankeyConfig) -> String {
    link_path(
        source.x,
        source.y,
        source.dx,
        target.x,
        target.y,
        config.node_width,
        config.curvature,
    )
}

/// Phase 1: populate each node's incoming/outgoing link index lists.
fn compute_node_links(nodes: &mut [Node], links: &[Link]) {
    for (li, link) in links.iter().enumerate() {
        nodes[link.source].source_links.push(li);
        nodes[link.target].target_links.push(li);
    }
}

/// Phase 2: uniform node sizing.
fn compute_node_values(nodes: &mut [Node]) {
    for node in nodes {
        node.value = NODE_VALUE;
    }
}

/// Phase 3: column assignment by frontier sweep.
///
/// Every node starts in column 0; each pass fixes the frontier's column and
/// pushes the distinct targets of its outgoing links into the next frontier,
/// so a node's final column is one past the deepest column with an edge into
/// it. Sinks are then moved to the rightmost column, and x is rescaled to
/// the container width (skipped for a single column, where the divisor would
/// be zero).
///
/// Returns the node indices grouped by column, ascending.
fn compute_node_breadths(
    nodes: &mut [Node],
    links: &[Link],
    config: &SankeyConfig,
) -> Result<Vec<Vec<usize>>> {
    let n = nodes.len();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut x: usize = 0;

    while !remaining.is_empty() {
        let mut next: Vec<usize> = Vec::new();
        for &ni in &remaining {
            nodes[ni].column = x;
            nodes[ni].x = x as f64;
            nodes[ni].dx = config.node_width;
            for &li in &nodes[ni].source_links {
                let target = links[li].target;
                if !next.contains(&target) {
                    next.push(target);
                }
            }
        }
        x += 1;
        if x > n {
            return Err(Error::CircularLink);
        }
        remaining = next;
    }

    // Sinks sit at the rightmost extreme regardless of when the sweep first
    // reached them.
    for node in nodes.iter_mut() {
        if node.source_links.is_empty() {
            node.column = x - 1;
            node.x = (x - 1) as f64;
        }
    }

    if x > 1 {
        let kx = (config.size[0] - config.node_width) / (x as f64 - 1.0);
        for node in nodes.iter_mut() {
            node.x *= kx;
        }
    }

    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); x];
    for ni in 0..n {
        columns[nodes[ni].column].push(ni);
    }
    columns.retain(|c| !c.is_empty());
    Ok(columns)
}

/// Phase 4: vertical placement by damped bidirectional relaxation.
fn compute_node_depths(
    nodes: &mut [Node],
    links: &mut [Link],
    columns: &[Vec<usize>],
    config: &SankeyConfig,
) {
    if columns.is_empty() {
        return;
    }

    initialize_node_depth(nodes, links, columns, config);
    resolve_collisions(nodes, columns, config);

    let mut alpha = 1.0;
    for _ in 0..config.iterations {
        alpha *= 0.99;
        relax_right_to_left(nodes, links, columns, alpha);
        resolve_collisions(nodes, columns, config);
        relax_left_to_right(nodes, links, columns, alpha);
        resolve_collisions(nodes, columns, config);
    }
}

/// Stack nodes by index inside their column and derive the uniform vertical
/// scale: the tightest column determines `ky` so no column overflows at
/// start.
fn initialize_node_depth(
    nodes: &mut [Node],
    links: &mut [Link],
    columns: &[Vec<usize>],
    config: &SankeyConfig,
) {
    let height = config.size[1];
    let ky = columns
        .iter()
        .map(|column| {
            let sum: f64 = column.iter().map(|&ni| nodes[ni].value).sum();
            (height - (column.len() as f64 - 1.0) * config.node_padding) / sum
        })
        .fold(f64::INFINITY, f64::min);

    for column in columns {
        for (i, &ni) in column.iter().enumerate() {
            nodes[ni].y = i as f64;
            nodes[ni].dy = nodes[ni].value * ky;
        }
    }
    for link in links {
        link.dy = link.value * ky;
    }
}

fn center(node: &Node) -> f64 {
    node.y + node.dy / 2.0
}

/// Pull each node with incoming links toward the value-weighted center of
/// its sources, left to right.
fn relax_left_to_right(nodes: &mut [Node], links: &[Link], columns: &[Vec<usize>], alpha: f64) {
    for column in columns {
        for &ni in column {
            if nodes[ni].target_links.is_empty() {
                continue;
            }
            let weighted: f64 = nodes[ni]
                .target_links
                .iter()
                .map(|&li| center(&nodes[links[li].source]) * links[li].value)
                .sum();
            let total: f64 = nodes[ni]
                .target_links
                .iter()
                .map(|&li| links[li].value)
                .sum();
            let delta = (weighted / total - center(&nodes[ni])) * alpha;
            nodes[ni].y += delta;
        }
    }
}

/// Pull each node with outgoing links toward the value-weighted center of
/// its targets, right to left.
fn relax_right_to_left(nodes: &mut [Node], links: &[Link], columns: &[Vec<usize>], alpha: f64) {
    for column in columns.iter().rev() {
        for &ni in column {
            if nodes[ni].source_links.is_empty() {
                continue;
            }
            let weighted: f64 = nodes[ni]
                .source_links
                .iter()
                .map(|&li| center(&nodes[links[li].target]) * links[li].value)
                .sum();
            let total: f64 = nodes[ni]
                .source_links
                .iter()
                .map(|&li| links[li].value)
                .sum();
            let delta = (weighted / total - center(&nodes[ni])) * alpha;
            nodes[ni].y += delta;
        }
    }
}

/// Remove vertical overlap within each column: sweep top-down pushing
/// overlapping nodes down, clamp the bottom node to the container, then
/// sweep bottom-up pushing overlaps back. In a pathologically dense column
/// the topmost node may still end above the container; that is accepted.
fn resolve_collisions(nodes: &mut [Node], columns: &[Vec<usize>], config: &SankeyConfig) {
    let height = config.size[1];
    let padding = config.node_padding;

    for column in columns {
        let mut order: Vec<usize> = column.clone();
        order.sort_by(|&a, &b| f64_cmp(nodes[a].y, nodes[b].y).then_with(|| a.cmp(&b)));

        let mut y0 = 0.0;
        for &ni in &order {
            let dy = y0 - nodes[ni].y;
            if dy > 0.0 {
                nodes[ni].y += dy;
            }
            y0 = nodes[ni].y + nodes[ni].dy + padding;
        }

        // If the bottommost node ends outside the container, push it back up
        // and propagate. The epsilon keeps float noise in a column that
        // exactly fills the container (dy sums to height plus ~1e-13) from
        // nudging the top node to a negative y.
        let Some(&last) = order.last() else {
            continue;
        };
        let overflow = y0 - padding - height;
        if overflow > 1e-6 {
            nodes[last].y -= overflow;
            let mut y0 = nodes[last].y;
            for &ni in order.iter().rev().skip(1) {
                let dy = nodes[ni].y + nodes[ni].dy + padding - y0;
                if dy > 0.0 {
                    nodes[ni].y -= dy;
                }
                y0 = nodes[ni].y;
            }
        }
    }
}

/// Phase 5: stack link attachment offsets along each node's vertical extent.
///
/// Outgoing links are ordered by their target's y, incoming by their
/// source's y, so flows leave and arrive without crossing at the node edge.
fn compute_link_depths(nodes: &mut [Node], links: &mut [Link]) {
    let node_y: Vec<f64> = nodes.iter().map(|n| n.y).collect();

    for node in nodes.iter_mut() {
        node.source_links.sort_by(|&a, &b| {
            f64_cmp(node_y[links[a].target], node_y[links[b].target]).then_with(|| a.cmp(&b))
        });
        node.target_links.sort_by(|&a, &b| {
            f64_cmp(node_y[links[a].source], node_y[links[b].source]).then_with(|| a.cmp(&b))
        });
    }

    for node in nodes.iter() {
        let mut sy = 0.0;
        let mut ty = 0.0;
        for &li in &node.source_links {
            links[li].sy = sy;
            sy += links[li].dy;
        }
        for &li in &node.target_links {
            links[li].ty = ty;
            ty += links[li].dy;
        }
    }
}
