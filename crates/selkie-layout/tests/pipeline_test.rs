use selkie_core::{GraphLink, GraphNode, SankeyGraph};
use selkie_layout::{SankeyConfig, layout, relayout};

fn graph(names: &[&str], links: &[(usize, usize)]) -> SankeyGraph {
    SankeyGraph {
        nodes: names
            .iter()
            .map(|&name| GraphNode {
                name: name.to_string(),
                ..Default::default()
            })
            .collect(),
        links: links
            .iter()
            .map(|&(source, target)| GraphLink {
                source,
                target,
                tag: "x".to_string(),
                duration: 1,
            })
            .collect(),
    }
}

fn config() -> SankeyConfig {
    SankeyConfig {
        size: [1600.0, 1000.0],
        ..Default::default()
    }
}

#[test]
fn chain_occupies_consecutive_columns() {
    let cfg = config();
    let out = layout(&graph(&["A", "B", "C"], &[(0, 1), (1, 2)]), &cfg).unwrap();

    assert_eq!(out.nodes[0].x, 0.0);
    // Columns rescale to (width - node_width) / (columns - 1).
    assert!((out.nodes[1].x - 775.0).abs() < 1e-9);
    assert!((out.nodes[2].x - 1550.0).abs() < 1e-9);
    for node in &out.nodes {
        assert_eq!(node.dx, cfg.node_width);
    }
}

#[test]
fn every_link_moves_strictly_rightward() {
    let out = layout(
        &graph(&["A", "B", "C", "D"], &[(0, 1), (1, 2), (0, 3), (1, 3)]),
        &config(),
    )
    .unwrap();
    for link in &out.links {
        assert!(
            out.nodes[link.target].x > out.nodes[link.source].x,
            "{} -> {} does not move rightward",
            out.nodes[link.source].name,
            out.nodes[link.target].name
        );
    }
}

#[test]
fn sinks_are_pushed_to_the_rightmost_column() {
    // D only receives from A, but as a sink it belongs at the far right
    // alongside C.
    let out = layout(
        &graph(&["A", "B", "C", "D"], &[(0, 1), (1, 2), (0, 3)]),
        &config(),
    )
    .unwrap();
    let max_x = out.nodes.iter().map(|n| n.x).fold(f64::MIN, f64::max);
    assert_eq!(out.nodes[2].x, max_x);
    assert_eq!(out.nodes[3].x, max_x);
}

#[test]
fn single_node_graph_lays_out_without_rescaling() {
    let out = layout(&graph(&["only"], &[]), &config()).unwrap();
    let node = &out.nodes[0];
    assert_eq!(node.x, 0.0);
    assert!(node.y.is_finite());
    assert!(node.dy.is_finite());
    assert!(node.y >= 0.0);
    assert!(node.y + node.dy <= 1000.0 + 1e-6);
}

#[test]
fn empty_graph_lays_out_empty() {
    let cfg = config();
    let out = layout(&SankeyGraph::default(), &cfg).unwrap();
    assert!(out.nodes.is_empty());
    assert!(out.links.is_empty());
    assert_eq!(out.width, 1600.0);
    assert_eq!(out.height, 1000.0);
}

#[test]
fn nodes_stay_inside_container_bounds() {
    let out = layout(
        &graph(
            &["A", "B", "C", "D", "E", "F"],
            &[(0, 2), (1, 2), (2, 3), (2, 4), (3, 5), (4, 5)],
        ),
        &config(),
    )
    .unwrap();
    for node in &out.nodes {
        assert!(node.y >= -1e-6, "{} above container: {}", node.name, node.y);
        assert!(
            node.y + node.dy <= 1000.0 + 1e-6,
            "{} below container: {}",
            node.name,
            node.y + node.dy
        );
    }
}

#[test]
fn exactly_full_column_keeps_its_top_node_at_or_above_zero() {
    // Four nodes plus padding tile column 0 to exactly the container
    // height; the dy sum carries ~1e-13 of float noise, which must not get
    // treated as overflow and push the stack to a negative y.
    let out = layout(
        &graph(
            &["A", "B", "C", "D", "E"],
            &[(0, 4), (1, 4), (2, 4), (3, 4)],
        ),
        &config(),
    )
    .unwrap();
    for node in &out.nodes {
        assert!(
            node.y >= 0.0,
            "{} pushed above container: {}",
            node.name,
            node.y
        );
    }
}

#[test]
fn no_vertical_overlap_within_a_column() {
    let cfg = config();
    let out = layout(
        &graph(
            &["A", "B", "C", "D", "E"],
            &[(0, 4), (1, 4), (2, 4), (3, 4)],
        ),
        &cfg,
    )
    .unwrap();

    // A..D all share column 0; sorted by y their extents must not overlap.
    let mut first_column: Vec<&selkie_layout::NodeLayout> =
        out.nodes.iter().filter(|n| n.x == 0.0).collect();
    assert_eq!(first_column.len(), 4);
    first_column.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap());
    for pair in first_column.windows(2) {
        assert!(
            pair[0].y + pair[0].dy <= pair[1].y + 1e-6,
            "overlap between {} and {}",
            pair[0].name,
            pair[1].name
        );
    }
}

#[test]
fn link_offsets_stack_without_gaps() {
    let out = layout(
        &graph(&["A", "B", "C"], &[(0, 1), (0, 2), (1, 2)]),
        &config(),
    )
    .unwrap();

    // A's two outgoing links tile its extent starting at 0.
    let mut from_a: Vec<_> = out.links.iter().filter(|l| l.source == 0).collect();
    from_a.sort_by(|a, b| a.sy.partial_cmp(&b.sy).unwrap());
    assert_eq!(from_a[0].sy, 0.0);
    assert!((from_a[1].sy - from_a[0].dy).abs() < 1e-9);

    // C's two incoming links likewise.
    let mut into_c: Vec<_> = out.links.iter().filter(|l| l.target == 2).collect();
    into_c.sort_by(|a, b| a.ty.partial_cmp(&b.ty).unwrap());
    assert_eq!(into_c[0].ty, 0.0);
    assert!((into_c[1].ty - into_c[0].dy).abs() < 1e-9);
}

#[test]
fn relayout_is_idempotent_on_unchanged_layout() {
    let cfg = config();
    let mut out = layout(
        &graph(&["A", "B", "C", "D"], &[(0, 1), (0, 2), (1, 3), (2, 3)]),
        &cfg,
    )
    .unwrap();
    let before = out.clone();
    relayout(&mut out, &cfg);
    assert_eq!(out, before);
    relayout(&mut out, &cfg);
    assert_eq!(out, before);
}

#[test]
fn layout_is_deterministic() {
    let cfg = config();
    let g = graph(&["A", "B", "C", "D"], &[(0, 1), (1, 2), (0, 3), (1, 3)]);
    let a = layout(&g, &cfg).unwrap();
    let b = layout(&g, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn uniform_values_give_uniform_link_thickness() {
    let out = layout(&graph(&["A", "B", "C"], &[(0, 1), (1, 2)]), &config()).unwrap();
    for node in &out.nodes {
        assert_eq!(node.value, 30.0);
    }
    let dy = out.links[0].dy;
    assert!(out.links.iter().all(|l| (l.dy - dy).abs() < 1e-9));
}

#[test]
fn layout_serializes_for_the_renderer_handoff() {
    let out = layout(&graph(&["A", "B"], &[(0, 1)]), &config()).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["nodes"][0]["name"], "A");
    assert_eq!(json["links"][0]["source"], 0);
    assert!(
        json["links"][0]["path"]
            .as_str()
            .unwrap()
            .starts_with('M')
    );
    assert!(json["tag_colors"].is_object());
}
