use selkie_layout::link_path;

#[test]
fn path_connects_source_right_edge_to_target_left_edge() {
    // Source at origin with dx 50, target at (100, 30), node width 50.
    let d = link_path(0.0, 0.0, 50.0, 100.0, 30.0, 50.0, 0.6);
    assert_eq!(d, "M50,25C80,25 70,55 100,55");
}

#[test]
fn zero_curvature_puts_controls_at_the_endpoints() {
    let d = link_path(0.0, 0.0, 50.0, 150.0, 0.0, 50.0, 0.0);
    assert_eq!(d, "M50,25C50,25 150,25 150,25");
}

#[test]
fn higher_curvature_pushes_controls_toward_the_far_ends() {
    let flat = link_path(0.0, 0.0, 50.0, 250.0, 100.0, 50.0, 0.75);
    // x2 = 50 + 200 * 0.75, x3 = 50 + 200 * 0.25
    assert_eq!(flat, "M50,25C200,25 100,125 250,125");
}

#[test]
fn vertical_offset_is_half_the_node_width() {
    let d = link_path(10.0, 40.0, 50.0, 300.0, 200.0, 100.0, 0.5);
    assert!(d.starts_with("M60,90C"));
    assert!(d.ends_with("300,250"));
}
