//! Link path geometry.

/// Build the SVG path data for one link as a horizontal S-curve.
///
/// Endpoints sit at the source's right edge and the target's left edge, both
/// offset down by half the node width (links attach to the middle of the
/// square image a renderer places at each node). The two control points are
/// the endpoints' x-coordinates interpolated at `curvature` and
/// `1 - curvature`, each held at its endpoint's y, so higher curvature makes
/// the middle of the curve flatter.
pub fn link_path(
    source_x: f64,
    source_y: f64,
    source_dx: f64,
    target_x: f64,
    target_y: f64,
    node_width: f64,
    curvature: f64,
) -> String {
    let x0 = source_x + source_dx;
    let x1 = target_x;
    let x2 = interpolate(x0, x1, curvature);
    let x3 = interpolate(x0, x1, 1.0 - curvature);
    let y0 = source_y + node_width / 2.0;
    let y1 = target_y + node_width / 2.0;
    format!("M{x0},{y0}C{x2},{y0} {x3},{y1} {x1},{y1}")
}

fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
