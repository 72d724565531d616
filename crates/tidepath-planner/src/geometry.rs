//! Point-to-line geometry for the Bug2 reference line.

use tidepath_types::Position;

/// Squared distance from `point` to the infinite line through `line_a` and
/// `line_b`.
///
/// A zero-length line counts as "always on the line" and yields `0.0`.
/// Vertical and horizontal lines reduce to the squared horizontal or vertical
/// offset.  The general case is the squared distance to the foot of the
/// perpendicular, computed from the integer cross product so it is exact and
/// symmetric in the two line points.
pub fn perpendicular_distance(point: Position, line_a: Position, line_b: Position) -> f64 {
    if line_a == line_b {
        return 0.0;
    }
    if line_a.x == line_b.x {
        let dx = f64::from(point.x) - f64::from(line_a.x);
        return dx * dx;
    }
    if line_a.y == line_b.y {
        let dy = f64::from(point.y) - f64::from(line_a.y);
        return dy * dy;
    }

    let abx = i128::from(line_b.x) - i128::from(line_a.x);
    let aby = i128::from(line_b.y) - i128::from(line_a.y);
    let apx = i128::from(point.x) - i128::from(line_a.x);
    let apy = i128::from(point.y) - i128::from(line_a.y);

    let cross = (abx * apy - aby * apx) as f64;
    let length_squared = (abx * abx + aby * aby) as f64;
    cross * cross / length_squared
}

/// `true` when `point` is strictly within `threshold` (squared) of the line.
pub fn is_on_line(point: Position, line_a: Position, line_b: Position, threshold: f64) -> bool {
    perpendicular_distance(point, line_a, line_b) < threshold
}
