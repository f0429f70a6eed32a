use nalgebra::{Point2, Vector2, Vector3, Vector4};

/// Twice-areas below this are treated as degenerate.
const EPSILON: f64 = 1e-12;

/// Z component of the 3D cross product of two 2D vectors.
#[inline(always)]
pub fn cross2(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Point-in-triangle test using the dot-product form of barycentric coordinates.
///
/// With `u` weighting `c - a` and `v` weighting `b - a`, the point is inside iff
/// `u >= 0`, `v >= 0` and `u + v < 1`. Points on the edges through `a` count as
/// inside, points on the edge `bc` do not.
///
/// Returns `false` for a degenerate (zero-area) triangle.
pub fn is_point_in_triangle(
    p: Point2<f64>,
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() < EPSILON {
        return false;
    }

    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

/// Calculates interpolation weights (w0, w1, w2) of point `p` for triangle (p0, p1, p2)
/// as ratios of unsigned sub-triangle areas to the full triangle area.
///
/// Because the areas are unsigned, the weights only sum to 1 for points inside
/// the triangle.
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn interpolation_weights(
    p: Point2<f64>,
    p0: Point2<f64>,
    p1: Point2<f64>,
    p2: Point2<f64>,
) -> Option<Vector3<f64>> {
    let area = cross2(p1 - p0, p2 - p0).abs();
    if area < EPSILON {
        return None;
    }

    let w0 = cross2(p1 - p, p2 - p).abs() / area;
    let w1 = cross2(p2 - p, p0 - p).abs() / area;
    let w2 = cross2(p0 - p, p1 - p).abs() / area;

    Some(Vector3::new(w0, w1, w2))
}

/// Weighted sum of three RGBA colors, alpha included.
#[inline]
pub fn interpolate_color(colors: &[Vector4<f64>; 3], weights: Vector3<f64>) -> Vector4<f64> {
    colors[0] * weights.x + colors[1] * weights.y + colors[2] * weights.z
}
