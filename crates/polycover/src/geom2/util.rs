//! Orientation and containment predicates on raw vertex slices.
//!
//! Everything here compares points by value with an explicit epsilon.

use std::cmp::Ordering;

use super::types::Point2;

/// Twice the signed area of triangle `abc` (positive for CCW).
#[inline]
pub fn area2(a: Point2, b: Point2, c: Point2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Twice the signed area of a closed vertex cycle (shoelace sum).
pub fn polygon_area2(verts: &[Point2]) -> f64 {
    let n = verts.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let p = verts[i];
            let q = verts[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// Reverse `verts` in place if the shoelace sum is negative. Returns whether it reversed.
pub fn normalize_ccw(verts: &mut [Point2]) -> bool {
    if polygon_area2(verts) < 0.0 {
        verts.reverse();
        true
    } else {
        false
    }
}

/// ε-equality on both coordinates.
#[inline]
pub fn points_eq(a: Point2, b: Point2, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

/// Area-sum containment test: `p` is inside or on triangle `abc` iff the three
/// sub-triangle areas add up to the full area within `eps`.
#[inline]
pub fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2, eps: f64) -> bool {
    let full = area2(a, b, c).abs();
    let a1 = area2(p, b, c).abs();
    let a2 = area2(a, p, c).abs();
    let a3 = area2(a, b, p).abs();
    ((a1 + a2 + a3) - full).abs() < eps
}

/// Strict convexity: every consecutive triple turns left.
pub fn is_strictly_convex(verts: &[Point2]) -> bool {
    let n = verts.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| area2(verts[(i + n - 1) % n], verts[i], verts[(i + 1) % n]) > 0.0)
}

/// Vertex average.
pub fn vertex_centroid(verts: &[Point2]) -> Option<Point2> {
    if verts.is_empty() {
        return None;
    }
    let sum = verts.iter().fold(Point2::zeros(), |acc, p| acc + p);
    Some(sum / verts.len() as f64)
}

/// Append each point unless an ε-equal one is already present.
pub fn push_unique(out: &mut Vec<Point2>, p: Point2, eps: f64) {
    if !out.iter().any(|q| points_eq(*q, p, eps)) {
        out.push(p);
    }
}

/// Sort points by polar angle around `center` (ascending, i.e. CCW from -π).
pub fn sort_by_angle(points: &mut [Point2], center: Point2) {
    points.sort_by(|a, b| {
        let aa = (a.y - center.y).atan2(a.x - center.x);
        let bb = (b.y - center.y).atan2(b.x - center.x);
        aa.partial_cmp(&bb).unwrap_or(Ordering::Equal)
    });
}

/// Index of the first vertex ε-equal to `p`.
#[inline]
pub fn position_eq(verts: &[Point2], p: Point2, eps: f64) -> Option<usize> {
    verts.iter().position(|q| points_eq(*q, p, eps))
}
