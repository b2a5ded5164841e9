//! Boustrophedon scan-line path over a single convex piece.

use std::cmp::Ordering;

use tracing::warn;

use crate::geom2::{ConvexPiece, CoveragePath, PathSegment, Point2, Polygon};

/// Slack when comparing the last scan line against `y_max - spacing`.
const SCAN_EPS: f64 = 1e-9;

/// X coordinates where the horizontal line at `y` crosses the polygon boundary.
///
/// Half-open per edge (`y0 <= y < y1` or the mirror case), so a line through a
/// vertex counts the crossing once and horizontal edges never count.
pub fn scanline_crossings(poly: &Polygon, y: f64) -> Vec<f64> {
    poly.edges()
        .filter(|(a, b)| (a.y <= y && b.y > y) || (b.y <= y && a.y > y))
        .map(|(a, b)| {
            let t = (y - a.y) / (b.y - a.y);
            a.x + t * (b.x - a.x)
        })
        .collect()
}

/// Number of scan lines `k = 1, 2, …` with `y_min + k·s <= y_max - s`.
///
/// Zero for a non-positive or non-finite spacing. Saturates at `u64::MAX`.
pub fn scanline_count(y_min: f64, y_max: f64, spacing: f64) -> u64 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return 0;
    }
    let steps = ((y_max - y_min + SCAN_EPS) / spacing).floor();
    if steps.is_nan() || steps < 2.0 {
        return 0;
    }
    (steps as u64).saturating_sub(1)
}

/// Scan-line heights `y_min + k·s` for `k = 1..=scanline_count(..)`, lazily.
pub fn scanline_heights(y_min: f64, y_max: f64, spacing: f64) -> impl Iterator<Item = f64> {
    (1..=scanline_count(y_min, y_max, spacing)).map(move |k| y_min + (k as f64) * spacing)
}

/// Plan a lawnmower path over `piece` with stripes `spacing` apart and inset by
/// `spacing` from the boundary.
///
/// Stripes run bottom to top; odd stripes are reversed and a transition joins
/// each stripe to the next. A piece lower than `2·spacing` yields an empty path.
/// `spacing` is validated by the caller (`validate_spacing`); invalid values
/// produce an empty path.
pub fn plan_coverage(piece: &ConvexPiece, spacing: f64) -> CoveragePath {
    if !(spacing.is_finite() && spacing > 0.0) {
        warn!(spacing, "invalid scan spacing, no coverage planned");
        return CoveragePath::default();
    }
    let (y_min, y_max) = piece.y_extent();

    let mut stripes: Vec<(Point2, Point2)> = Vec::new();
    for y in scanline_heights(y_min, y_max, spacing) {
        let mut xs = scanline_crossings(piece.polygon(), y);
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        for pair in xs.chunks_exact(2) {
            let x0 = pair[0] + spacing;
            let x1 = pair[1] - spacing;
            if x1 - x0 > 0.0 {
                stripes.push((Point2::new(x0, y), Point2::new(x1, y)));
            }
        }
    }
    connect_stripes(stripes)
}

/// Alternate direction of bottom-to-top stripes and join them with transitions.
fn connect_stripes(mut stripes: Vec<(Point2, Point2)>) -> CoveragePath {
    stripes.sort_by(|a, b| a.0.y.partial_cmp(&b.0.y).unwrap_or(Ordering::Equal));
    let mut segments: Vec<PathSegment> = Vec::with_capacity(stripes.len().saturating_mul(2));
    for (k, (left, right)) in stripes.into_iter().enumerate() {
        let stripe = if k % 2 == 0 {
            PathSegment::stripe(left, right)
        } else {
            PathSegment::stripe(right, left)
        };
        if let Some(prev_end) = segments.last().map(|s| s.end) {
            segments.push(PathSegment::transition(prev_end, stripe.start));
        }
        segments.push(stripe);
    }
    CoveragePath { segments }
}
