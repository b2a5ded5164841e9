//! Curated API surface for callers (presentation layers, the CLI, bindings).
//!
//! - `triangulate(points)` may return fewer than `n - 2` triangles on
//!   degenerate input; check `Triangulation::is_complete`.
//! - `merge_convex(polygons)` always succeeds; inputs that are not strictly
//!   convex (zero-area or reflex) are dropped from its output.
//! - `plan_coverage(piece, spacing)` expects `spacing > 0`; validate with
//!   `validate_spacing` at the boundary.
//! - Either winding is accepted everywhere; outputs are CCW.

// Geometry values
pub use crate::geom2::{
    validate_spacing, ConvexPiece, CoveragePath, GeomCfg, GeomError, PathSegment, Point2,
    Polygon, SegmentKind,
};
// Stages
pub use crate::coverage::{
    plan_coverage, plan_coverage_all, plan_coverage_per_piece, stitch_paths,
};
pub use crate::decomp::{merge_convex, triangulate, Triangle, Triangulation};
// Pipeline
pub use crate::pipeline::{decompose, plan, Decomposition, Plan, PlanCfg};
// Random polygons
pub use crate::geom2::rand::{
    draw_star_polygon, regular_polygon, RadialCfg, ReplayToken as PolygonReplay, VertexCount,
};

/// Twice the signed area of a closed vertex cycle; positive for CCW.
#[inline]
pub fn signed_area2(points: &[Point2]) -> f64 {
    crate::geom2::util::polygon_area2(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn square() -> Vec<Point2> {
        vec![
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ]
    }

    #[test]
    fn square_scenario_through_stages() {
        let cfg = GeomCfg::default();
        let tri = triangulate(&square(), cfg);
        assert_eq!(tri.len(), 2);
        assert!((tri.area() - 100.0).abs() < 1e-9);

        let pieces = merge_convex(&tri.polygons(), cfg);
        assert_eq!(pieces.len(), 1);
        assert!((pieces[0].area() - 100.0).abs() < 1e-9);

        let spacing = validate_spacing(2.0).unwrap();
        let path = plan_coverage(&pieces[0], spacing);
        assert_eq!(path.stripes().count(), 4);
        assert_eq!(path.transitions().count(), 3);
    }

    #[test]
    fn extent_below_two_spacings_is_empty() {
        let piece = ConvexPiece::try_new(
            Polygon::new(&[
                vector![0.0, 0.0],
                vector![6.0, 0.0],
                vector![6.0, 3.0],
                vector![0.0, 3.0],
            ])
            .unwrap(),
        )
        .unwrap();
        assert!(plan_coverage(&piece, 2.0).is_empty());
    }

    #[test]
    fn signed_area_follows_winding() {
        let mut pts = square();
        assert!((signed_area2(&pts) - 200.0).abs() < 1e-12);
        pts.reverse();
        assert!((signed_area2(&pts) + 200.0).abs() < 1e-12);
    }
}
