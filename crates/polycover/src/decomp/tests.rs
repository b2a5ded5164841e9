use super::*;
use crate::geom2::rand::{
    draw_star_polygon, regular_polygon, RadialCfg, ReplayToken, VertexCount,
};
use crate::geom2::util::{area2, points_eq};
use crate::geom2::{GeomCfg, Point2, Polygon};
use nalgebra::vector;
use proptest::prelude::*;

fn square() -> Vec<Point2> {
    vec![
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ]
}

fn l_shape() -> Vec<Point2> {
    vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 1.0],
        vector![1.0, 1.0],
        vector![1.0, 2.0],
        vector![0.0, 2.0],
    ]
}

fn poly(points: &[Point2]) -> Polygon {
    Polygon::new(points).unwrap()
}

/// Same vertex cycle up to rotation (ε-equality).
fn same_cycle(a: &[Point2], b: &[Point2]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    (0..n).any(|shift| (0..n).all(|i| points_eq(a[i], b[(i + shift) % n], 1e-9)))
}

fn total_area(polys: &[Polygon]) -> f64 {
    polys.iter().map(Polygon::area).sum()
}

#[test]
fn square_triangulates_into_two() {
    let tri = triangulate(&square(), GeomCfg::default());
    assert_eq!(tri.len(), 2);
    assert!(tri.is_complete());
    assert!((tri.area() - 100.0).abs() < 1e-9);
    for t in tri.triangles() {
        let [a, b, c] = tri.corners(t);
        assert!(area2(a, b, c) > 0.0);
    }
    // First ear is found at index 0 (neighbors 3 and 1).
    assert_eq!(tri.triangles()[0].idx, [3, 0, 1]);
}

#[test]
fn square_merges_back_into_itself() {
    let cfg = GeomCfg::default();
    let tri = triangulate(&square(), cfg);
    let pieces = merge_convex(&tri.polygons(), cfg);
    assert_eq!(pieces.len(), 1);
    assert!(same_cycle(pieces[0].vertices(), &square()));
    assert!(pieces[0].is_strictly_convex());
}

#[test]
fn single_triangle_is_left_alone() {
    let cfg = GeomCfg::default();
    let pts = vec![vector![0.0, 0.0], vector![4.0, 0.0], vector![0.0, 4.0]];
    let tri = triangulate(&pts, cfg);
    assert_eq!(tri.len(), 1);
    assert!(same_cycle(&tri.corners(&tri.triangles()[0]), &pts));
    let pieces = merge_convex(&tri.polygons(), cfg);
    assert_eq!(pieces.len(), 1);
    assert!(same_cycle(pieces[0].vertices(), &pts));
}

#[test]
fn fewer_than_three_points_is_empty_not_error() {
    let tri = triangulate(&[vector![0.0, 0.0], vector![1.0, 0.0]], GeomCfg::default());
    assert!(tri.is_empty());
    assert!(!tri.is_complete());
    assert_eq!(tri.expected_len(), 0);
    assert!(triangulate(&[], GeomCfg::default()).is_empty());
}

#[test]
fn cw_input_is_normalized_and_mappable() {
    let mut pts = l_shape();
    pts.reverse();
    let tri = triangulate(&pts, GeomCfg::default());
    assert!(tri.was_reversed());
    assert_eq!(tri.len(), 4);
    assert!((tri.area() - 3.0).abs() < 1e-9);
    for i in 0..pts.len() {
        assert_eq!(tri.vertices()[i], pts[tri.source_index(i)]);
    }
}

#[test]
fn collinear_input_yields_partial_result() {
    let pts = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![3.0, 0.0],
    ];
    let tri = triangulate(&pts, GeomCfg::default());
    assert!(tri.is_empty());
    assert!(!tri.is_complete());
    assert_eq!(tri.expected_len(), 2);
}

#[test]
fn collinear_boundary_vertex_is_tolerated() {
    // Midpoint on the bottom edge.
    let pts = vec![
        vector![0.0, 0.0],
        vector![5.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ];
    let tri = triangulate(&pts, GeomCfg::default());
    assert!(tri.is_complete());
    assert!((tri.area() - 100.0).abs() < 1e-9);
}

#[test]
fn duplicated_vertex_yields_no_flat_triangle_or_piece() {
    let cfg = GeomCfg::default();
    let pts = vec![
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ];
    let tri = triangulate(&pts, cfg);
    assert!(tri.is_complete());
    assert_eq!(tri.degenerate(), 1);
    assert_eq!(tri.len() + tri.degenerate(), tri.expected_len());
    assert!((tri.area() - 100.0).abs() < 1e-9);
    for t in tri.triangles() {
        let [a, b, c] = tri.corners(t);
        assert!(area2(a, b, c) > 0.0);
    }
    let pieces = merge_convex(&tri.polygons(), cfg);
    assert!(pieces.iter().all(|p| p.is_strictly_convex()));
    assert!(pieces.iter().all(|p| p.area() > 0.0));
    assert_eq!(pieces.len(), 1);
    assert!((pieces[0].area() - 100.0).abs() < 1e-9);
}

#[test]
fn merge_drops_inputs_that_are_not_convex() {
    let cfg = GeomCfg::default();
    let flat = poly(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]]);
    let reflex = poly(&l_shape());
    let ok = poly(&[vector![5.0, 5.0], vector![6.0, 5.0], vector![5.0, 6.0]]);
    let out = merge_convex(&[flat, reflex, ok.clone()], cfg);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].vertices(), ok.vertices());
}

#[test]
fn l_shape_merges_into_two_convex_pieces() {
    let cfg = GeomCfg::default();
    let tri = triangulate(&l_shape(), cfg);
    assert_eq!(tri.len(), 4);
    let pieces = merge_convex(&tri.polygons(), cfg);
    assert_eq!(pieces.len(), 2);
    let polys: Vec<Polygon> = pieces.iter().map(|p| p.polygon().clone()).collect();
    assert!((total_area(&polys) - 3.0).abs() < 1e-9);
    assert!(pieces.iter().all(|p| p.is_strictly_convex()));
}

#[test]
fn merge_requires_a_shared_edge() {
    let cfg = GeomCfg::default();
    let quad = poly(&[
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ]);
    // Shares the diagonal corners of the quad, not an edge.
    let tri = poly(&[vector![0.0, 0.0], vector![3.0, 1.0], vector![1.0, 1.0]]);
    assert!(try_merge(&quad, &tri, cfg).is_none());

    // Shares only one vertex.
    let touching = poly(&[vector![1.0, 1.0], vector![2.0, 1.0], vector![2.0, 2.0]]);
    assert!(try_merge(&quad, &touching, cfg).is_none());
}

#[test]
fn merge_rejects_collinear_union() {
    let cfg = GeomCfg::default();
    let left = poly(&[vector![0.0, 0.0], vector![2.0, 0.0], vector![1.0, 1.0]]);
    let right = poly(&[vector![2.0, 0.0], vector![4.0, 0.0], vector![1.0, 1.0]]);
    assert!(try_merge(&left, &right, cfg).is_none());
    let out = merge_convex(&[left.clone(), right.clone()], cfg);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].vertices(), left.vertices());
    assert_eq!(out[1].vertices(), right.vertices());
}

#[test]
fn merge_matches_points_by_value() {
    let cfg = GeomCfg::default();
    let a = poly(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]]);
    // Independently built, off by less than eps.
    let b = poly(&[
        vector![1.0 + 1e-9, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0 - 1e-9],
    ]);
    let merged = try_merge(&a, &b, cfg).expect("shared edge within eps");
    assert_eq!(merged.len(), 4);
    assert!((merged.area() - 1.0).abs() < 1e-6);
}

#[test]
fn unmerged_pieces_keep_order_and_merged_go_last() {
    let cfg = GeomCfg::default();
    let far = poly(&[vector![50.0, 50.0], vector![51.0, 50.0], vector![50.0, 51.0]]);
    let lower = poly(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]]);
    let upper = poly(&[vector![1.0, 0.0], vector![1.0, 1.0], vector![0.0, 1.0]]);
    let far2 = poly(&[vector![-50.0, 0.0], vector![-49.0, 0.0], vector![-50.0, 1.0]]);
    let out = merge_convex(&[far.clone(), lower, upper, far2.clone()], cfg);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].vertices(), far.vertices());
    assert_eq!(out[1].vertices(), far2.vertices());
    assert_eq!(out[2].len(), 4);
}

#[test]
fn merge_of_empty_list_is_empty() {
    assert!(merge_convex(&[], GeomCfg::default()).is_empty());
}

#[test]
fn regular_polygon_fan_merges_to_one_piece() {
    let cfg = GeomCfg::default();
    let p = regular_polygon(12, 5.0);
    let tri = triangulate(p.vertices(), cfg);
    assert_eq!(tri.len(), 10);
    let pieces = merge_convex(&tri.polygons(), cfg);
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].len(), 12);
}

/// Whether two CCW triangles share interior area (separating-axis test on their edges).
fn interiors_overlap(t: [Point2; 3], u: [Point2; 3], tol: f64) -> bool {
    let separated_by = |p: [Point2; 3], q: [Point2; 3]| {
        (0..3).any(|k| {
            let (a, b) = (p[k], p[(k + 1) % 3]);
            q.iter().all(|&v| area2(a, b, v) <= tol)
        })
    };
    !(separated_by(t, u) || separated_by(u, t))
}

fn star_cfg() -> RadialCfg {
    RadialCfg {
        vertex_count: VertexCount::Uniform { min: 3, max: 40 },
        angle_jitter_frac: 0.3,
        radial_jitter: 0.6,
        base_radius: 10.0,
        random_phase: true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn star_polygons_triangulate_completely(seed in any::<u64>(), index in 0u64..1000, flip in any::<bool>()) {
        let cfg = GeomCfg::default();
        let p = draw_star_polygon(star_cfg(), ReplayToken { seed, index });
        let mut pts = p.vertices().to_vec();
        if flip {
            pts.reverse();
        }
        let tri = triangulate(&pts, cfg);
        prop_assert_eq!(tri.len(), pts.len() - 2);
        prop_assert!((tri.area() - p.area()).abs() < 1e-6 * p.area().max(1.0));
        for t in tri.triangles() {
            let [a, b, c] = tri.corners(t);
            prop_assert!(area2(a, b, c) > 0.0);
        }
    }

    #[test]
    fn star_triangles_do_not_overlap(seed in any::<u64>(), index in 0u64..1000) {
        let p = draw_star_polygon(star_cfg(), ReplayToken { seed, index });
        let tri = triangulate(p.vertices(), GeomCfg::default());
        let corners: Vec<[Point2; 3]> = tri.triangles().iter().map(|t| tri.corners(t)).collect();
        for i in 0..corners.len() {
            for j in (i + 1)..corners.len() {
                prop_assert!(
                    !interiors_overlap(corners[i], corners[j], 1e-9),
                    "triangles {} and {} overlap", i, j
                );
            }
        }
    }

    #[test]
    fn merge_is_convex_area_preserving_and_idempotent(seed in any::<u64>(), index in 0u64..1000) {
        let cfg = GeomCfg::default();
        let p = draw_star_polygon(star_cfg(), ReplayToken { seed, index });
        let tris = triangulate(p.vertices(), cfg).polygons();
        let pieces = merge_convex(&tris, cfg);
        prop_assert!(pieces.len() <= tris.len());
        prop_assert!(pieces.iter().all(|q| q.is_strictly_convex()));

        let polys: Vec<Polygon> = pieces.iter().map(|q| q.polygon().clone()).collect();
        prop_assert!((total_area(&polys) - total_area(&tris)).abs() < 1e-6 * p.area().max(1.0));

        let again = merge_convex(&polys, cfg);
        prop_assert_eq!(again.len(), pieces.len());
        for (x, y) in again.iter().zip(pieces.iter()) {
            prop_assert_eq!(x.vertices(), y.vertices());
        }
    }
}
