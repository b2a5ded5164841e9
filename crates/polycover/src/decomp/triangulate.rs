//! Ear-clipping triangulation over a stable, owned vertex array.
//!
//! The working polygon is a list of indices into `Triangulation::vertices`;
//! clipping an ear removes one index and never touches the vertex array.
//! Zero-area corners (duplicates, collinear runs) are dropped from the work
//! list without emitting a triangle, so every triangle is strictly CCW.

use tracing::{debug, warn};

use crate::geom2::util::{area2, normalize_ccw, point_in_triangle, points_eq};
use crate::geom2::{GeomCfg, Point2, Polygon};

/// Three indices into the owning triangulation's vertex array, CCW.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub idx: [usize; 3],
}

/// Triangles over a CCW-normalized copy of the input points.
#[derive(Clone, Debug)]
pub struct Triangulation {
    vertices: Vec<Point2>,
    triangles: Vec<Triangle>,
    /// Zero-area corners removed without a triangle.
    degenerate: usize,
    reversed: bool,
}

impl Triangulation {
    /// The CCW-normalized vertex array the triangle indices refer to.
    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// `n - 2` for an `n`-vertex input (0 below three vertices).
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    /// Number of zero-area corners dropped instead of clipped.
    #[inline]
    pub fn degenerate(&self) -> usize {
        self.degenerate
    }

    /// False when clipping stopped early on degenerate or self-intersecting input.
    ///
    /// Dropped zero-area corners count towards `n - 2`, but at least one real
    /// triangle is required.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.triangles.is_empty()
            && self.triangles.len() + self.degenerate == self.expected_len()
    }

    /// Whether the input winding was CW and got reversed.
    #[inline]
    pub fn was_reversed(&self) -> bool {
        self.reversed
    }

    /// Map an index of `vertices()` back to the caller's input order.
    #[inline]
    pub fn source_index(&self, i: usize) -> usize {
        if self.reversed {
            self.vertices.len() - 1 - i
        } else {
            i
        }
    }

    #[inline]
    pub fn corners(&self, t: &Triangle) -> [Point2; 3] {
        t.idx.map(|i| self.vertices[i])
    }

    /// Triangles as standalone polygons, the merger's input format.
    pub fn polygons(&self) -> Vec<Polygon> {
        self.triangles
            .iter()
            .map(|t| Polygon::from_vec(self.corners(t).to_vec()))
            .collect()
    }

    /// Sum of unsigned triangle areas.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.corners(t);
                0.5 * area2(a, b, c).abs()
            })
            .sum()
    }
}

/// Triangulate a simple polygon given as an ordered point list (either winding).
///
/// Best effort: fewer than three points yield an empty result, and a polygon
/// with no ear left (degenerate or self-intersecting) yields the triangles found
/// so far. Callers detect this with `Triangulation::is_complete`.
pub fn triangulate(points: &[Point2], cfg: GeomCfg) -> Triangulation {
    let mut vertices = points.to_vec();
    let n = vertices.len();
    if n < 3 {
        return Triangulation {
            vertices,
            triangles: Vec::new(),
            degenerate: 0,
            reversed: false,
        };
    }
    let reversed = normalize_ccw(&mut vertices);

    let mut work: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let max_iterations = 2 * n;
    let mut iterations = 0usize;
    let mut degenerate = 0usize;
    while work.len() > 3 {
        if iterations >= max_iterations {
            warn!(vertices = n, iterations, "ear clipping hit iteration cap");
            break;
        }
        iterations += 1;
        if let Some(k) = find_ear(&vertices, &work, cfg) {
            let m = work.len();
            triangles.push(Triangle {
                idx: [work[(k + m - 1) % m], work[k], work[(k + 1) % m]],
            });
            work.remove(k);
        } else if let Some(k) = find_flat(&vertices, &work, cfg) {
            work.remove(k);
            degenerate += 1;
        } else {
            break;
        }
    }
    if let &[i, j, k] = &work[..] {
        if area2(vertices[i], vertices[j], vertices[k]) > 0.0 {
            triangles.push(Triangle { idx: [i, j, k] });
        } else {
            degenerate += 1;
        }
    }
    if degenerate > 0 {
        debug!(degenerate, "dropped zero-area corners");
    }

    let out = Triangulation {
        vertices,
        triangles,
        degenerate,
        reversed,
    };
    if out.is_complete() {
        debug!(vertices = n, triangles = out.len(), "triangulated");
    } else {
        warn!(
            vertices = n,
            triangles = out.len(),
            expected = out.expected_len(),
            "incomplete triangulation (degenerate or self-intersecting input)"
        );
    }
    out
}

/// Position in `work` of the first ear, scanning in order.
fn find_ear(vertices: &[Point2], work: &[usize], cfg: GeomCfg) -> Option<usize> {
    let m = work.len();
    (0..m).find(|&k| {
        let a = vertices[work[(k + m - 1) % m]];
        let b = vertices[work[k]];
        let c = vertices[work[(k + 1) % m]];
        if area2(a, b, c) <= 0.0 {
            return false;
        }
        !work.iter().any(|&j| {
            let p = vertices[j];
            let is_corner = [a, b, c].iter().any(|q| points_eq(p, *q, cfg.eps_point));
            !is_corner && point_in_triangle(p, a, b, c, cfg.eps_area)
        })
    })
}

/// Position in `work` of the first zero-area corner (duplicate or collinear).
fn find_flat(vertices: &[Point2], work: &[usize], cfg: GeomCfg) -> Option<usize> {
    let m = work.len();
    (0..m).find(|&k| {
        let a = vertices[work[(k + m - 1) % m]];
        let b = vertices[work[k]];
        let c = vertices[work[(k + 1) % m]];
        area2(a, b, c).abs() <= cfg.eps_area
    })
}
