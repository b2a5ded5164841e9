//! Basic 2D types and tolerances shared by the pipeline stages.
//!
//! - `GeomCfg`: centralizes epsilons for point equality and area tests.
//! - `Polygon`, `ConvexPiece`: owned vertex cycles (implicitly closed).
//! - `PathSegment`, `CoveragePath`: planner output.
//! - `GeomError`: the only error signal crossing the library boundary.
//!
//! Code cross-refs: `util::{area2, points_eq, is_strictly_convex}`

use nalgebra::Vector2;
use std::fmt;

use super::util::{is_strictly_convex, normalize_ccw, polygon_area2};

/// A point in the plane.
pub type Point2 = Vector2<f64>;

/// Geometry configuration (tolerances and loop caps).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Two points are the same iff both coordinates differ by less than this.
    pub eps_point: f64,
    /// Slack for the area-sum point-in-triangle test.
    pub eps_area: f64,
    /// Lower bound on the number of merge passes before the merger gives up.
    pub max_merge_passes: usize,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_point: 1e-6,
            eps_area: 1e-6,
            max_merge_passes: 100,
        }
    }
}

/// Error type shared by the pipeline boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    InsufficientVertices { got: usize },
    InvalidSpacing { spacing: f64 },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientVertices { got } => {
                write!(f, "polygon needs at least 3 vertices, got {got}")
            }
            Self::InvalidSpacing { spacing } => {
                write!(f, "scan spacing must be finite and > 0, got {spacing}")
            }
        }
    }
}

impl std::error::Error for GeomError {}

/// Check a coverage spacing at the configuration boundary.
pub fn validate_spacing(spacing: f64) -> Result<f64, GeomError> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(spacing)
    } else {
        Err(GeomError::InvalidSpacing { spacing })
    }
}

/// Ordered vertex cycle with at least 3 vertices. The closing edge is implicit.
///
/// Simplicity is assumed, not verified.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Copy `points` into a polygon, keeping the caller's winding.
    pub fn new(points: &[Point2]) -> Result<Self, GeomError> {
        if points.len() < 3 {
            return Err(GeomError::InsufficientVertices { got: points.len() });
        }
        Ok(Self {
            vertices: points.to_vec(),
        })
    }

    /// Same as `new` but normalizes the winding to CCW.
    pub fn new_ccw(points: &[Point2]) -> Result<Self, GeomError> {
        let mut p = Self::new(points)?;
        normalize_ccw(&mut p.vertices);
        Ok(p)
    }

    /// Crate-internal constructor for vertex lists already known to have >= 3 entries.
    pub(crate) fn from_vec(vertices: Vec<Point2>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Twice the signed area (positive for CCW).
    #[inline]
    pub fn signed_area2(&self) -> f64 {
        polygon_area2(&self.vertices)
    }

    /// Unsigned area.
    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * self.signed_area2().abs()
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area2() > 0.0
    }

    /// Copy with CCW winding.
    pub fn to_ccw(&self) -> Polygon {
        let mut v = self.vertices.clone();
        normalize_ccw(&mut v);
        Self { vertices: v }
    }

    /// Every consecutive vertex triple has strictly positive signed area.
    #[inline]
    pub fn is_strictly_convex(&self) -> bool {
        is_strictly_convex(&self.vertices)
    }

    /// Vertical extent `(y_min, y_max)`.
    pub fn y_extent(&self) -> (f64, f64) {
        self.vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }

    /// Edges as `(from, to)` pairs including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn into_vertices(self) -> Vec<Point2> {
        self.vertices
    }
}

/// A polygon whose every consecutive vertex triple has strictly positive signed area.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPiece(Polygon);

impl ConvexPiece {
    /// Wrap `poly` (after CCW normalization) if it satisfies the convexity invariant.
    pub fn try_new(poly: Polygon) -> Option<Self> {
        let poly = poly.to_ccw();
        if poly.is_strictly_convex() {
            Some(Self(poly))
        } else {
            None
        }
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.0
    }

    pub fn into_polygon(self) -> Polygon {
        self.0
    }
}

impl std::ops::Deref for ConvexPiece {
    type Target = Polygon;
    #[inline]
    fn deref(&self) -> &Polygon {
        &self.0
    }
}

/// What a path segment does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// A coverage pass along a scan line.
    Stripe,
    /// A move joining two stripes (or two pieces).
    Transition,
}

/// Directed segment `start → end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSegment {
    pub start: Point2,
    pub end: Point2,
    pub kind: SegmentKind,
}

impl PathSegment {
    #[inline]
    pub fn stripe(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            kind: SegmentKind::Stripe,
        }
    }

    #[inline]
    pub fn transition(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            kind: SegmentKind::Transition,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            kind: self.kind,
        }
    }
}

/// Ordered, contiguous sequence of stripes and transitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoveragePath {
    pub segments: Vec<PathSegment>,
}

impl CoveragePath {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn stripes(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Stripe)
    }

    pub fn transitions(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Transition)
    }

    pub fn start(&self) -> Option<Point2> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<Point2> {
        self.segments.last().map(|s| s.end)
    }

    /// Total travelled length (stripes plus transitions).
    pub fn length(&self) -> f64 {
        self.segments.iter().map(PathSegment::length).sum()
    }

    /// Each segment starts where the previous one ended (within `eps`).
    pub fn is_contiguous(&self, eps: f64) -> bool {
        self.segments
            .windows(2)
            .all(|w| super::util::points_eq(w[0].end, w[1].start, eps))
    }
}
