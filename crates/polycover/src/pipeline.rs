//! End-to-end pipeline: ordered points → triangles → convex pieces → coverage.
//!
//! Each call owns its inputs and outputs; nothing is cached between calls.

use tracing::{debug, info};

use crate::coverage::{plan_coverage_per_piece, stitch_paths};
use crate::decomp::{merge_convex, triangulate, Triangulation};
use crate::geom2::{
    validate_spacing, ConvexPiece, CoveragePath, GeomCfg, GeomError, Point2, Polygon,
};

/// Pipeline configuration: tolerances plus the scan spacing (also the boundary inset).
#[derive(Clone, Copy, Debug)]
pub struct PlanCfg {
    pub geom: GeomCfg,
    pub spacing: f64,
}

impl Default for PlanCfg {
    fn default() -> Self {
        Self {
            geom: GeomCfg::default(),
            spacing: 1.0,
        }
    }
}

impl PlanCfg {
    pub fn validate(&self) -> Result<(), GeomError> {
        validate_spacing(self.spacing).map(|_| ())
    }
}

/// Triangulation plus the greedy convex decomposition of one polygon.
#[derive(Clone, Debug)]
pub struct Decomposition {
    /// The input polygon, CCW-normalized.
    pub polygon: Polygon,
    pub triangulation: Triangulation,
    pub pieces: Vec<ConvexPiece>,
}

impl Decomposition {
    /// False when the triangulation stopped early; the pieces then cover only part of the polygon.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.triangulation.is_complete()
    }
}

/// Decomposition plus coverage paths, per piece and stitched.
#[derive(Clone, Debug)]
pub struct Plan {
    pub decomposition: Decomposition,
    pub spacing: f64,
    /// One path per piece, same order as `decomposition.pieces`.
    pub paths: Vec<CoveragePath>,
    /// All piece paths joined in piece order.
    pub stitched: CoveragePath,
}

/// Triangulate and merge. Fails only with `InsufficientVertices`.
pub fn decompose(points: &[Point2], cfg: GeomCfg) -> Result<Decomposition, GeomError> {
    let polygon = Polygon::new_ccw(points)?;
    let triangulation = triangulate(points, cfg);
    info!(
        vertices = points.len(),
        triangles = triangulation.len(),
        complete = triangulation.is_complete(),
        "triangulated polygon"
    );
    let pieces = merge_convex(&triangulation.polygons(), cfg);
    debug!(pieces = pieces.len(), "convex decomposition");
    Ok(Decomposition {
        polygon,
        triangulation,
        pieces,
    })
}

/// Full pipeline with spacing validated up front.
pub fn plan(points: &[Point2], cfg: PlanCfg) -> Result<Plan, GeomError> {
    cfg.validate()?;
    let decomposition = decompose(points, cfg.geom)?;
    let paths = plan_coverage_per_piece(&decomposition.pieces, cfg.spacing);
    let stitched = stitch_paths(&paths);
    info!(
        pieces = decomposition.pieces.len(),
        segments = stitched.len(),
        length = stitched.length(),
        "coverage planned"
    );
    Ok(Plan {
        decomposition,
        spacing: cfg.spacing,
        paths,
        stitched,
    })
}
