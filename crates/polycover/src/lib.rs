//! Polygon decomposition and coverage planning.
//!
//! Pipeline: ordered point list → ear-clipping triangulation → greedy convex
//! merge → boustrophedon ("lawnmower") coverage path per convex piece.
//!
//! Every stage is a synchronous, deterministic function over borrowed inputs
//! that returns owned values. Degenerate input degrades to partial or empty
//! results; the only error is `GeomError`.

pub mod api;
pub mod coverage;
pub mod decomp;
pub mod geom2;
pub mod pipeline;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{GeomCfg, GeomError, Point2};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::coverage::{plan_coverage, plan_coverage_all, stitch_paths};
    pub use crate::decomp::{merge_convex, triangulate, Triangulation};
    pub use crate::geom2::rand::{draw_star_polygon, RadialCfg, ReplayToken, VertexCount};
    pub use crate::geom2::{
        ConvexPiece, CoveragePath, GeomCfg, GeomError, PathSegment, Point2, Polygon, SegmentKind,
    };
    pub use crate::pipeline::{decompose, plan, Decomposition, Plan, PlanCfg};
    pub use nalgebra::Vector2 as Vec2;
}
