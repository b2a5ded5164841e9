//! Planar geometry primitives for the decomposition pipeline.
//!
//! Purpose
//! - Provide owned polygon/path value types and the ε-aware predicates every
//!   stage relies on (orientation, containment, convexity).
//! - Keep the API minimal and numerically explicit (eps-aware, value equality only).
//!
//! Code cross-refs: `Polygon`, `ConvexPiece`, `CoveragePath`, `GeomCfg`

pub mod rand;
mod types;
pub mod util;

pub use types::{
    validate_spacing, ConvexPiece, CoveragePath, GeomCfg, GeomError, PathSegment, Point2,
    Polygon, SegmentKind,
};
