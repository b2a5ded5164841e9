//! Coverage planning over convex pieces.
//!
//! - `plan_coverage`: horizontal scan lines `spacing` apart, inset by `spacing`,
//!   traversed in alternating direction (boustrophedon), one contiguous path.
//! - `stitch_paths` / `plan_coverage_all`: join per-piece paths in caller order.
//!
//! Code cross-refs: `geom2::{ConvexPiece, CoveragePath, PathSegment}`

mod scan;
mod stitch;

pub use scan::{plan_coverage, scanline_count, scanline_crossings, scanline_heights};
pub use stitch::{plan_coverage_all, plan_coverage_per_piece, stitch_paths};
