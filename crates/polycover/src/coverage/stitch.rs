//! Multi-piece coverage: per-piece planning and stitching in caller order.

use tracing::debug;

use super::scan::plan_coverage;
use crate::geom2::{ConvexPiece, CoveragePath, PathSegment};

/// One path per piece, same order as `pieces`. Pieces are independent.
pub fn plan_coverage_per_piece(pieces: &[ConvexPiece], spacing: f64) -> Vec<CoveragePath> {
    pieces
        .iter()
        .map(|piece| plan_coverage(piece, spacing))
        .collect()
}

/// Concatenate `paths` in the given order, inserting a transition between
/// consecutive non-empty paths. Empty paths contribute nothing.
///
/// No reordering for shorter travel is attempted.
pub fn stitch_paths(paths: &[CoveragePath]) -> CoveragePath {
    let mut segments: Vec<PathSegment> =
        Vec::with_capacity(paths.iter().map(|p| p.len() + 1).sum());
    for path in paths.iter().filter(|p| !p.is_empty()) {
        if let (Some(prev_end), Some(next_start)) = (segments.last().map(|s| s.end), path.start())
        {
            segments.push(PathSegment::transition(prev_end, next_start));
        }
        segments.extend_from_slice(&path.segments);
    }
    debug!(paths = paths.len(), segments = segments.len(), "stitched coverage");
    CoveragePath { segments }
}

/// Plan every piece and stitch the results into one contiguous path.
pub fn plan_coverage_all(pieces: &[ConvexPiece], spacing: f64) -> CoveragePath {
    stitch_paths(&plan_coverage_per_piece(pieces, spacing))
}
