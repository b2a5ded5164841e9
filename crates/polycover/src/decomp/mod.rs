//! Polygon decomposition: ear-clipping triangulation and greedy convex merge.
//!
//! Purpose
//! - Turn a simple polygon (either winding) into triangles, then fuse
//!   edge-adjacent triangles into larger convex pieces.
//!
//! Policy
//! - Best effort. Degenerate input yields a partial triangulation
//!   (`Triangulation::is_complete` is false) and the merger never fails.
//! - All vertex comparisons are by ε-value (`GeomCfg::eps_point`), never identity.
//!
//! Code cross-refs: `geom2::{Polygon, ConvexPiece, GeomCfg}`, `geom2::util`

mod merge;
mod triangulate;

pub use merge::{merge_convex, try_merge};
pub use triangulate::{triangulate, Triangle, Triangulation};

#[cfg(test)]
mod tests;
