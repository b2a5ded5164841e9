//! Greedy fixed-point merge of edge-adjacent polygons into convex pieces.
//!
//! The working list is scanned pairwise in order and the first mergeable pair
//! wins. Pieces are immutable once created, so a pair rejected once stays
//! rejected; the memo below means that after a merge only pairs involving the
//! new piece are evaluated again.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::geom2::util::{
    is_strictly_convex, normalize_ccw, position_eq, push_unique, sort_by_angle, vertex_centroid,
};
use crate::geom2::{ConvexPiece, GeomCfg, Polygon};

/// Piece in the working list, tagged with a stable id for the rejection memo.
struct Slot {
    id: u64,
    poly: Polygon,
}

/// Fuse edge-adjacent polygons while the union stays strictly convex.
///
/// Unmerged pieces keep their relative order; each merged piece is appended at
/// the end. The result is a local fixed point of the greedy rule and depends on
/// input order. Unmerged inputs are passed through CCW-normalized; any that
/// are not strictly convex (zero-area or reflex) are dropped.
pub fn merge_convex(polygons: &[Polygon], cfg: GeomCfg) -> Vec<ConvexPiece> {
    let mut work: Vec<Slot> = polygons
        .iter()
        .enumerate()
        .map(|(i, p)| Slot {
            id: i as u64,
            poly: p.to_ccw(),
        })
        .collect();
    let mut next_id = work.len() as u64;
    let mut rejected: HashSet<(u64, u64)> = HashSet::new();

    // Every merge shrinks the list by one, so the input length is a hard bound.
    let max_passes = cfg.max_merge_passes.max(polygons.len());
    let mut merges = 0usize;
    loop {
        if merges >= max_passes {
            warn!(merges, "convex merge hit pass cap");
            break;
        }
        let Some((i, j, merged)) = first_merge(&work, &mut rejected, cfg) else {
            break;
        };
        // j > i, so removing j first keeps i valid.
        work.remove(j);
        work.remove(i);
        work.push(Slot {
            id: next_id,
            poly: merged,
        });
        next_id += 1;
        merges += 1;
    }
    let inputs_left = work.len();
    debug!(
        inputs = polygons.len(),
        pieces = inputs_left,
        merges,
        "convex merge done"
    );
    let pieces: Vec<ConvexPiece> = work
        .into_iter()
        .filter_map(|s| ConvexPiece::try_new(s.poly))
        .collect();
    if pieces.len() < inputs_left {
        warn!(
            dropped = inputs_left - pieces.len(),
            "dropped pieces that are not strictly convex"
        );
    }
    pieces
}

fn first_merge(
    work: &[Slot],
    rejected: &mut HashSet<(u64, u64)>,
    cfg: GeomCfg,
) -> Option<(usize, usize, Polygon)> {
    for i in 0..work.len() {
        for j in (i + 1)..work.len() {
            let key = (work[i].id.min(work[j].id), work[i].id.max(work[j].id));
            if rejected.contains(&key) {
                continue;
            }
            match try_merge(&work[i].poly, &work[j].poly, cfg) {
                Some(m) => return Some((i, j, m)),
                None => {
                    rejected.insert(key);
                }
            }
        }
    }
    None
}

/// Merge `p` and `q` if they share exactly one boundary edge and the union is strictly convex.
pub fn try_merge(p: &Polygon, q: &Polygon, cfg: GeomCfg) -> Option<Polygon> {
    let eps = cfg.eps_point;
    let pv = p.vertices();
    let qv = q.vertices();

    let shared: Vec<(usize, usize)> = pv
        .iter()
        .enumerate()
        .filter_map(|(ip, v)| position_eq(qv, *v, eps).map(|iq| (ip, iq)))
        .collect();
    let &[(p0, q0), (p1, q1)] = &shared[..] else {
        return None;
    };
    if !consecutive(p0, p1, pv.len()) || !consecutive(q0, q1, qv.len()) {
        return None;
    }

    let mut union = Vec::with_capacity(pv.len() + qv.len() - 2);
    for v in pv.iter().chain(qv) {
        push_unique(&mut union, *v, eps);
    }
    let center = vertex_centroid(&union)?;
    sort_by_angle(&mut union, center);
    normalize_ccw(&mut union);
    if union.len() >= 3 && is_strictly_convex(&union) {
        Some(Polygon::from_vec(union))
    } else {
        None
    }
}

#[inline]
fn consecutive(a: usize, b: usize, n: usize) -> bool {
    (a + 1) % n == b || (b + 1) % n == a
}
