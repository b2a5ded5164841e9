use polycover::api::{CoveragePath, Plan, SegmentKind};
use polycover::Point2;
use serde::Serialize;

/// JSON document written by `cli decompose`.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub spacing: f64,
    pub complete: bool,
    /// Triangle corners, CCW.
    pub triangles: Vec<[[f64; 2]; 3]>,
    /// Triangle corners as indices into the caller's input point list.
    pub triangle_indices: Vec<[usize; 3]>,
    pub pieces: Vec<Vec<[f64; 2]>>,
    /// One path per piece, same order as `pieces`.
    pub paths: Vec<Vec<SegmentOut>>,
    pub stitched: Vec<SegmentOut>,
    pub stitched_length: f64,
}

#[derive(Debug, Serialize)]
pub struct SegmentOut {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub kind: &'static str,
}

#[inline]
fn xy(p: Point2) -> [f64; 2] {
    [p.x, p.y]
}

fn segments(path: &CoveragePath) -> Vec<SegmentOut> {
    path.segments
        .iter()
        .map(|s| SegmentOut {
            start: xy(s.start),
            end: xy(s.end),
            kind: match s.kind {
                SegmentKind::Stripe => "stripe",
                SegmentKind::Transition => "transition",
            },
        })
        .collect()
}

impl PlanReport {
    pub fn from_plan(plan: &Plan) -> Self {
        let d = &plan.decomposition;
        let tri = &d.triangulation;
        Self {
            spacing: plan.spacing,
            complete: d.is_complete(),
            triangles: tri
                .triangles()
                .iter()
                .map(|t| tri.corners(t).map(xy))
                .collect(),
            triangle_indices: tri
                .triangles()
                .iter()
                .map(|t| t.idx.map(|i| tri.source_index(i)))
                .collect(),
            pieces: d
                .pieces
                .iter()
                .map(|p| p.vertices().iter().copied().map(xy).collect())
                .collect(),
            paths: plan.paths.iter().map(segments).collect(),
            stitched: segments(&plan.stitched),
            stitched_length: plan.stitched.length(),
        }
    }
}
