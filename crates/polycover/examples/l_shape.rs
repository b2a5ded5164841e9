//! Decompose an L-shaped polygon and print its coverage plan.
//!
//! Usage:
//!   cargo run -p polycover --example l_shape -- [spacing]

use polycover::prelude::*;

fn main() {
    let spacing: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1.0);
    let points = [
        Vec2::new(0.0, 0.0),
        Vec2::new(20.0, 0.0),
        Vec2::new(20.0, 10.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(10.0, 20.0),
        Vec2::new(0.0, 20.0),
    ];
    let cfg = PlanCfg {
        spacing,
        ..PlanCfg::default()
    };
    let out = match plan(&points, cfg) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    let d = &out.decomposition;
    println!(
        "triangles={} pieces={} complete={}",
        d.triangulation.len(),
        d.pieces.len(),
        d.is_complete()
    );
    for (i, (piece, path)) in d.pieces.iter().zip(&out.paths).enumerate() {
        println!(
            "piece {i}: V={} area={:.2} stripes={} length={:.2}",
            piece.len(),
            piece.area(),
            path.stripes().count(),
            path.length()
        );
    }
    println!(
        "stitched: segments={} length={:.2}",
        out.stitched.len(),
        out.stitched.length()
    );
}
