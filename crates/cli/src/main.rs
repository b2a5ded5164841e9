use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polycover::api::{
    draw_star_polygon, plan, GeomCfg, PlanCfg, PolygonReplay, RadialCfg, VertexCount,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;
mod report;

use provenance::{PlanSummary, RunParams};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Polygon decomposition and coverage planning runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Triangulate, merge into convex pieces, and plan coverage for one polygon
    Decompose {
        /// Ordered points: JSON `{"points": [[x, y], ...]}` or CSV with `x,y` columns
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Scan-line spacing and boundary inset
        #[arg(long, default_value_t = 1.0)]
        spacing: f64,
        /// Point equality / containment tolerance
        #[arg(long, default_value_t = 1e-6)]
        eps: f64,
    },
    /// Write a random star-shaped polygon in the JSON input format
    Random {
        #[arg(long, default_value_t = 12)]
        vertices: usize,
        #[arg(long, default_value_t = 10.0)]
        radius: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the code revision, library version, and planning defaults
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Decompose {
            input,
            out,
            spacing,
            eps,
        } => decompose(&input, &out, spacing, eps),
        Action::Random {
            vertices,
            radius,
            seed,
            index,
            out,
        } => random(vertices, radius, seed, index, &out),
        Action::Report => report(),
    }
}

fn decompose(input: &Path, out: &Path, spacing: f64, eps: f64) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), spacing, eps, "decompose");
    if !(eps.is_finite() && eps > 0.0) {
        bail!("--eps must be finite and > 0, got {eps}");
    }
    let points = io::read_points(input)?;
    let cfg = PlanCfg {
        geom: GeomCfg {
            eps_point: eps,
            eps_area: eps,
            ..GeomCfg::default()
        },
        spacing,
    };
    let result = plan(&points, cfg).with_context(|| format!("planning {}", input.display()))?;
    if !result.decomposition.is_complete() {
        tracing::warn!(
            triangles = result.decomposition.triangulation.len(),
            expected = result.decomposition.triangulation.expected_len(),
            "partial decomposition (degenerate or self-intersecting polygon)"
        );
    }
    let doc = report::PlanReport::from_plan(&result);
    io::write_json(out, &doc)?;

    let params = RunParams::Decompose {
        input: input.to_string_lossy().into_owned(),
        vertices: points.len(),
        spacing,
        eps,
    };
    let summary = PlanSummary::from_plan(&result);
    provenance::write_sidecar(out, &params, Some(&summary))?;
    tracing::info!(
        triangles = doc.triangles.len(),
        pieces = doc.pieces.len(),
        segments = doc.stitched.len(),
        "wrote plan"
    );
    Ok(())
}

fn random(vertices: usize, radius: f64, seed: u64, index: u64, out: &Path) -> Result<()> {
    tracing::info!(vertices, radius, seed, index, out = %out.display(), "random");
    if vertices < 3 {
        bail!("--vertices must be at least 3, got {vertices}");
    }
    if !(radius.is_finite() && radius > 0.0) {
        bail!("--radius must be finite and > 0, got {radius}");
    }
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(vertices),
        base_radius: radius,
        ..RadialCfg::default()
    };
    let poly = draw_star_polygon(cfg, PolygonReplay { seed, index });
    io::write_json(out, &io::PolygonFile::from_points(poly.vertices()))?;
    let params = RunParams::Random {
        vertices,
        radius,
        seed,
        index,
    };
    provenance::write_sidecar(out, &params, None)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "lib_version": polycover::VERSION,
        "defaults": {
            "spacing": PlanCfg::default().spacing,
            "eps": GeomCfg::default().eps_point,
            "max_merge_passes": GeomCfg::default().max_merge_passes,
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn random_then_decompose_writes_plan_and_sidecars() {
        let dir = tempdir().unwrap();
        let poly = dir.path().join("poly.json");
        random(16, 20.0, 7, 3, &poly).unwrap();
        assert!(dir.path().join("poly.provenance.json").exists());

        let out = dir.path().join("out/plan.json");
        decompose(&poly, &out, 1.0, 1e-6).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["complete"], true);
        assert_eq!(doc["triangles"].as_array().unwrap().len(), 14);
        assert!(!doc["pieces"].as_array().unwrap().is_empty());
        let prov: Value =
            serde_json::from_slice(&fs::read(dir.path().join("out/plan.provenance.json")).unwrap())
                .unwrap();
        assert_eq!(prov["params"]["command"], "decompose");
        assert_eq!(prov["params"]["vertices"], 16);
        assert_eq!(prov["summary"]["complete"], true);
    }

    #[test]
    fn decompose_rejects_bad_config_and_short_input() {
        let dir = tempdir().unwrap();
        let poly = dir.path().join("short.json");
        fs::write(&poly, r#"{"points": [[0, 0], [1, 0]]}"#).unwrap();
        let out = dir.path().join("plan.json");
        assert!(decompose(&poly, &out, 1.0, 1e-6).is_err());
        assert!(decompose(&poly, &out, 1.0, 0.0).is_err());
        assert!(!out.exists());
        assert!(random(2, 1.0, 0, 0, &out).is_err());
    }
}
