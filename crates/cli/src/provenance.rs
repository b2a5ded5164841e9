use anyhow::Result;
use polycover::api::Plan;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::io::write_json;

/// Inputs of one CLI run, tagged by subcommand.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RunParams {
    Decompose {
        input: String,
        vertices: usize,
        spacing: f64,
        eps: f64,
    },
    Random {
        vertices: usize,
        radius: f64,
        seed: u64,
        index: u64,
    },
}

/// Outcome of a planning run, enough to spot partial decompositions at a glance.
#[derive(Debug, Serialize, PartialEq)]
pub struct PlanSummary {
    pub complete: bool,
    pub triangles: usize,
    pub expected_triangles: usize,
    pub dropped_corners: usize,
    pub pieces: usize,
    pub segments: usize,
    pub stitched_length: f64,
}

impl PlanSummary {
    pub fn from_plan(plan: &Plan) -> Self {
        let tri = &plan.decomposition.triangulation;
        Self {
            complete: plan.decomposition.is_complete(),
            triangles: tri.len(),
            expected_triangles: tri.expected_len(),
            dropped_corners: tri.degenerate(),
            pieces: plan.decomposition.pieces.len(),
            segments: plan.stitched.len(),
            stitched_length: plan.stitched.length(),
        }
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    lib_version: &'static str,
    params: &'a RunParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a PlanSummary>,
    output: String,
}

/// Write `<stem>.provenance.json` next to `artifact` and return its path.
pub fn write_sidecar(
    artifact: &Path,
    params: &RunParams,
    summary: Option<&PlanSummary>,
) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let doc = Sidecar {
        code_rev: current_git_rev(),
        lib_version: polycover::VERSION,
        params,
        summary,
        output: artifact.to_string_lossy().into_owned(),
    };
    write_json(&path, &doc)?;
    tracing::debug!(sidecar = %path.display(), "wrote provenance");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit of the running code: `GIT_COMMIT` (build time, then run time), else `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
