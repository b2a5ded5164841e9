use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polycover::Point2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ordered polygon vertices as stored on disk.
#[derive(Debug, Deserialize, Serialize)]
pub struct PolygonFile {
    pub points: Vec<[f64; 2]>,
}

impl PolygonFile {
    pub fn from_points(points: &[Point2]) -> Self {
        Self {
            points: points.iter().map(|p| [p.x, p.y]).collect(),
        }
    }

    pub fn to_points(&self) -> Vec<Point2> {
        self.points
            .iter()
            .map(|[x, y]| Point2::new(*x, *y))
            .collect()
    }
}

/// Read an ordered point list from `.json` or `.csv` (columns `x`, `y`).
pub fn read_points(path: &Path) -> Result<Vec<Point2>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let points = match ext.as_deref() {
        Some("json") => read_points_json(path)?,
        Some("csv") => read_points_csv(path)?,
        _ => bail!("unsupported input {}, expected .json or .csv", path.display()),
    };
    if let Some(i) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        bail!("{}: point {i} is not finite", path.display());
    }
    tracing::info!(points = points.len(), input = %path.display(), "read polygon");
    Ok(points)
}

fn read_points_json(path: &Path) -> Result<Vec<Point2>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: PolygonFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(file.to_points())
}

fn read_points_csv(path: &Path) -> Result<Vec<Point2>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y columns from {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(i, xy)| match xy {
            (Some(x), Some(y)) => Ok(Point2::new(x, y)),
            _ => bail!("{}: row {i} is missing x or y", path.display()),
        })
        .collect()
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
