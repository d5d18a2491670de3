//! Mesh generator inputs from GIS exports

// standard library
use std::path::{Path, PathBuf};

// hydromesh modules
use hydromesh_grid::{read_gis_nodes, read_hole_points, read_shapes, Geometry};
use hydromesh_utils::f;

// external crates
use anyhow::{Context, Result};
use clap::Args;
use log::info;

#[derive(Args, Debug)]
pub struct GisToGmshArgs {
    /// Path to x,y,z[,size] nodes without a header
    #[arg(short, long, value_name = "path")]
    pub nodes: PathBuf,

    /// Path to shapeid,x,y rows of the outer boundary
    #[arg(short, long, value_name = "path")]
    pub boundary: PathBuf,

    /// Path to shapeid,x,y rows of constraint lines
    #[arg(short, long, value_name = "path")]
    pub lines: Option<PathBuf>,

    /// Path to shapeid,x,y rows of hole outlines
    #[arg(long, value_name = "path")]
    pub holes: Option<PathBuf>,

    /// Path to the output gmsh geometry
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Keep nodes that repeat an x,y location
    #[arg(long)]
    pub keep_duplicates: bool,
}

#[derive(Args, Debug)]
pub struct GisToTriangleArgs {
    /// Path to x,y,z nodes without a header
    #[arg(short, long, value_name = "path")]
    pub nodes: PathBuf,

    /// Path to shapeid,x,y rows of the outer boundary
    #[arg(short, long, value_name = "path")]
    pub boundary: PathBuf,

    /// Path to shapeid,x,y rows of constraint lines
    #[arg(short, long, value_name = "path")]
    pub lines: Option<PathBuf>,

    /// Path to x,y points, one inside each hole
    #[arg(long, value_name = "path")]
    pub holes: Option<PathBuf>,

    /// Path to the output Triangle .poly file
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Keep nodes that repeat an x,y location
    #[arg(long)]
    pub keep_duplicates: bool,
}

pub fn gis_to_gmsh(args: GisToGmshArgs) -> Result<()> {
    let mut geometry = load_geometry(
        &args.nodes,
        &args.boundary,
        args.lines.as_deref(),
        !args.keep_duplicates,
    )?;

    if let Some(path) = &args.holes {
        info!("Reading {}", path.display());
        let rows = read_shapes(path).with_context(|| f!("failed to read holes {}", path.display()))?;
        geometry = geometry.with_holes(&rows)?;
    }

    info!("Writing {}", args.output.display());
    geometry
        .write_geo(&args.output)
        .with_context(|| f!("failed to write {}", args.output.display()))
}

pub fn gis_to_triangle(args: GisToTriangleArgs) -> Result<()> {
    let mut geometry = load_geometry(
        &args.nodes,
        &args.boundary,
        args.lines.as_deref(),
        !args.keep_duplicates,
    )?;

    if let Some(path) = &args.holes {
        info!("Reading {}", path.display());
        let points = read_hole_points(path)
            .with_context(|| f!("failed to read hole points {}", path.display()))?;
        geometry = geometry.with_hole_points(&points);
    }

    info!("Writing {}", args.output.display());
    geometry
        .write_poly(&args.output)
        .with_context(|| f!("failed to write {}", args.output.display()))
}

/// Nodes, boundary and optional constraint lines shared by both outputs
fn load_geometry(
    nodes: &Path,
    boundary: &Path,
    lines: Option<&Path>,
    remove_duplicates: bool,
) -> Result<Geometry> {
    info!("Reading {}", nodes.display());
    let nodes = read_gis_nodes(nodes).with_context(|| f!("failed to read nodes {}", nodes.display()))?;

    info!("Reading {}", boundary.display());
    let rows = read_shapes(boundary)
        .with_context(|| f!("failed to read boundary {}", boundary.display()))?;
    let mut geometry = Geometry::new(nodes, remove_duplicates)?.with_boundary(&rows)?;

    if let Some(path) = lines {
        info!("Reading {}", path.display());
        let rows = read_shapes(path).with_context(|| f!("failed to read lines {}", path.display()))?;
        geometry = geometry.with_lines(&rows)?;
    }

    info!(
        "{} nodes, {} lines, {} holes",
        geometry.nodes.len(),
        geometry.lines.len(),
        geometry.holes.len()
    );
    Ok(geometry)
}
