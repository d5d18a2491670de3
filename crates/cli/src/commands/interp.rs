//! Setting node values from other data

// standard library
use std::path::PathBuf;

// crate modules
use super::convert::PrecisionArg;
use super::{load_adcirc, save_adcirc};

// hydromesh modules
use hydromesh_grid::{default_date, SELAFIN_TITLE};
use hydromesh_interp::{
    assign_attributes, read_points, read_polygon_rows, read_swan_xyz, IdwInterpolator, Polygon,
    TinInterpolator,
};
use hydromesh_selafin::{write_selafin, Header, Selafin, SelafinReader, TimeStep};
use hydromesh_utils::f;

// external crates
use anyhow::{Context, Result};
use clap::Args;
use log::info;

#[derive(Args, Debug)]
pub struct InterpArgs {
    /// Path to the TIN surface as an ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub tin: PathBuf,

    /// Path to the ADCIRC grid to interpolate
    #[arg(short, long, value_name = "path")]
    pub mesh: PathBuf,

    /// Path to the output ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Set nodes outside of the TIN to -999 instead of the closest elevation
    #[arg(long)]
    pub no_fill: bool,
}

#[derive(Args, Debug)]
pub struct InterpPointsArgs {
    /// Path to comma separated x,y,z points without a header
    #[arg(short, long, value_name = "path")]
    pub points: PathBuf,

    /// Path to the ADCIRC grid to interpolate
    #[arg(short, long, value_name = "path")]
    pub mesh: PathBuf,

    /// Path to the output ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Number of closest points weighted, 1 to 10
    ///
    /// The default of a single point suits dense point clouds.
    #[arg(short, long, value_name = "k", default_value_t = 1)]
    pub neighbours: usize,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Path to the input ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub mesh: PathBuf,

    /// Path to shapeid,x,y,attr polygon rows without a header
    #[arg(short, long, value_name = "path")]
    pub boundary: PathBuf,

    /// Path to the output ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct SwanToSelafinArgs {
    /// Path to the wave model x,y,value table without a header
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Path to the SELAFIN file providing the mesh
    #[arg(short, long, value_name = "path")]
    pub mesh: PathBuf,

    /// Path to the output SELAFIN file
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Number of closest wave model points weighted, 1 to 10
    #[arg(short, long, value_name = "k", default_value_t = 4)]
    pub neighbours: usize,

    /// Float precision of the output
    #[arg(short, long, value_enum, default_value_t = PrecisionArg::Single)]
    pub precision: PrecisionArg,
}

pub fn interp(args: InterpArgs, progress: bool) -> Result<()> {
    let tin = TinInterpolator::new(load_adcirc(&args.tin)?)?
        .fill_nearest(!args.no_fill)
        .disable_progress(!progress);

    let mesh = load_adcirc(&args.mesh)?;
    info!("Interpolating {} nodes", mesh.nnodes());
    save_adcirc(&tin.apply(&mesh)?, &args.output)
}

pub fn interp_points(args: InterpPointsArgs, progress: bool) -> Result<()> {
    info!("Reading {}", args.points.display());
    let points = read_points(&args.points)
        .with_context(|| f!("failed to read points {}", args.points.display()))?;
    let idw = IdwInterpolator::new(&points)?
        .neighbours(args.neighbours)?
        .disable_progress(!progress);

    let mesh = load_adcirc(&args.mesh)?;
    info!("Interpolating {} nodes from {} points", mesh.nnodes(), points.len());
    save_adcirc(&idw.apply(&mesh)?, &args.output)
}

pub fn assign(args: AssignArgs, progress: bool) -> Result<()> {
    let mesh = load_adcirc(&args.mesh)?;

    info!("Reading {}", args.boundary.display());
    let rows = read_polygon_rows(&args.boundary)
        .with_context(|| f!("failed to read polygons {}", args.boundary.display()))?;
    let polygons = Polygon::from_rows(&rows)?;

    info!("Assigning {} polygons", polygons.len());
    save_adcirc(&assign_attributes(&mesh, &polygons, !progress)?, &args.output)
}

pub fn swan_to_selafin(args: SwanToSelafinArgs, progress: bool) -> Result<()> {
    info!("Reading {}", args.input.display());
    let table = read_swan_xyz(&args.input)
        .with_context(|| f!("failed to read wave model table {}", args.input.display()))?;

    info!("Reading {}", args.mesh.display());
    let reader = SelafinReader::open(&args.mesh)
        .with_context(|| f!("failed to read {}", args.mesh.display()))?;
    let mesh = reader.mesh().clone();

    info!("Interpolating {} variables onto {} nodes", table.nvariables(), mesh.npoin());
    let values = table.interpolate(&mesh.x, &mesh.y, args.neighbours, !progress)?;

    let precision = args.precision.into();
    let header = table
        .variables()
        .iter()
        .fold(Header::new(SELAFIN_TITLE, precision), |header, (name, unit)| {
            header.with_variable(name, unit)
        })
        .with_date(default_date());
    let selafin = Selafin {
        header,
        mesh,
        precision,
        time_steps: vec![TimeStep::new(0.0, values)],
    };

    info!("Writing {}", args.output.display());
    write_selafin(&selafin, &args.output)
        .with_context(|| f!("failed to write {}", args.output.display()))
}
