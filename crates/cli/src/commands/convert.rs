//! Conversions between mesh formats

// standard library
use std::path::PathBuf;

// crate modules
use super::{load_adcirc, save_adcirc};

// hydromesh modules
use hydromesh_grid::{
    from_selafin, read_2dm, read_dat, read_ply, to_selafin_with, variable_values, write_2dm,
    write_wkt, Boundary, BOTTOM,
};
use hydromesh_selafin::{write_selafin, Precision, SelafinReader};
use hydromesh_utils::f;

// external crates
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;

/// Plain conversion from one file to another
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input mesh
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Path to the output file
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,
}

/// Float width of SELAFIN outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrecisionArg {
    /// 4 byte floats ("SERAFIN ")
    Single,
    /// 8 byte floats ("SERAFIND")
    Double,
}

impl From<PrecisionArg> for Precision {
    fn from(value: PrecisionArg) -> Self {
        match value {
            PrecisionArg::Single => Precision::Single,
            PrecisionArg::Double => Precision::Double,
        }
    }
}

#[derive(Args, Debug)]
pub struct AdcircToSelafinArgs {
    /// Path to the input ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Path to the output SELAFIN file
    ///
    /// A boundary conditions file is written alongside with the `.cli`
    /// extension, every boundary node a closed wall.
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Float precision of the output
    #[arg(short, long, value_enum, default_value_t = PrecisionArg::Single)]
    pub precision: PrecisionArg,

    /// Skip the boundary conditions file
    #[arg(long)]
    pub no_cli: bool,
}

#[derive(Args, Debug)]
pub struct SelafinToAdcircArgs {
    /// Path to the input SELAFIN file
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Path to the output ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Variable written as the node elevations
    #[arg(long, value_name = "name", default_value = BOTTOM.0)]
    pub variable: String,

    /// Time step index, 0 for the first
    #[arg(short, long, value_name = "index", default_value_t = 0)]
    pub step: usize,
}

pub fn adcirc_to_selafin(args: AdcircToSelafinArgs) -> Result<()> {
    let mesh = load_adcirc(&args.input)?;
    let boundary = Boundary::of(&mesh)?;
    let selafin = to_selafin_with(&mesh, &boundary, args.precision.into())?;

    info!("Writing {}", args.output.display());
    write_selafin(&selafin, &args.output)
        .with_context(|| f!("failed to write {}", args.output.display()))?;

    if !args.no_cli {
        let path = args.output.with_extension("cli");
        info!("Writing {}", path.display());
        boundary.write_cli(&path)?;
    }
    Ok(())
}

pub fn selafin_to_adcirc(args: SelafinToAdcircArgs) -> Result<()> {
    info!("Reading {}", args.input.display());
    let mut reader = SelafinReader::open(&args.input)
        .with_context(|| f!("failed to read {}", args.input.display()))?;
    let step = reader.read_time_step(args.step)?;

    let values = variable_values(reader.header(), &step, &args.variable)?;
    let mesh = from_selafin(reader.mesh(), values)?;
    save_adcirc(&mesh, &args.output)
}

pub fn twodm_to_adcirc(args: ConvertArgs) -> Result<()> {
    info!("Reading {}", args.input.display());
    let mesh = read_2dm(&args.input)
        .with_context(|| f!("failed to read 2DM mesh {}", args.input.display()))?;
    save_adcirc(&mesh, &args.output)
}

pub fn adcirc_to_twodm(args: ConvertArgs) -> Result<()> {
    let mesh = load_adcirc(&args.input)?;
    info!("Writing {}", args.output.display());
    Ok(write_2dm(&mesh, &args.output)?)
}

pub fn dat_to_adcirc(args: ConvertArgs) -> Result<()> {
    info!("Reading {}", args.input.display());
    let mesh = read_dat(&args.input)
        .with_context(|| f!("failed to read DAT mesh {}", args.input.display()))?;
    save_adcirc(&mesh, &args.output)
}

pub fn ply_to_adcirc(args: ConvertArgs) -> Result<()> {
    info!("Reading {}", args.input.display());
    let mesh = read_ply(&args.input)
        .with_context(|| f!("failed to read PLY mesh {}", args.input.display()))?;
    save_adcirc(&mesh, &args.output)
}

pub fn adcirc_to_wkt(args: ConvertArgs) -> Result<()> {
    let mesh = load_adcirc(&args.input)?;
    let (elements, nodes) = write_wkt(&mesh, &args.output)?;
    info!("Written {} and {}", elements.display(), nodes.display());
    Ok(())
}
