//! Plot files for ParaView and VisIt

// standard library
use std::path::PathBuf;

// crate modules
use super::load_adcirc;

// hydromesh modules
use hydromesh_grid::vtk::{write_vtk, MeshToVtk, VtkFormat};
use hydromesh_grid::{from_selafin, variable_values};
use hydromesh_selafin::SelafinReader;
use hydromesh_utils::f;

// external crates
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;

/// VTK output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// XML unstructured grid (.vtu)
    Xml,
    /// Legacy text (.vtk)
    Ascii,
    /// Legacy big endian binary (.vtk)
    Binary,
}

impl From<FormatArg> for VtkFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Xml => VtkFormat::Xml,
            FormatArg::Ascii => VtkFormat::LegacyAscii,
            FormatArg::Binary => VtkFormat::LegacyBinary,
        }
    }
}

#[derive(Args, Debug)]
pub struct AdcircToVtkArgs {
    /// Path to the input ADCIRC grid
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Path to the output, the extension is set by the format
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Xml)]
    pub format: FormatArg,

    /// Use the elevations as z coordinates instead of a flat mesh
    #[arg(long)]
    pub elevate: bool,
}

#[derive(Args, Debug)]
pub struct SelafinToVtkArgs {
    /// Path to the input SELAFIN file
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Path to the output, the extension is set by the format
    #[arg(short, long, value_name = "path")]
    pub output: PathBuf,

    /// Time step index, 0 for the first
    #[arg(short, long, value_name = "index", default_value_t = 0)]
    pub step: usize,

    /// Variable used as z coordinates with --elevate
    ///
    /// Defaults to the first variable of the file.
    #[arg(long, value_name = "name")]
    pub variable: Option<String>,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Xml)]
    pub format: FormatArg,

    /// Use the variable as z coordinates instead of a flat mesh
    #[arg(long)]
    pub elevate: bool,
}

pub fn adcirc_to_vtk(args: AdcircToVtkArgs) -> Result<()> {
    let mesh = load_adcirc(&args.input)?;
    let vtk = MeshToVtk::builder().elevate(args.elevate).build().convert(&mesh);

    info!("Writing {}", args.output.display());
    write_vtk(vtk, &args.output, args.format.into())
        .with_context(|| f!("failed to write {}", args.output.display()))
}

pub fn selafin_to_vtk(args: SelafinToVtkArgs) -> Result<()> {
    info!("Reading {}", args.input.display());
    let mut reader = SelafinReader::open(&args.input)
        .with_context(|| f!("failed to read {}", args.input.display()))?;
    let step = reader.read_time_step(args.step)?;
    let header = reader.header();

    let name = match &args.variable {
        Some(name) => name.trim().to_string(),
        None => header
            .variables
            .first()
            .map(|v| v.name.text())
            .context("file has no variables")?,
    };

    let mesh = from_selafin(reader.mesh(), variable_values(header, &step, &name)?)?;
    let others: Vec<(String, Vec<f64>)> = header
        .variables
        .iter()
        .zip(&step.values)
        .map(|(v, values)| (v.name.text(), values.clone()))
        .filter(|(n, _)| !n.eq_ignore_ascii_case(&name))
        .collect();

    let vtk = MeshToVtk::builder()
        .title(&f!("{} t = {}", header.title.text(), step.time))
        .scalar_name(&name)
        .elevate(args.elevate)
        .build()
        .convert_with(&mesh, &others)?;

    info!("Writing {}", args.output.display());
    write_vtk(vtk, &args.output, args.format.into())
        .with_context(|| f!("failed to write {}", args.output.display()))
}
