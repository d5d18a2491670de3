//! Command line conversions for 2D triangular hydraulic meshes

mod commands;

// external crates
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::debug;

/// Conversion tools for 2D triangular hydraulic meshes
///
/// Converts between ADCIRC, SMS 2DM, DAT, PLY and TELEMAC SELAFIN meshes,
/// exports to VTK and WKT for plotting, prepares gmsh and Triangle geometry
/// from GIS exports, and sets node values from surfaces, survey points,
/// wave model output or polygons.
#[derive(Parser, Debug)]
#[command(name = "hydromesh", version, about, long_about)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG (-v)
    /// or TRACE (-vv). Errors and Warnings are always logged unless in quiet
    /// (-q) mode.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Supress all log output and progress bars (overrules --verbose)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// ADCIRC grid to SELAFIN geometry with boundary conditions
    #[command(name = "adcirc2sel")]
    AdcircToSelafin(commands::convert::AdcircToSelafinArgs),

    /// SELAFIN variable of one time step to an ADCIRC grid
    #[command(name = "sel2adcirc")]
    SelafinToAdcirc(commands::convert::SelafinToAdcircArgs),

    /// SMS 2DM mesh to ADCIRC grid
    #[command(name = "2dm2adcirc")]
    TwoDmToAdcirc(commands::convert::ConvertArgs),

    /// ADCIRC grid to SMS 2DM mesh
    #[command(name = "adcirc2dm")]
    AdcircToTwoDm(commands::convert::ConvertArgs),

    /// DAT mesh to ADCIRC grid, keeping triangles only
    #[command(name = "dat2adcirc")]
    DatToAdcirc(commands::convert::ConvertArgs),

    /// ASCII PLY triangles to ADCIRC grid
    #[command(name = "ply2adcirc")]
    PlyToAdcirc(commands::convert::ConvertArgs),

    /// ADCIRC grid to WKT element and node csv files
    #[command(name = "adcirc2wkt")]
    AdcircToWkt(commands::convert::ConvertArgs),

    /// ADCIRC grid to VTK for plotting
    #[command(name = "adcirc2vtk")]
    AdcircToVtk(commands::vtk::AdcircToVtkArgs),

    /// SELAFIN time step to VTK with every variable as point data
    #[command(name = "sel2vtk")]
    SelafinToVtk(commands::vtk::SelafinToVtkArgs),

    /// Interpolate node elevations from a TIN surface
    #[command(name = "interp")]
    Interp(commands::interp::InterpArgs),

    /// Interpolate node elevations from x,y,z points
    #[command(name = "interp-pts")]
    InterpPoints(commands::interp::InterpPointsArgs),

    /// Assign polygon attributes to node values
    #[command(name = "assign")]
    Assign(commands::interp::AssignArgs),

    /// Interpolate a wave model x,y,value table onto a SELAFIN mesh
    #[command(name = "swan2sel")]
    SwanToSelafin(commands::interp::SwanToSelafinArgs),

    /// GIS nodes, boundary, lines and holes to a gmsh geometry
    #[command(name = "gis2gmsh")]
    GisToGmsh(commands::geometry::GisToGmshArgs),

    /// GIS nodes, boundary, lines and hole points to a Triangle .poly file
    #[command(name = "gis2triangle")]
    GisToTriangle(commands::geometry::GisToTriangleArgs),

    /// Summary of a SELAFIN file
    #[command(name = "info")]
    Info(commands::info::InfoArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging_init(cli.verbose, cli.quiet)?;
    debug!("{:?}", cli.command);

    let progress = !cli.quiet;
    match cli.command {
        Commands::AdcircToSelafin(args) => commands::convert::adcirc_to_selafin(args),
        Commands::SelafinToAdcirc(args) => commands::convert::selafin_to_adcirc(args),
        Commands::TwoDmToAdcirc(args) => commands::convert::twodm_to_adcirc(args),
        Commands::AdcircToTwoDm(args) => commands::convert::adcirc_to_twodm(args),
        Commands::DatToAdcirc(args) => commands::convert::dat_to_adcirc(args),
        Commands::PlyToAdcirc(args) => commands::convert::ply_to_adcirc(args),
        Commands::AdcircToWkt(args) => commands::convert::adcirc_to_wkt(args),
        Commands::AdcircToVtk(args) => commands::vtk::adcirc_to_vtk(args),
        Commands::SelafinToVtk(args) => commands::vtk::selafin_to_vtk(args),
        Commands::Interp(args) => commands::interp::interp(args, progress),
        Commands::InterpPoints(args) => commands::interp::interp_points(args, progress),
        Commands::Assign(args) => commands::interp::assign(args, progress),
        Commands::SwanToSelafin(args) => commands::interp::swan_to_selafin(args, progress),
        Commands::GisToGmsh(args) => commands::geometry::gis_to_gmsh(args),
        Commands::GisToTriangle(args) => commands::geometry::gis_to_triangle(args),
        Commands::Info(args) => commands::info::info(args),
    }
}

/// Sets up logging at runtime to allow for multiple verbosity levels
fn logging_init(verbosity: u8, quiet: bool) -> Result<()> {
    Ok(stderrlog::new()
        .modules([
            module_path!(),
            "hydromesh_grid",
            "hydromesh_interp",
            "hydromesh_selafin",
        ])
        .quiet(quiet)
        .verbosity(verbosity as usize + 2)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hydromesh", "adcirc2sel", "-i", "mesh.grd", "-o", "mesh.slf", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert!(matches!(cli.command, Commands::AdcircToSelafin(_)));
    }

    #[rstest]
    #[case("2dm2adcirc")]
    #[case("adcirc2dm")]
    #[case("dat2adcirc")]
    #[case("adcirc2wkt")]
    #[case("adcirc2vtk")]
    #[case("ply2adcirc")]
    fn script_names(#[case] name: &str) {
        let cli = Cli::try_parse_from(["hydromesh", name, "-i", "a", "-o", "b"]);
        assert!(cli.is_ok(), "{name}");
    }

    #[test]
    fn geometry_arguments() {
        let cli = Cli::try_parse_from([
            "hydromesh", "gis2triangle", "-n", "n.csv", "-b", "b.csv", "--holes", "h.csv", "-o",
            "out.poly",
        ])
        .unwrap();
        match cli.command {
            Commands::GisToTriangle(args) => {
                assert!(args.lines.is_none());
                assert!(args.holes.is_some());
                assert!(!args.keep_duplicates);
            }
            _ => panic!("wrong sub-command"),
        }

        let cli = Cli::try_parse_from([
            "hydromesh", "swan2sel", "-i", "out.xyz", "-m", "mesh.slf", "-o", "waves.slf",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::SwanToSelafin(a) if a.neighbours == 4));
    }

    #[rstest]
    #[case(&["hydromesh", "interp-pts", "-m", "a"])]
    #[case(&["hydromesh", "info", "-i", "a", "--json", "--times"])]
    #[case(&["hydromesh", "adcirc2sel", "-i", "a", "-o", "b", "-p", "half"])]
    #[case(&["hydromesh", "swan2sel", "-i", "a", "-o", "b"])]
    #[case(&["hydromesh", "gis2gmsh", "-n", "a", "-o", "b"])]
    fn rejected_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
