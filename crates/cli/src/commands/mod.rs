//! One module per group of related sub-commands

pub mod convert;
pub mod geometry;
pub mod info;
pub mod interp;
pub mod vtk;

// standard library
use std::path::Path;

// hydromesh modules
use hydromesh_grid::{read_adcirc, write_adcirc, Mesh};
use hydromesh_utils::f;

// external crates
use anyhow::{Context, Result};
use log::info;

/// Read an ADCIRC grid with the path as error context
pub(crate) fn load_adcirc(path: &Path) -> Result<Mesh> {
    info!("Reading {}", path.display());
    read_adcirc(path).with_context(|| f!("failed to read ADCIRC grid {}", path.display()))
}

/// Write an ADCIRC grid with the path as error context
pub(crate) fn save_adcirc(mesh: &Mesh, path: &Path) -> Result<()> {
    info!("Writing {}", path.display());
    write_adcirc(mesh, path)
        .with_context(|| f!("failed to write ADCIRC grid {}", path.display()))
}
