//! Conversion of meshes to VTK formats for plotting
//!
//! Meshes are converted to an unstructured grid of triangles with node values
//! as point data, using [MeshToVtk] configured through its builder.
//!
//! ```rust, no_run
//! # use hydromesh_grid::read_adcirc;
//! # use hydromesh_grid::vtk::{mesh_to_vtk, write_vtk, VtkFormat};
//! let mesh = read_adcirc("./mesh.grd").unwrap();
//! let vtk = mesh_to_vtk(&mesh);
//! write_vtk(vtk, "./mesh.vtu", VtkFormat::Xml).unwrap();
//! ```

mod builder;
mod convert;

#[doc(inline)]
pub use builder::MeshToVtkBuilder;

#[doc(inline)]
pub use convert::MeshToVtk;

// standard library
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::mesh::Mesh;

// external crates
use log::debug;
use vtkio::model::{ByteOrder, Vtk};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VtkFormat {
    /// XML unstructured grid (`.vtu`)
    #[default]
    Xml,
    /// Legacy text format (`.vtk`)
    LegacyAscii,
    /// Legacy binary format (`.vtk`)
    LegacyBinary,
}

impl VtkFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            VtkFormat::Xml => "vtu",
            VtkFormat::LegacyAscii | VtkFormat::LegacyBinary => "vtk",
        }
    }
}

/// Convert a [Mesh] with the default [MeshToVtk] configuration
pub fn mesh_to_vtk(mesh: &Mesh) -> Vtk {
    MeshToVtk::default().convert(mesh)
}

/// Write a converted mesh to `path` in the chosen format
///
/// The extension of `path` is replaced with the conventional one for the
/// format, since the XML writer relies on it.
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref().with_extension(format.extension());
    debug!("writing {:?} to {}", format, path.display());

    match format {
        VtkFormat::Xml => vtk.export(&path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(&path)?,
        VtkFormat::LegacyBinary => match vtk.byte_order {
            ByteOrder::BigEndian => vtk.export_be(&path)?,
            ByteOrder::LittleEndian => vtk.export_le(&path)?,
        },
    }
    Ok(())
}
