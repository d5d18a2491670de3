// internal modules
use crate::vtk::MeshToVtk;

// extrenal crates
use log::warn;
use vtkio::model::ByteOrder;

/// Builder implementation for MeshToVtk configuration
///
/// The fields of [MeshToVtk] are left public for direct use but the module also
/// implements a builder.
///
/// Chained setter calls configure any number of parameters (including none),
/// and [build()](MeshToVtkBuilder::build) gives the final [MeshToVtk].
///
/// ```rust, no_run
/// # use hydromesh_grid::vtk::{write_vtk, MeshToVtk, VtkFormat};
/// # use hydromesh_grid::Mesh;
/// # use vtkio::model::ByteOrder;
/// # let mesh = Mesh::default();
/// // Make a new builder, change some values
/// let converter = MeshToVtk::builder()
///     .scalar_name("BOTTOM")
///     .elevate(true)
///     .byte_order(ByteOrder::LittleEndian)
///     .build();
///
/// // Convert the mesh using the parameters set
/// let vtk = converter.convert(&mesh);
///
/// // Write to "output.vtk" using the old ASCII text format
/// write_vtk(vtk, "./output.vtk", VtkFormat::LegacyAscii).unwrap();
/// ```
#[derive(Debug)]
pub struct MeshToVtkBuilder {
    /// Title written to legacy files
    title: String,
    /// Name of the node elevation array
    scalar_name: String,
    /// Use node elevations as the z coordinate of the points
    elevate: bool,
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
}

impl MeshToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [MeshToVtk] type
    pub fn build(self) -> MeshToVtk {
        MeshToVtk {
            title: self.title,
            scalar_name: self.scalar_name,
            elevate: self.elevate,
            byte_order: self.byte_order,
        }
    }

    /// Title of the dataset
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Name of the point data array holding node elevations
    ///
    /// Defaults to `"z"`. Useful when the elevations are really some other
    /// SELAFIN variable, such as a water depth.
    pub fn scalar_name(mut self, name: &str) -> Self {
        if name.trim().is_empty() {
            warn!("Warning: empty scalar name ignored");
            return self;
        }
        self.scalar_name = name.trim().to_string();
        self
    }

    /// Use node elevations as the z coordinate of every point
    ///
    /// Off by default so the mesh is flat in plots, with elevations only
    /// used to colour the surface.
    pub fn elevate(mut self, elevate: bool) -> Self {
        self.elevate = elevate;
        self
    }

    /// Set the byte ordering
    ///
    /// Only relevant to legacy binary output. Visit only reads big endian,
    /// so this is the default.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }
}

impl Default for MeshToVtkBuilder {
    fn default() -> Self {
        Self {
            title: "created with hydromesh".to_string(),
            scalar_name: "z".to_string(),
            elevate: false,
            byte_order: ByteOrder::BigEndian,
        }
    }
}
