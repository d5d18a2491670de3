// crate modules
use crate::error::{Error, Result};
use crate::mesh::Mesh;

// internal modules
use crate::vtk::MeshToVtkBuilder;

// extrenal crates
use vtkio::model::{
    Attribute, Attributes, ByteOrder, CellType, Cells, DataArray, DataSet, ElementType, IOBuffer,
    UnstructuredGridPiece, Version, VertexNumbers, Vtk,
};

/// Convert triangular meshes to VTK unstructured grids for plotting
///
/// Every element becomes a VTK triangle and node elevations are written as
/// point data. Further node arrays, such as every variable of a SELAFIN time
/// step, can be attached with [convert_with()](MeshToVtk::convert_with).
///
/// The fields remain public for direct use, but for convenience and style
/// preference a builder pattern is also implemented and recommended.
///
/// ```rust
/// # use hydromesh_grid::vtk::MeshToVtk;
/// // Plot the surface in 3D, naming the elevations after the variable
/// let converter = MeshToVtk::builder()
///     .scalar_name("BOTTOM")
///     .elevate(true)
///     .build();
/// ```
#[derive(Debug, PartialEq)]
pub struct MeshToVtk {
    /// Title of the dataset
    pub title: String,
    /// Name of the node elevation array
    pub scalar_name: String,
    /// Use node elevations as point z coordinates
    pub elevate: bool,
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
}

// Public API
impl MeshToVtk {
    /// Start with the default configuration
    pub fn new() -> MeshToVtk {
        Default::default()
    }

    /// Get an instance of the [MeshToVtkBuilder]
    pub fn builder() -> MeshToVtkBuilder {
        MeshToVtkBuilder::default()
    }

    /// Convert a [Mesh] to a vtkio::Vtk object
    pub fn convert(&self, mesh: &Mesh) -> Vtk {
        self.unstructured_vtk(mesh, self.collect_attributes(mesh))
    }

    /// Convert a [Mesh] with additional named node arrays
    ///
    /// Every array must hold one value per node.
    pub fn convert_with(&self, mesh: &Mesh, arrays: &[(String, Vec<f64>)]) -> Result<Vtk> {
        let mut attributes = self.collect_attributes(mesh);
        for (name, values) in arrays {
            if values.len() != mesh.nnodes() {
                return Err(Error::UnexpectedDimensions {
                    what: "point data values",
                    expected: mesh.nnodes(),
                    found: values.len(),
                });
            }
            attributes
                .point
                .push(Self::scalars(name.trim(), values.clone()));
        }
        Ok(self.unstructured_vtk(mesh, attributes))
    }
}

impl Default for MeshToVtk {
    fn default() -> Self {
        MeshToVtkBuilder::default().build()
    }
}

/// Implementations for building the unstructured grid
impl MeshToVtk {
    fn unstructured_vtk(&self, mesh: &Mesh, data: Attributes) -> Vtk {
        let (connectivity, offsets) = Self::cell_vertices(mesh);

        Vtk {
            version: Version::Auto,
            title: self.title.clone(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::inline(UnstructuredGridPiece {
                points: self.points(mesh).into(),
                cells: Cells {
                    cell_verts: VertexNumbers::XML {
                        connectivity,
                        offsets,
                    },
                    types: vec![CellType::Triangle; mesh.nelements()],
                },
                data,
            }),
        }
    }

    /// Flattened point coordinates
    fn points(&self, mesh: &Mesh) -> Vec<f64> {
        mesh.nodes
            .iter()
            .flat_map(|n| [n.x, n.y, if self.elevate { n.z } else { 0.0 }])
            .collect()
    }

    /// Connectivity and the offset to the end of every cell
    fn cell_vertices(mesh: &Mesh) -> (Vec<u64>, Vec<u64>) {
        let connectivity = mesh
            .elements
            .iter()
            .flatten()
            .map(|&n| n as u64)
            .collect();
        let offsets = (1..=mesh.nelements() as u64).map(|i| i * 3).collect();
        (connectivity, offsets)
    }

    /// Node elevations as the primary point scalars
    fn collect_attributes(&self, mesh: &Mesh) -> Attributes {
        let mut attributes = Attributes::new();
        attributes
            .point
            .push(Self::scalars(&self.scalar_name, mesh.z()));
        attributes
    }

    fn scalars(name: &str, values: Vec<f64>) -> Attribute {
        Attribute::DataArray(DataArray {
            name: name.to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::F64(values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh() -> Mesh {
        Mesh::from_xyz(
            &[0.0, 1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[-1.0, -2.0, -3.0, -4.0],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn flat_by_default() {
        let converter = MeshToVtk::new();
        assert_eq!(converter.points(&mesh())[..6], [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

        let converter = MeshToVtk::builder().elevate(true).build();
        assert_eq!(converter.points(&mesh())[..3], [0.0, 0.0, -1.0]);
    }

    #[test]
    fn cells_are_triangles() {
        let (connectivity, offsets) = MeshToVtk::cell_vertices(&mesh());
        assert_eq!(connectivity, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(offsets, vec![3, 6]);
    }

    #[test]
    fn arrays_must_match_nodes() {
        let converter = MeshToVtk::new();
        let arrays = vec![("DEPTH".to_string(), vec![1.0; 3])];
        assert!(matches!(
            converter.convert_with(&mesh(), &arrays),
            Err(Error::UnexpectedDimensions { expected: 4, found: 3, .. })
        ));

        let arrays = vec![("DEPTH".to_string(), vec![1.0; 4])];
        let vtk = converter.convert_with(&mesh(), &arrays).unwrap();
        assert_eq!(vtk.title, "created with hydromesh");
    }
}
