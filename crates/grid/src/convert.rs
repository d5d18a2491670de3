//! Conversion between in-memory meshes and SELAFIN files

// crate modules
use crate::boundary::Boundary;
use crate::error::{Error, Result};
use crate::mesh::Mesh;

// hydromesh modules
use hydromesh_selafin::{Date, Header, Precision, Selafin, TimeStep, Topology};

// external crates
use log::debug;

/// Title given to every SELAFIN file built from a mesh
pub const SELAFIN_TITLE: &str = "created with hydromesh";

/// Name and unit of the single variable holding node elevations
pub const BOTTOM: (&str, &str) = ("BOTTOM", "M");

/// Build a SELAFIN geometry file from a mesh
///
/// The file holds a single `BOTTOM` variable with the node elevations at
/// time 0. Boundary node numbers are computed from the mesh, so every
/// boundary must close.
///
/// ```rust
/// # use hydromesh_grid::{to_selafin, Mesh};
/// # use hydromesh_selafin::Precision;
/// let mesh = Mesh::from_xyz(
///     &[0.0, 1.0, 1.0, 0.0],
///     &[0.0, 0.0, 1.0, 1.0],
///     &[-1.0, -2.0, -3.0, -4.0],
///     vec![[0, 1, 2], [0, 2, 3]],
/// )
/// .unwrap();
///
/// let selafin = to_selafin(&mesh, Precision::Single).unwrap();
/// assert_eq!(selafin.mesh.ipobo, vec![1, 2, 3, 4]);
/// assert_eq!(selafin.time_steps[0].values[0], vec![-1.0, -2.0, -3.0, -4.0]);
/// ```
pub fn to_selafin(mesh: &Mesh, precision: Precision) -> Result<Selafin> {
    to_selafin_with(mesh, &Boundary::of(mesh)?, precision)
}

/// Build a SELAFIN geometry file from a mesh and its traced boundary
///
/// Lets the same [Boundary] number the IPOBO markers and write the `.cli`
/// boundary condition file.
pub fn to_selafin_with(mesh: &Mesh, boundary: &Boundary, precision: Precision) -> Result<Selafin> {
    if boundary.nnodes() != mesh.nnodes() {
        return Err(Error::UnexpectedDimensions {
            what: "boundary nodes",
            expected: mesh.nnodes(),
            found: boundary.nnodes(),
        });
    }
    debug!(
        "{} boundary nodes in {} loops",
        boundary.nodes().len(),
        boundary.loops.len()
    );

    let header = Header::new(SELAFIN_TITLE, precision)
        .with_variable(BOTTOM.0, BOTTOM.1)
        .with_date(default_date());
    let topology = Topology::new(mesh.elements.clone(), boundary.ipobo(), mesh.x(), mesh.y())?;

    Ok(Selafin {
        header,
        mesh: topology,
        precision,
        time_steps: vec![TimeStep::new(0.0, vec![mesh.z()])],
    })
}

/// Rebuild a mesh from SELAFIN geometry, using `values` as node elevations
///
/// Any variable row of a time step can serve as the elevations.
pub fn from_selafin(topology: &Topology, values: &[f64]) -> Result<Mesh> {
    if values.len() != topology.npoin() {
        return Err(Error::UnexpectedDimensions {
            what: "node values",
            expected: topology.npoin(),
            found: values.len(),
        });
    }
    Mesh::from_xyz(&topology.x, &topology.y, values, topology.ikle.clone())
}

/// Values of a named variable in a time step
///
/// Names are matched ignoring case and trailing padding.
pub fn variable_values<'a>(header: &Header, step: &'a TimeStep, name: &str) -> Result<&'a [f64]> {
    header
        .find_variable(name)
        .and_then(|i| step.variable(i))
        .ok_or_else(|| Error::VariableNotFound(name.to_string()))
}

/// Date written by the usual pre-processors when none is known
pub fn default_date() -> Date {
    Date::new(1997, 8, 29, 2, 15, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        Mesh::from_xyz(
            &[0.0, 1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[5.0, 6.0, 7.0, 8.0],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn geometry_header() {
        let selafin = to_selafin(&square(), Precision::Double).unwrap();
        let header = &selafin.header;

        assert_eq!(header.title.text().trim_end(), SELAFIN_TITLE);
        assert_eq!(header.marker.text(), "SERAFIND");
        assert_eq!(header.iparam, [1, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(header.date, Some(Date::new(1997, 8, 29, 2, 15, 0)));
        assert_eq!(header.variables.len(), 1);
        assert_eq!(header.find_variable("bottom"), Some(0));
        assert_eq!(selafin.times(), vec![0.0]);
    }

    #[test]
    fn mesh_survives_conversion() {
        let mesh = square();
        let selafin = to_selafin(&mesh, Precision::Single).unwrap();
        let values = variable_values(&selafin.header, &selafin.time_steps[0], "BOTTOM").unwrap();
        assert_eq!(from_selafin(&selafin.mesh, values).unwrap(), mesh);
    }

    #[test]
    fn unknown_variable() {
        let selafin = to_selafin(&square(), Precision::Single).unwrap();
        assert!(matches!(
            variable_values(&selafin.header, &selafin.time_steps[0], "VELOCITY U"),
            Err(Error::VariableNotFound(name)) if name == "VELOCITY U"
        ));
    }

    #[test]
    fn shared_boundary() {
        let mesh = square();
        let boundary = Boundary::of(&mesh).unwrap();
        let selafin = to_selafin_with(&mesh, &boundary, Precision::Single).unwrap();
        assert_eq!(selafin.mesh.ipobo, boundary.ipobo());

        let triangle = Mesh::from_xyz(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[0.0; 3], vec![[0, 1, 2]])
            .unwrap();
        let other = Boundary::of(&triangle).unwrap();
        assert!(matches!(
            to_selafin_with(&mesh, &other, Precision::Single),
            Err(Error::UnexpectedDimensions { expected: 4, found: 3, .. })
        ));
    }

    #[test]
    fn values_must_match_nodes() {
        let selafin = to_selafin(&square(), Precision::Single).unwrap();
        assert!(matches!(
            from_selafin(&selafin.mesh, &[1.0, 2.0]),
            Err(Error::UnexpectedDimensions { expected: 4, found: 2, .. })
        ));
    }
}
