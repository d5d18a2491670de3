//! Assignment of polygon attributes to mesh nodes
//!
//! Typical use is delineating friction zones in GIS, exporting the polygons
//! as `shapeid,x,y,attr` rows and writing the attributes to the node values
//! of a mesh.

// crate modules
use crate::error::{Error, Result};
use crate::points::PolygonRow;
use crate::progress::init_progress_bar;
use crate::tin::NO_DATA;

// hydromesh modules
use hydromesh_grid::Mesh;

// external crates
use itertools::Itertools;
use kdam::BarExt;
use log::{debug, trace};

/// Position of a point relative to a polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside,
    Edge,
    Outside,
}

/// Closed polygon carrying a single attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Shape id shared by all rows of the polygon
    pub id: i64,
    /// Value given to the nodes inside
    pub attribute: f64,
    /// Vertices rounded to 3 decimals, the ring closes implicitly
    pub vertices: Vec<[f64; 2]>,
}

impl Polygon {
    /// Group rows by shape id into polygons, in ascending id order
    ///
    /// Rows of a shape keep their file order even when other shapes are
    /// listed in between. The attribute of every polygon is taken from its
    /// first row. A closing vertex that repeats the first one is dropped.
    pub fn from_rows(rows: &[PolygonRow]) -> Result<Vec<Polygon>> {
        let shapes = rows.iter().into_group_map_by(|r| r.shapeid);

        let mut polygons = Vec::with_capacity(shapes.len());
        for (id, group) in shapes.into_iter().sorted_by_key(|(id, _)| *id) {
            let mut vertices: Vec<[f64; 2]> =
                group.iter().map(|r| [round(r.x), round(r.y)]).collect();

            if vertices.len() > 1 && vertices.first() == vertices.last() {
                vertices.pop();
            }
            if vertices.len() < 3 {
                return Err(Error::DegeneratePolygon {
                    shape: id,
                    vertices: vertices.len(),
                });
            }

            polygons.push(Polygon {
                id,
                attribute: group[0].attr,
                vertices,
            });
        }
        debug!("grouped {} rows into {} polygons", rows.len(), polygons.len());
        Ok(polygons)
    }

    /// Locate a point, testing the edges before the interior
    pub fn locate(&self, x: f64, y: f64) -> Location {
        let edges = self.vertices.iter().circular_tuple_windows::<(_, _)>();

        let mut inside = false;
        for (&[x1, y1], &[x2, y2]) in edges {
            if on_segment(x, y, [x1, y1], [x2, y2]) {
                return Location::Edge;
            }
            // even-odd ray cast towards +x
            if (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
                inside = !inside;
            }
        }

        match inside {
            true => Location::Inside,
            false => Location::Outside,
        }
    }
}

/// Assign polygon attributes to the node values of a mesh
///
/// Nodes inside a polygon take its attribute, nodes exactly on an edge are
/// flagged with `-999.0`, and nodes outside keep their value. Polygons are
/// applied in order so later ones override earlier ones, which for
/// [Polygon::from_rows] means higher shape ids win.
///
/// ```rust
/// # use hydromesh_grid::Mesh;
/// # use hydromesh_interp::{assign_attributes, Polygon};
/// let mesh = Mesh::from_xyz(&[1.0, 5.0, 1.0], &[1.0, 1.0, 5.0], &[0.0; 3], vec![[0, 1, 2]])
///     .unwrap();
/// let zone = Polygon {
///     id: 1,
///     attribute: 0.03,
///     vertices: vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]],
/// };
///
/// let friction = assign_attributes(&mesh, &[zone], true).unwrap();
/// assert_eq!(friction.z(), vec![0.03, 0.0, 0.0]);
/// ```
pub fn assign_attributes(mesh: &Mesh, polygons: &[Polygon], disable_progress: bool) -> Result<Mesh> {
    let mut bar = init_progress_bar(
        polygons.len() * mesh.nnodes(),
        "nodes",
        disable_progress,
    )?;

    let mut z = mesh.z();
    for polygon in polygons {
        trace!("assigning polygon {}", polygon.id);
        for (value, node) in z.iter_mut().zip(&mesh.nodes) {
            match polygon.locate(node.x, node.y) {
                Location::Inside => *value = polygon.attribute,
                Location::Edge => *value = NO_DATA,
                Location::Outside => (),
            }
        }
        bar.update(mesh.nnodes())?;
    }
    Ok(mesh.with_elevations(&z)?)
}

fn round(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Point exactly on the segment `a`-`b`
fn on_segment(x: f64, y: f64, a: [f64; 2], b: [f64; 2]) -> bool {
    let cross = (b[0] - a[0]) * (y - a[1]) - (b[1] - a[1]) * (x - a[0]);
    cross == 0.0
        && x >= a[0].min(b[0])
        && x <= a[0].max(b[0])
        && y >= a[1].min(b[1])
        && y <= a[1].max(b[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(shapeid: i64, x: f64, y: f64, attr: f64) -> PolygonRow {
        PolygonRow { shapeid, x, y, attr }
    }

    fn square(id: i64, lower: f64, upper: f64, attr: f64) -> Vec<PolygonRow> {
        vec![
            row(id, lower, lower, attr),
            row(id, upper, lower, attr),
            row(id, upper, upper, attr),
            row(id, lower, upper, attr),
            row(id, lower, lower, attr),
        ]
    }

    #[test]
    fn rows_to_polygons() {
        let mut rows = square(1, 0.0, 10.0, 0.03);
        rows.extend(square(2, 2.00049, 4.0, 0.05));

        let polygons = Polygon::from_rows(&rows).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertices.len(), 4);
        assert_eq!(polygons[1].vertices[0], [2.0, 2.0]);
        assert_eq!(polygons[1].attribute, 0.05);
    }

    #[test]
    fn interleaved_shapes() {
        let mut rows = square(5, 2.0, 4.0, 0.05);
        rows.extend(square(1, 0.0, 10.0, 0.03));
        let closing = rows.remove(4);
        rows.push(closing);

        let polygons = Polygon::from_rows(&rows).unwrap();
        assert_eq!(polygons.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(
            polygons[1].vertices,
            vec![[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0]]
        );
    }

    #[test]
    fn degenerate_polygon() {
        let rows = vec![row(7, 0.0, 0.0, 1.0), row(7, 1.0, 1.0, 1.0)];
        assert!(matches!(
            Polygon::from_rows(&rows),
            Err(Error::DegeneratePolygon { shape: 7, vertices: 2 })
        ));
    }

    #[test]
    fn locations() {
        let polygon = &Polygon::from_rows(&square(1, 0.0, 10.0, 1.0)).unwrap()[0];
        assert_eq!(polygon.locate(5.0, 5.0), Location::Inside);
        assert_eq!(polygon.locate(10.0, 5.0), Location::Edge);
        assert_eq!(polygon.locate(0.0, 0.0), Location::Edge);
        assert_eq!(polygon.locate(10.5, 5.0), Location::Outside);
        assert_eq!(polygon.locate(-1.0, 0.0), Location::Outside);
    }

    #[test]
    fn later_polygons_override() {
        let mesh = Mesh::from_xyz(
            &[1.0, 3.0, 8.0, 12.0, 4.0],
            &[1.0, 3.0, 8.0, 12.0, 2.0],
            &[0.5; 5],
            vec![[0, 1, 2], [2, 3, 4]],
        )
        .unwrap();

        let mut rows = square(1, 0.0, 10.0, 0.03);
        rows.extend(square(2, 2.0, 4.0, 0.05));
        let polygons = Polygon::from_rows(&rows).unwrap();

        let z = assign_attributes(&mesh, &polygons, true).unwrap().z();
        assert_eq!(z, vec![0.03, 0.05, 0.03, 0.5, NO_DATA]);
    }
}
