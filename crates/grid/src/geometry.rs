//! Mesh generator geometry from GIS exports
//!
//! Nodes, the outer boundary, constraint lines and holes are digitised in a
//! GIS and exported as comma separated files without headers:
//!
//! | file     | columns             |
//! | -------- | ------------------- |
//! | nodes    | `x,y,z` or `x,y,z,size` |
//! | boundary | `shapeid,x,y`       |
//! | lines    | `shapeid,x,y`       |
//! | holes    | `shapeid,x,y` (gmsh) or `x,y` (Triangle) |
//!
//! Every shape vertex is snapped to the closest node, and the result is
//! written as a gmsh `.geo` or a Triangle `.poly` file. No meshing is done
//! here.

// standard library
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::lines::init_writer;

// hydromesh modules
use hydromesh_utils::{f, ValueExt};

// external crates
use csv::{Reader, ReaderBuilder, Trim};
use itertools::Itertools;
use log::{debug, warn};
use serde::Deserialize;

/// Snapped vertices further than this from their node are reported
const SNAP_TOLERANCE: f64 = 1.0e-3;

/// Geometry node, one `x,y,z[,size]` row
///
/// The optional size is the target element size around the node, only used
/// by gmsh.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GisNode {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub size: Option<f64>,
}

impl GisNode {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, size: None }
    }
}

/// Vertex of a boundary, line or hole shape, one `shapeid,x,y` row
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ShapeVertex {
    pub shapeid: i64,
    pub x: f64,
    pub y: f64,
}

/// Point inside a hole, one `x,y` row
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HolePoint {
    pub x: f64,
    pub y: f64,
}

/// Read geometry nodes from a csv file
pub fn read_gis_nodes<P: AsRef<Path>>(path: P) -> Result<Vec<GisNode>> {
    read_gis_nodes_from(File::open(path)?)
}

/// Read geometry nodes from any reader
pub fn read_gis_nodes_from<R: Read>(reader: R) -> Result<Vec<GisNode>> {
    Ok(csv_reader(reader)
        .deserialize::<GisNode>()
        .collect::<std::result::Result<Vec<GisNode>, csv::Error>>()?)
}

/// Read shape vertices from a csv file
pub fn read_shapes<P: AsRef<Path>>(path: P) -> Result<Vec<ShapeVertex>> {
    read_shapes_from(File::open(path)?)
}

/// Read shape vertices from any reader
pub fn read_shapes_from<R: Read>(reader: R) -> Result<Vec<ShapeVertex>> {
    Ok(csv_reader(reader)
        .deserialize::<ShapeVertex>()
        .collect::<std::result::Result<Vec<ShapeVertex>, csv::Error>>()?)
}

/// Read hole marker points from a csv file
pub fn read_hole_points<P: AsRef<Path>>(path: P) -> Result<Vec<HolePoint>> {
    read_hole_points_from(File::open(path)?)
}

/// Read hole marker points from any reader
pub fn read_hole_points_from<R: Read>(reader: R) -> Result<Vec<HolePoint>> {
    Ok(csv_reader(reader)
        .deserialize::<HolePoint>()
        .collect::<std::result::Result<Vec<HolePoint>, csv::Error>>()?)
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Planar geometry for a mesh generator
///
/// Shapes are stored as 0-based node indices. The boundary and holes are
/// closed, so their last index repeats the first.
///
/// ```rust
/// # use hydromesh_grid::{Geometry, GisNode, ShapeVertex};
/// let nodes = vec![
///     GisNode::new(0.0, 0.0, 1.0),
///     GisNode::new(10.0, 0.0, 1.0),
///     GisNode::new(10.0, 10.0, 1.0),
///     GisNode::new(5.0, 5.0, 2.0),
/// ];
/// let boundary = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]
///     .map(|(x, y)| ShapeVertex { shapeid: 0, x, y });
///
/// let geometry = Geometry::new(nodes, true)
///     .unwrap()
///     .with_boundary(&boundary)
///     .unwrap();
/// assert_eq!(geometry.boundary, vec![0, 1, 2, 0]);
/// assert_eq!(geometry.embedded(), vec![3]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    /// Nodes, without duplicates unless asked to keep them
    pub nodes: Vec<GisNode>,
    /// Closed outer boundary
    pub boundary: Vec<usize>,
    /// Open or closed constraint lines
    pub lines: Vec<Vec<usize>>,
    /// Closed hole outlines
    pub holes: Vec<Vec<usize>>,
    /// Points inside holes, used by Triangle instead of outlines
    pub hole_points: Vec<[f64; 2]>,
}

impl Geometry {
    /// Collect the nodes, dropping repeated `x,y` locations if asked
    ///
    /// Locations are compared at 3 decimals, the precision of every output.
    /// The first node at a location is kept.
    pub fn new(nodes: Vec<GisNode>, remove_duplicates: bool) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::EmptyGeometry("nodes"));
        }

        let total = nodes.len();
        let nodes: Vec<GisNode> = match remove_duplicates {
            true => nodes
                .into_iter()
                .unique_by(|n| (millimetres(n.x), millimetres(n.y)))
                .collect(),
            false => nodes,
        };
        if nodes.len() < total {
            debug!("removed {} duplicate nodes", total - nodes.len());
        }

        Ok(Self {
            nodes,
            ..Default::default()
        })
    }

    /// Snap the outer boundary to the nodes
    ///
    /// All rows form a single boundary. It is closed on its first node if
    /// the last vertex does not already return to it.
    pub fn with_boundary(mut self, rows: &[ShapeVertex]) -> Result<Self> {
        let mut boundary = self.snap(rows.iter());
        close(&mut boundary);
        if boundary.len() < 4 {
            return Err(Error::DegenerateShape {
                what: "boundary",
                shape: rows.first().map(|r| r.shapeid).unwrap_or_default(),
                vertices: boundary.len(),
            });
        }
        self.boundary = boundary;
        Ok(self)
    }

    /// Snap constraint lines to the nodes, one line per shape id
    pub fn with_lines(mut self, rows: &[ShapeVertex]) -> Result<Self> {
        for (id, vertices) in shapes(rows) {
            let line = self.snap(vertices.into_iter());
            if line.len() < 2 {
                return Err(Error::DegenerateShape {
                    what: "line",
                    shape: id,
                    vertices: line.len(),
                });
            }
            self.lines.push(line);
        }
        Ok(self)
    }

    /// Snap hole outlines to the nodes, one closed hole per shape id
    pub fn with_holes(mut self, rows: &[ShapeVertex]) -> Result<Self> {
        for (id, vertices) in shapes(rows) {
            let mut hole = self.snap(vertices.into_iter());
            close(&mut hole);
            if hole.len() < 4 {
                return Err(Error::DegenerateShape {
                    what: "hole",
                    shape: id,
                    vertices: hole.len(),
                });
            }
            self.holes.push(hole);
        }
        Ok(self)
    }

    /// Mark holes with a point inside each one
    pub fn with_hole_points(mut self, points: &[HolePoint]) -> Self {
        self.hole_points = points.iter().map(|p| [p.x, p.y]).collect();
        self
    }

    /// Nodes used by no shape, to be embedded in the surface
    pub fn embedded(&self) -> Vec<usize> {
        let mut used = vec![false; self.nodes.len()];
        for &n in self.shapes().flatten() {
            used[n] = true;
        }
        (0..self.nodes.len()).filter(|&n| !used[n]).collect()
    }

    /// Write a gmsh geometry file
    pub fn write_geo<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = init_writer(path)?;
        self.write_geo_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a gmsh geometry to any writer
    ///
    /// Lines are numbered boundary first, then constraint lines, then holes.
    /// The boundary and every hole become curve loops of plane surface 1,
    /// constraint lines and unused nodes are embedded in it.
    pub fn write_geo_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.check_boundary()?;

        for (i, n) in self.nodes.iter().enumerate() {
            writeln!(
                writer,
                "Point({}) = {{{}, {}, {}, {}}};",
                i + 1,
                n.x.fixed(3),
                n.y.fixed(3),
                n.z.fixed(3),
                n.size.unwrap_or_default().fixed(3)
            )?;
        }

        let mut next = 1;
        let mut ranges = Vec::new();
        for shape in self.shapes() {
            let first = next;
            for (a, b) in shape.iter().tuple_windows() {
                writeln!(writer, "Line({next}) = {{{}, {}}};", a + 1, b + 1)?;
                next += 1;
            }
            ranges.push((first, next - 1));
        }

        let (boundary, rest) = ranges.split_at(1);
        let (lines, holes) = rest.split_at(self.lines.len());
        let range = |(a, b): &(usize, usize)| f!("{a}:{b}");

        let walls = boundary.iter().chain(holes).map(range).join(", ");
        let loops = (1..=1 + holes.len()).join(", ");

        writeln!(writer, "Line Loop(1) = {{{}}};", range(&boundary[0]))?;
        for (i, hole) in holes.iter().enumerate() {
            writeln!(writer, "Line Loop({}) = {{{}}};", i + 2, range(hole))?;
        }
        writeln!(writer, "Physical Line(1) = {{{walls}}};")?;
        writeln!(writer, "Plane Surface(1) = {{{loops}}};")?;
        writeln!(writer, "Physical Surface(1) = {{1}};")?;

        for line in lines.iter().flat_map(|&(a, b)| a..=b) {
            writeln!(writer, "Line {{{line}}} In Surface {{1}};")?;
        }
        for node in self.embedded() {
            writeln!(writer, "Point {{{}}} In Surface {{1}};", node + 1)?;
        }
        Ok(())
    }

    /// Write a Triangle planar straight line graph
    pub fn write_poly<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = init_writer(path)?;
        self.write_poly_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a Triangle planar straight line graph to any writer
    ///
    /// Node elevations are carried as the single node attribute. Segments
    /// follow the boundary, constraint lines and any hole outlines, and the
    /// hole points close the file.
    pub fn write_poly_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.check_boundary()?;

        writeln!(writer, "{} 2 1 0", self.nodes.len())?;
        for (i, n) in self.nodes.iter().enumerate() {
            writeln!(writer, "{} {} {} {}", i + 1, n.x.fixed(3), n.y.fixed(3), n.z.fixed(3))?;
        }

        let segments: Vec<(usize, usize)> = self
            .shapes()
            .flat_map(|shape| shape.iter().copied().tuple_windows())
            .collect();
        writeln!(writer, "{} 0", segments.len())?;
        for (i, (a, b)) in segments.iter().enumerate() {
            writeln!(writer, "{} {} {}", i + 1, a + 1, b + 1)?;
        }

        writeln!(writer, "{}", self.hole_points.len())?;
        for (i, [x, y]) in self.hole_points.iter().enumerate() {
            writeln!(writer, "{} {} {}", i + 1, x.fixed(3), y.fixed(3))?;
        }
        Ok(())
    }

    /// Boundary, lines and holes in writing order
    fn shapes(&self) -> impl Iterator<Item = &Vec<usize>> {
        std::iter::once(&self.boundary)
            .chain(&self.lines)
            .chain(&self.holes)
    }

    fn check_boundary(&self) -> Result<()> {
        match self.boundary.is_empty() {
            true => Err(Error::EmptyGeometry("boundary")),
            false => Ok(()),
        }
    }

    /// Closest node of every vertex, the first one on ties
    fn snap<'a, I>(&self, vertices: I) -> Vec<usize>
    where
        I: Iterator<Item = &'a ShapeVertex>,
    {
        let mut far = 0;
        let snapped = vertices
            .filter_map(|v| {
                let (node, distance) = self
                    .nodes
                    .iter()
                    .map(|n| (n.x - v.x).hypot(n.y - v.y))
                    .enumerate()
                    .min_by(|a, b| a.1.total_cmp(&b.1))?;
                if distance > SNAP_TOLERANCE {
                    far += 1;
                }
                Some(node)
            })
            .collect();

        if far > 0 {
            warn!("Warning: {far} shape vertices are more than {SNAP_TOLERANCE} from any node");
        }
        snapped
    }
}

/// Rows grouped by shape id, in ascending id order
fn shapes(rows: &[ShapeVertex]) -> Vec<(i64, Vec<&ShapeVertex>)> {
    rows.iter()
        .into_group_map_by(|r| r.shapeid)
        .into_iter()
        .sorted_by_key(|(id, _)| *id)
        .collect()
}

fn close(shape: &mut Vec<usize>) {
    if let (Some(&first), Some(&last)) = (shape.first(), shape.last()) {
        if first != last {
            shape.push(first);
        }
    }
}

fn millimetres(value: f64) -> i64 {
    (value * 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(shapeid: i64, x: f64, y: f64) -> ShapeVertex {
        ShapeVertex { shapeid, x, y }
    }

    /// 4 x 4 square with an inner 1 x 1 square and one free node
    fn geometry() -> Geometry {
        let nodes = [
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (3.0, 3.0),
        ]
        .map(|(x, y)| GisNode::new(x, y, 1.0));

        let boundary = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]
            .map(|(x, y)| vertex(0, x, y));
        let holes = [(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)].map(|(x, y)| vertex(1, x, y));

        Geometry::new(nodes.to_vec(), true)
            .unwrap()
            .with_boundary(&boundary)
            .unwrap()
            .with_holes(&holes)
            .unwrap()
    }

    #[test]
    fn duplicates() {
        let nodes = vec![
            GisNode::new(0.0, 0.0, 1.0),
            GisNode::new(0.0001, 0.0, 2.0),
            GisNode::new(1.0, 0.0, 3.0),
        ];
        assert_eq!(Geometry::new(nodes.clone(), true).unwrap().nodes.len(), 2);
        assert_eq!(Geometry::new(nodes.clone(), true).unwrap().nodes[0].z, 1.0);
        assert_eq!(Geometry::new(nodes, false).unwrap().nodes.len(), 3);
        assert!(matches!(Geometry::new(vec![], true), Err(Error::EmptyGeometry(_))));
    }

    #[test]
    fn snapping() {
        let geometry = geometry();
        assert_eq!(geometry.boundary, vec![0, 1, 2, 3, 0]);
        assert_eq!(geometry.holes, vec![vec![4, 5, 6, 7, 4]]);
        assert_eq!(geometry.embedded(), vec![8]);

        let lines = [vertex(7, 0.01, 3.9), vertex(7, 2.9, 3.1), vertex(2, 4.0, 4.0), vertex(2, 3.0, 3.0)];
        let geometry = geometry.with_lines(&lines).unwrap();
        assert_eq!(geometry.lines, vec![vec![2, 8], vec![3, 8]]);
        assert!(geometry.embedded().is_empty());
    }

    #[test]
    fn degenerate_shapes() {
        let result = geometry().with_lines(&[vertex(3, 0.0, 0.0)]);
        assert!(matches!(
            result,
            Err(Error::DegenerateShape { what: "line", shape: 3, vertices: 1 })
        ));

        let nodes = vec![GisNode::new(0.0, 0.0, 0.0), GisNode::new(1.0, 0.0, 0.0)];
        let boundary = [vertex(0, 0.0, 0.0), vertex(0, 1.0, 0.0)];
        let result = Geometry::new(nodes, true).unwrap().with_boundary(&boundary);
        assert!(matches!(result, Err(Error::DegenerateShape { what: "boundary", .. })));
    }

    #[test]
    fn gmsh_geometry() {
        let mut buffer = Vec::new();
        geometry().write_geo_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Point(1) = {0.000, 0.000, 1.000, 0.000};");
        assert_eq!(lines[9], "Line(1) = {1, 2};");
        assert_eq!(lines[16], "Line(8) = {8, 5};");
        assert_eq!(
            lines[17..],
            [
                "Line Loop(1) = {1:4};",
                "Line Loop(2) = {5:8};",
                "Physical Line(1) = {1:4, 5:8};",
                "Plane Surface(1) = {1, 2};",
                "Physical Surface(1) = {1};",
                "Point {9} In Surface {1};",
            ]
        );
    }

    #[test]
    fn gmsh_embedded_lines() {
        let lines = [vertex(1, 0.0, 0.0), vertex(1, 3.0, 3.0), vertex(1, 4.0, 4.0)];
        let mut buffer = Vec::new();
        geometry()
            .with_lines(&lines)
            .unwrap()
            .write_geo_to(&mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Line(5) = {1, 9};\nLine(6) = {9, 3};\nLine(7) = {5, 6};"));
        assert!(text.contains("Line Loop(2) = {7:10};"));
        assert!(text.contains("Line {5} In Surface {1};\nLine {6} In Surface {1};"));
        assert!(!text.contains("Point {9} In Surface"));
    }

    #[test]
    fn triangle_poly() {
        let mut buffer = Vec::new();
        geometry()
            .with_hole_points(&[HolePoint { x: 1.5, y: 1.5 }])
            .write_poly_to(&mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "9 2 1 0");
        assert_eq!(lines[3], "3 4.000 4.000 1.000");
        assert_eq!(lines[10], "8 0");
        assert_eq!(lines[11], "1 1 2");
        assert_eq!(lines[18], "8 8 5");
        assert_eq!(lines[19..], ["1", "1 1.500 1.500"]);
    }

    #[test]
    fn boundary_is_required() {
        let geometry = Geometry::new(vec![GisNode::new(0.0, 0.0, 0.0)], true).unwrap();
        assert!(matches!(
            geometry.write_poly_to(&mut Vec::new()),
            Err(Error::EmptyGeometry("boundary"))
        ));
    }

    #[test]
    fn csv_rows() {
        let nodes = read_gis_nodes_from("0.0, 1.0, 2.0\n3.0, 4.0, 5.0, 0.5\n".as_bytes()).unwrap();
        assert_eq!(nodes[0].size, None);
        assert_eq!(nodes[1].size, Some(0.5));

        let shapes = read_shapes_from("0,1.0,2.0\n0,3.0,4.0\n".as_bytes()).unwrap();
        assert_eq!(shapes[1], vertex(0, 3.0, 4.0));

        let holes = read_hole_points_from("1.5,2.5\n".as_bytes()).unwrap();
        assert_eq!(holes, vec![HolePoint { x: 1.5, y: 2.5 }]);
    }
}
