//! ASCII PLY polygon files of triangles
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex <N>
//! property float x
//! ...
//! element face <E>
//! property list uchar int vertex_indices
//! end_header
//! <x> <y> <z> [...]            x N
//! 3 <i1> <i2> <i3>             x E
//! ```
//!
//! Face indices are 0-based. Extra vertex properties after `z` are skipped.

// standard library
use std::io::BufRead;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::lines::{init_reader, Lines};
use crate::mesh::{Mesh, Node};
use crate::parsers::{parse_line, ply_element, ply_face, ply_vertex, to_index};

// hydromesh modules
use hydromesh_utils::f;

// external crates
use log::{debug, trace};

/// Read an ASCII PLY file of triangles into a [Mesh]
pub fn read_ply<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    read_ply_from(init_reader(path)?)
}

/// Read an ASCII PLY mesh from any buffered reader
pub fn read_ply_from<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut lines = Lines::new(reader);
    let (nn, ne) = read_header(&mut lines)?;

    let mut nodes = Vec::new();
    for i in 0..nn {
        let line = lines.required("vertices", nn, i)?;
        let (x, y, z) = parse_line(ply_vertex, &line, lines.number())?;
        nodes.push(Node::new(x, y, z));
    }

    let mut elements = Vec::new();
    for i in 0..ne {
        let line = lines.required("faces", ne, i)?;
        let (n, ids) = parse_line(ply_face, &line, lines.number())?;
        let line = lines.number();
        match (n, ids.as_slice()) {
            (3, [a, b, c]) => elements.push([
                to_index("vertex", a + 1, nn)?,
                to_index("vertex", b + 1, nn)?,
                to_index("vertex", c + 1, nn)?,
            ]),
            (3, _) => {
                return Err(Error::MalformedTextRecord {
                    line,
                    reason: f!("face of 3 vertices lists {} indices", ids.len()),
                })
            }
            _ => {
                return Err(Error::UnsupportedElement {
                    line,
                    card: f!("{n} vertex face"),
                })
            }
        }
    }

    debug!("read {nn} vertices and {ne} faces");
    Mesh::new(nodes, elements)
}

/// Vertex and face counts from the header, checked for ascii triangles
fn read_header<R: BufRead>(lines: &mut Lines<R>) -> Result<(usize, usize)> {
    let magic = lines.required("PLY header", 1, 0)?;
    if magic.trim() != "ply" {
        return Err(Error::MalformedTextRecord {
            line: 1,
            reason: "missing \"ply\" magic number".to_string(),
        });
    }

    let mut elements = Vec::new();
    loop {
        let line = lines.required("PLY header", 1, 0)?;
        let line = line.trim();
        if line == "end_header" {
            break;
        } else if line.starts_with("format") && !line.starts_with("format ascii") {
            return Err(Error::MalformedTextRecord {
                line: lines.number(),
                reason: f!("only ascii PLY files are supported, found \"{line}\""),
            });
        } else if line.starts_with("element") {
            let (name, n) = parse_line(ply_element, line, lines.number())?;
            elements.push((lines.number(), name.to_string(), n));
        } else {
            trace!("skipping header line {}", lines.number());
        }
    }

    match elements.as_slice() {
        [(_, vertex, nn), (_, face, ne)] if vertex == "vertex" && face == "face" => Ok((*nn, *ne)),
        _ => Err(Error::MalformedTextRecord {
            line: lines.number(),
            reason: "expected a vertex element followed by a face element".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PLY: &str = "\
ply
format ascii 1.0
comment exported from a point cloud editor
element vertex 4
property float x
property float y
property float z
element face 2
property list uchar int vertex_indices
end_header
0.0 0.0 -1.0
1.0 0.0 -2.0
1.0 1.0 -3.0
0.0 1.0 -4.0
3 0 1 2
3 0 2 3
";

    #[test]
    fn read_triangles() {
        let mesh = read_ply_from(Cursor::new(PLY)).unwrap();
        assert_eq!(mesh.nnodes(), 4);
        assert_eq!(mesh.elements, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.z(), vec![-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    fn reject_bad_files() {
        let text = PLY.replace("format ascii 1.0", "format binary_little_endian 1.0");
        assert!(matches!(
            read_ply_from(Cursor::new(text)),
            Err(Error::MalformedTextRecord { line: 2, .. })
        ));

        let text = PLY.replace("3 0 2 3", "4 0 1 2 3");
        assert!(matches!(
            read_ply_from(Cursor::new(text)),
            Err(Error::UnsupportedElement { line: 16, .. })
        ));

        let text = PLY.replace("3 0 2 3", "3 0 2 4");
        assert!(matches!(
            read_ply_from(Cursor::new(text)),
            Err(Error::IndexOutOfRange { index: 5, .. })
        ));

        let text = PLY.replace("element face 2\n", "");
        assert!(read_ply_from(Cursor::new(text)).is_err());

        let text = PLY.replace("3 0 2 3\n", "");
        assert!(matches!(
            read_ply_from(Cursor::new(text)),
            Err(Error::MissingRecords { what: "faces", .. })
        ));
    }
}
