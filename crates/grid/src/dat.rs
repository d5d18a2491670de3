//! DAT mesh text format with mixed 1D and 2D elements
//!
//! ```text
//! <N> <E>
//! <id> <x> <y> <z>                x N
//! <id> <type> <n1> <n2> [<n3>]    x E
//! ```
//!
//! Element type `203` is a 2D triangle and `103` a 1D segment. Only the
//! triangles are kept.

// standard library
use std::io::BufRead;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::lines::{init_reader, Lines};
use crate::mesh::{Mesh, Node};
use crate::parsers::{counts, element, node, parse_line, to_index};

// hydromesh modules
use hydromesh_utils::f;

// external crates
use log::{debug, info};

/// Element type code of a linear triangle
pub const DAT_TRIANGLE: i64 = 203;

/// Read a DAT mesh file into a [Mesh]
pub fn read_dat<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    read_dat_from(init_reader(path)?)
}

/// Read a DAT mesh from any buffered reader
pub fn read_dat_from<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut lines = Lines::new(reader);

    let header = lines.required("count line", 1, 0)?;
    let (nn, ne) = parse_line(counts, &header, lines.number())?;

    let mut nodes = Vec::new();
    for i in 0..nn {
        let line = lines.required("nodes", nn, i)?;
        let (_, x, y, z) = parse_line(node, &line, lines.number())?;
        nodes.push(Node::new(x, y, z));
    }

    let mut elements = Vec::new();
    for i in 0..ne {
        let line = lines.required("elements", ne, i)?;
        let (_, kind, ids) = parse_line(element, &line, lines.number())?;
        if kind != DAT_TRIANGLE {
            continue;
        }

        match ids.as_slice() {
            [a, b, c] => elements.push([
                to_index("node", *a, nn)?,
                to_index("node", *b, nn)?,
                to_index("node", *c, nn)?,
            ]),
            _ => {
                return Err(Error::MalformedTextRecord {
                    line: lines.number(),
                    reason: f!("type {DAT_TRIANGLE} element with {} nodes", ids.len()),
                })
            }
        }
    }

    if elements.len() < ne {
        info!("dropped {} non-triangular elements", ne - elements.len());
    }
    debug!("read {nn} nodes and {} triangles", elements.len());
    Mesh::new(nodes, elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DAT: &str = "\
4 4
1 0.0 0.0 1.0
2 1.0 0.0 2.0
3 1.0 1.0 3.0
4 0.0 1.0 4.0
1 103 1 2
2 203 1 2 3
3 103 3 4
4 203 1 3 4
";

    #[test]
    fn keeps_triangles_only() {
        let mesh = read_dat_from(Cursor::new(DAT)).unwrap();
        assert_eq!(mesh.nnodes(), 4);
        assert_eq!(mesh.elements, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn rejects_bad_triangles() {
        let text = DAT.replace("4 203 1 3 4", "4 203 1 3");
        assert!(matches!(
            read_dat_from(Cursor::new(text)),
            Err(Error::MalformedTextRecord { line: 9, .. })
        ));

        let text = DAT.replace("4 203 1 3 4", "4 203 1 3 x");
        assert!(read_dat_from(Cursor::new(text)).is_err());
    }

    #[test]
    fn huge_counts_are_missing_records() {
        let text = DAT.replacen("4 4", "1000000000000000000 1", 1);
        assert!(matches!(
            read_dat_from(Cursor::new(text)),
            Err(Error::MalformedTextRecord { .. } | Error::MissingRecords { .. })
        ));

        let text = "2 1000000000000000000\n1 0 0 0\n2 1 0 0\n1 203 1 2 2\n";
        assert!(matches!(
            read_dat_from(Cursor::new(text)),
            Err(Error::MissingRecords {
                what: "elements",
                found: 1,
                ..
            })
        ));
    }
}
