//! SMS 2DM mesh text format
//!
//! ```text
//! MESH2D
//! E3T <id> <n1> <n2> <n3> <material>
//! ND <id> <x> <y> <z>
//! ```
//!
//! Node and element cards may be interleaved in any order and are placed by
//! their id. Cards that do not describe nodes or elements, such as
//! `MESHNAME` or `NS` nodestrings, are skipped.

// standard library
use std::io::{BufRead, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::lines::{init_reader, init_writer, Lines};
use crate::mesh::{Mesh, Node};
use crate::parsers::{
    is_twodm_node, is_twodm_other_element, is_twodm_triangle, parse_line, to_index, twodm_node,
    twodm_triangle,
};

// hydromesh modules
use hydromesh_utils::{f, ValueExt};

// external crates
use log::{debug, trace};

/// Read an SMS 2DM file into a [Mesh]
///
/// Only linear triangles (`E3T`) are supported. Any other element card
/// fails the read with [UnsupportedElement](Error::UnsupportedElement).
pub fn read_2dm<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    read_2dm_from(init_reader(path)?)
}

/// Read an SMS 2DM mesh from any buffered reader
pub fn read_2dm_from<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut lines = Lines::new(reader);
    let mut nodes = Vec::new();
    let mut elements = Vec::new();

    while let Some(line) = lines.next_line()? {
        let card = line.trim_start();
        if is_twodm_node(card) {
            nodes.push((lines.number(), parse_line(twodm_node, card, lines.number())?));
        } else if is_twodm_triangle(card) {
            elements.push((lines.number(), parse_line(twodm_triangle, card, lines.number())?));
        } else if is_twodm_other_element(card) {
            return Err(Error::UnsupportedElement {
                line: lines.number(),
                card: card.split_whitespace().next().unwrap_or_default().to_string(),
            });
        } else {
            trace!("skipping line {}", lines.number());
        }
    }

    let nn = nodes.len();
    let ne = elements.len();
    debug!("found {nn} ND and {ne} E3T cards");

    let mut placed_nodes: Vec<Option<Node>> = vec![None; nn];
    for (line, (id, x, y, z)) in nodes {
        let slot = &mut placed_nodes[to_index("node", id, nn)?];
        if slot.is_some() {
            return Err(duplicate(line, "node", id));
        }
        *slot = Some(Node::new(x, y, z));
    }

    let mut placed_elements: Vec<Option<[usize; 3]>> = vec![None; ne];
    for (line, (id, [a, b, c])) in elements {
        let slot = &mut placed_elements[to_index("element", id, ne)?];
        if slot.is_some() {
            return Err(duplicate(line, "element", id));
        }
        *slot = Some([
            to_index("node", a, nn)?,
            to_index("node", b, nn)?,
            to_index("node", c, nn)?,
        ]);
    }

    // ids are unique and within range, so every slot is filled
    Mesh::new(
        placed_nodes.into_iter().flatten().collect(),
        placed_elements.into_iter().flatten().collect(),
    )
}

/// Write a [Mesh] as an SMS 2DM file
///
/// Every element is written first with material 1, followed by every node
/// with 3 decimals.
pub fn write_2dm<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    write_2dm_to(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [Mesh] as an SMS 2DM mesh to any writer
pub fn write_2dm_to<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "MESH2D")?;

    for (i, [a, b, c]) in mesh.elements.iter().enumerate() {
        writeln!(writer, "E3T {} {} {} {} 1", i + 1, a + 1, b + 1, c + 1)?;
    }

    for (i, n) in mesh.nodes.iter().enumerate() {
        writeln!(
            writer,
            "ND {} {} {} {}",
            i + 1,
            n.x.fixed(3),
            n.y.fixed(3),
            n.z.fixed(3)
        )?;
    }
    Ok(())
}

fn duplicate(line: usize, what: &str, id: i64) -> Error {
    Error::MalformedTextRecord {
        line,
        reason: f!("duplicate {what} id {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MESH: &str = "\
MESH2D
MESHNAME \"demo\"
ND 3 1.0 1.0 -3.0
E3T 2 1 3 4 1
ND 1 0.0 0.0 -1.0
ND 2 1.0 0.0 -2.0
E3T 1 1 2 3 1
ND 4 0.0 1.0 -4.0
NS 1 2 -3
";

    #[test]
    fn interleaved_cards() {
        let mesh = read_2dm_from(Cursor::new(MESH)).unwrap();
        assert_eq!(mesh.x(), vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(mesh.z(), vec![-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(mesh.elements, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn elements_then_nodes() {
        let mesh = read_2dm_from(Cursor::new(MESH)).unwrap();
        let mut buffer = Vec::new();
        write_2dm_to(&mesh, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "MESH2D");
        assert_eq!(lines[1], "E3T 1 1 2 3 1");
        assert_eq!(lines[3], "ND 1 0.000 0.000 -1.000");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn reject_quadrilaterals() {
        let text = MESH.replace("NS 1 2 -3", "E4Q 3 1 2 3 4 1");
        assert!(matches!(
            read_2dm_from(Cursor::new(text)),
            Err(Error::UnsupportedElement { line: 9, .. })
        ));
    }

    #[test]
    fn reject_bad_ids() {
        let text = MESH.replace("ND 4 ", "ND 5 ");
        assert!(matches!(
            read_2dm_from(Cursor::new(text)),
            Err(Error::IndexOutOfRange { index: 5, .. })
        ));

        let text = MESH.replace("ND 4 ", "ND 1 ");
        assert!(matches!(
            read_2dm_from(Cursor::new(text)),
            Err(Error::MalformedTextRecord { line: 8, .. })
        ));

        let text = MESH.replace("ND 2 1.0 0.0 -2.0", "ND 2 1.0 0.0");
        assert!(matches!(
            read_2dm_from(Cursor::new(text)),
            Err(Error::MalformedTextRecord { line: 6, .. })
        ));
    }
}
