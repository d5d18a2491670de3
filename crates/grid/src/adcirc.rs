//! ADCIRC grid (`.grd`, `fort.14`) text format
//!
//! ```text
//! <title>
//! <E> <N>
//! <id> <x> <y> <z>             x N
//! <id> 3 <n1> <n2> <n3>        x E
//! ```
//!
//! All node numbers are 1-based. Anything after the element block, such as
//! open boundary definitions in a `fort.14`, is ignored.

// standard library
use std::io::{BufRead, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::lines::{init_reader, init_writer, Lines};
use crate::mesh::{Mesh, Node};
use crate::parsers::{counts, element, node, parse_line, to_index};

// hydromesh modules
use hydromesh_utils::{f, ValueExt};

// external crates
use log::{debug, warn};

/// Title written on the first line of every ADCIRC file
pub const ADCIRC_TITLE: &str = "ADCIRC";

/// Read an ADCIRC grid file into a [Mesh]
///
/// ```rust, no_run
/// # use hydromesh_grid::read_adcirc;
/// let mesh = read_adcirc("./mesh.grd").unwrap();
/// println!("{mesh}");
/// ```
pub fn read_adcirc<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    read_adcirc_from(init_reader(path)?)
}

/// Read an ADCIRC grid from any buffered reader
pub fn read_adcirc_from<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut lines = Lines::new(reader);

    let title = lines.required("title line", 1, 0)?;
    debug!("reading ADCIRC grid \"{}\"", title.trim());

    let header = lines.required("count line", 1, 0)?;
    let (ne, nn) = parse_line(counts_with_trailing, &header, lines.number())?;

    // counts come from the file, so nothing is reserved up front
    let mut nodes = Vec::new();
    let mut renumbered = false;
    for i in 0..nn {
        let line = lines.required("nodes", nn, i)?;
        let (id, x, y, z) = parse_line(node, &line, lines.number())?;
        if id != i as i64 + 1 && !renumbered {
            warn!("Warning: node ids are not sequential, using file order from node {id}");
            renumbered = true;
        }
        nodes.push(Node::new(x, y, z));
    }

    let mut elements = Vec::new();
    for i in 0..ne {
        let line = lines.required("elements", ne, i)?;
        let (_, kind, ids) = parse_line(element, &line, lines.number())?;
        elements.push(triangle(kind, &ids, nn, lines.number())?);
    }

    debug!("read {nn} nodes and {ne} elements");
    Mesh::new(nodes, elements)
}

/// Write a [Mesh] as an ADCIRC grid file
///
/// Coordinates and elevations are written with 3 decimals.
pub fn write_adcirc<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    write_adcirc_to(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [Mesh] as an ADCIRC grid to any writer
pub fn write_adcirc_to<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "{ADCIRC_TITLE}")?;
    writeln!(writer, "{} {}", mesh.nelements(), mesh.nnodes())?;

    for (i, n) in mesh.nodes.iter().enumerate() {
        writeln!(
            writer,
            "{} {} {} {}",
            i + 1,
            n.x.fixed(3),
            n.y.fixed(3),
            n.z.fixed(3)
        )?;
    }

    for (i, [a, b, c]) in mesh.elements.iter().enumerate() {
        writeln!(writer, "{} 3 {} {} {}", i + 1, a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

/// `<E> <N>`, with any trailing comment some tools append
fn counts_with_trailing(i: &str) -> nom::IResult<&str, (usize, usize)> {
    let (_, values) = counts(i)?;
    Ok(("", values))
}

/// Triangle connectivity from an element record
fn triangle(kind: i64, ids: &[i64], nn: usize, line: usize) -> Result<[usize; 3]> {
    match (kind, ids) {
        (3, [a, b, c]) => Ok([
            to_index("node", *a, nn)?,
            to_index("node", *b, nn)?,
            to_index("node", *c, nn)?,
        ]),
        (3, _) => Err(Error::MalformedTextRecord {
            line,
            reason: f!("expected 3 node numbers, found {}", ids.len()),
        }),
        _ => Err(Error::UnsupportedElement {
            line,
            card: f!("{kind} nodes per element"),
        }),
    }
}
