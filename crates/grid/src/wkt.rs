//! Well known text (WKT) export for GIS
//!
//! Two comma separated files are written next to the requested output: one
//! polygon per element in `<stem>_e.csv`, and one point per node in
//! `<stem>_n.csv`. Both load directly as delimited text layers.

// standard library
use std::io::Write;
use std::path::{Path, PathBuf};

// crate modules
use crate::error::Result;
use crate::lines::init_writer;
use crate::mesh::{Mesh, Node};

// hydromesh modules
use hydromesh_utils::{f, ValueExt};

// external crates
use csv::Writer;

/// Write element polygons and node points as WKT csv files
///
/// Returns the paths of the element and node files.
///
/// ```rust, no_run
/// # use hydromesh_grid::{read_adcirc, write_wkt};
/// let mesh = read_adcirc("./mesh.grd").unwrap();
/// let (elements, nodes) = write_wkt(&mesh, "./mesh.csv").unwrap();
/// assert!(elements.ends_with("mesh_e.csv"));
/// assert!(nodes.ends_with("mesh_n.csv"));
/// ```
pub fn write_wkt<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<(PathBuf, PathBuf)> {
    let element_path = suffixed(path.as_ref(), "_e");
    let node_path = suffixed(path.as_ref(), "_n");

    let mut writer = init_writer(&element_path)?;
    write_elements_to(mesh, &mut writer)?;
    writer.flush()?;

    let mut writer = init_writer(&node_path)?;
    write_nodes_to(mesh, &mut writer)?;
    writer.flush()?;

    Ok((element_path, node_path))
}

/// One `POLYGON Z` per element, closed on its first node
pub fn write_elements_to<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    mesh.validate()?;
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["WKT", "element"])?;
    for (i, &[a, b, c]) in mesh.elements.iter().enumerate() {
        let ring = [a, b, c, a]
            .iter()
            .map(|&n| coordinates(&mesh.nodes[n]))
            .collect::<Vec<String>>()
            .join(", ");
        csv.write_record([f!("POLYGON Z (({ring}))"), f!("{}", i + 1)])?;
    }
    csv.flush()?;
    Ok(())
}

/// One `POINT Z` per node
pub fn write_nodes_to<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["WKT", "node"])?;
    for (i, node) in mesh.nodes.iter().enumerate() {
        csv.write_record([f!("POINT Z ({})", coordinates(node)), f!("{}", i + 1)])?;
    }
    csv.flush()?;
    Ok(())
}

fn coordinates(node: &Node) -> String {
    f!("{} {} {}", node.x.fixed(3), node.y.fixed(3), node.z.fixed(3))
}

/// `dir/stem.csv` to `dir/stem<suffix>.csv`
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(f!("{stem}{suffix}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_and_points() {
        let mesh = Mesh::from_xyz(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 2.0, 3.5], vec![[0, 1, 2]])
            .unwrap();

        let mut buffer = Vec::new();
        write_elements_to(&mesh, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "WKT,element\n\"POLYGON Z ((0.000 0.000 1.000, 1.000 0.000 2.000, 0.000 1.000 3.500, 0.000 0.000 1.000))\",1\n"
        );

        let mut buffer = Vec::new();
        write_nodes_to(&mesh, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(3), Some("POINT Z (0.000 1.000 3.500),3"));
    }

    #[test]
    fn fields_read_back() {
        let mesh = Mesh::from_xyz(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[0.0; 3], vec![[0, 1, 2]])
            .unwrap();
        let mut buffer = Vec::new();
        write_elements_to(&mesh, &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][1], "1");
        assert!(records[0][0].ends_with("0.000 0.000 0.000))"));
    }

    #[test]
    fn output_names() {
        assert_eq!(
            suffixed(Path::new("out/grid.csv"), "_e"),
            PathBuf::from("out/grid_e.csv")
        );
        assert_eq!(suffixed(Path::new("grid"), "_n"), PathBuf::from("grid_n.csv"));
    }
}
