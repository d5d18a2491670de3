//! Integration tests for mesh formats and conversions

use std::fs;

use hydromesh_grid::vtk::{write_vtk, MeshToVtk, VtkFormat};
use hydromesh_grid::{
    from_selafin, read_2dm, read_adcirc, read_dat, to_selafin, variable_values, write_2dm,
    write_adcirc, write_wkt, Boundary, Mesh,
};
use hydromesh_selafin::{read_selafin, write_selafin, Precision};
use rstest::{fixture, rstest};

/// Eight triangles over a 20 x 20 square
#[fixture]
fn basin() -> Mesh {
    read_adcirc("./data/basin.grd").unwrap()
}

#[rstest]
fn adcirc_reference(basin: Mesh) {
    assert_eq!(basin.nnodes(), 9);
    assert_eq!(basin.nelements(), 8);
    assert_eq!(basin.elements[0], [0, 1, 4]);
    assert_eq!(basin.nodes[4].z, -4.5);
}

#[rstest]
#[case("./data/basin.2dm")]
fn twodm_matches_adcirc(basin: Mesh, #[case] path: &str) {
    assert_eq!(read_2dm(path).unwrap(), basin);
}

#[rstest]
fn dat_drops_segments(basin: Mesh) {
    assert_eq!(read_dat("./data/basin.dat").unwrap(), basin);
}

#[rstest]
#[case(Precision::Single)]
#[case(Precision::Double)]
fn selafin_round_trip(basin: Mesh, #[case] precision: Precision) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basin.slf");

    write_selafin(&to_selafin(&basin, precision).unwrap(), &path).unwrap();
    let selafin = read_selafin(&path).unwrap();
    assert_eq!(selafin.precision, precision);
    assert_eq!(selafin.mesh.ipobo, vec![1, 2, 3, 8, 0, 4, 7, 6, 5]);

    let values = variable_values(&selafin.header, &selafin.time_steps[0], "BOTTOM").unwrap();
    let mesh = from_selafin(&selafin.mesh, values).unwrap();
    assert_eq!(mesh.elements, basin.elements);
    for (a, b) in mesh.nodes.iter().zip(&basin.nodes) {
        assert!((a.x - b.x).abs() < 1e-4);
        assert!((a.y - b.y).abs() < 1e-4);
        assert!((a.z - b.z).abs() < 1e-4);
    }
}

#[rstest]
fn text_round_trips(basin: Mesh) {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("basin.grd");
    write_adcirc(&basin, &path).unwrap();
    assert_eq!(read_adcirc(&path).unwrap(), basin);

    let path = dir.path().join("basin.2dm");
    write_2dm(&basin, &path).unwrap();
    assert_eq!(read_2dm(&path).unwrap(), basin);
}

#[rstest]
fn boundary_conditions(basin: Mesh) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basin.cli");
    Boundary::of(&basin).unwrap().write_cli(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let last: Vec<&str> = text.lines().last().unwrap().split_whitespace().collect();
    assert_eq!(text.lines().count(), 8);
    assert_eq!(last[11..], ["4", "8"]);
}

#[rstest]
fn wkt_files(basin: Mesh) {
    let dir = tempfile::tempdir().unwrap();
    let (elements, nodes) = write_wkt(&basin, dir.path().join("basin.csv")).unwrap();

    let text = fs::read_to_string(elements).unwrap();
    assert_eq!(text.lines().count(), 9);
    assert!(text.lines().nth(1).unwrap().starts_with("\"POLYGON Z ((0.000 0.000 -1.000, "));

    let text = fs::read_to_string(nodes).unwrap();
    assert_eq!(text.lines().nth(5), Some("POINT Z (10.000 10.000 -4.500),5"));
}

#[rstest]
fn vtk_legacy_ascii(basin: Mesh) {
    let dir = tempfile::tempdir().unwrap();
    let converter = MeshToVtk::builder().scalar_name("BOTTOM").build();
    let vtk = converter.convert(&basin);

    // extension is replaced to suit the format
    write_vtk(vtk, dir.path().join("basin.txt"), VtkFormat::LegacyAscii).unwrap();
    let text = fs::read_to_string(dir.path().join("basin.vtk")).unwrap();
    assert!(text.contains("DATASET UNSTRUCTURED_GRID"));
    assert!(text.contains("BOTTOM"));
}

#[rstest]
fn vtk_xml(basin: Mesh) {
    let dir = tempfile::tempdir().unwrap();
    let vtk = MeshToVtk::new().convert(&basin);
    write_vtk(vtk, dir.path().join("basin"), VtkFormat::Xml).unwrap();
    assert!(dir.path().join("basin.vtu").exists());
}
