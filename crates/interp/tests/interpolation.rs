//! Integration tests for setting node values from other data

use hydromesh_grid::{read_adcirc, write_adcirc, Mesh};
use hydromesh_interp::{
    assign_attributes, read_points, read_polygon_rows, IdwInterpolator, Polygon, TinInterpolator,
    NO_DATA,
};
use rstest::{fixture, rstest};

/// Eight triangles over a 20 x 20 square
#[fixture]
fn basin() -> Mesh {
    read_adcirc("./data/basin.grd").unwrap()
}

/// Plane z = x + 2y that stops short of x = 20
#[fixture]
fn surface() -> Mesh {
    read_adcirc("./data/surface.tin").unwrap()
}

#[rstest]
#[case(false, [0.0, 10.0, NO_DATA, 20.0, 30.0])]
#[case(true, [0.0, 10.0, 5.0, 20.0, 30.0])]
fn tin_interpolation(basin: Mesh, surface: Mesh, #[case] fill: bool, #[case] expected: [f64; 5]) {
    let tin = TinInterpolator::new(surface)
        .unwrap()
        .fill_nearest(fill)
        .disable_progress(true);

    let z = tin.apply(&basin).unwrap().z();
    for (value, expected) in z.iter().zip(expected) {
        assert!((value - expected).abs() < 1e-9, "{value} != {expected}");
    }
    assert_eq!(z[8], if fill { 65.0 } else { NO_DATA });
}

#[rstest]
#[case(1, -5.0)]
#[case(5, -5.0)]
fn idw_at_survey_points(basin: Mesh, #[case] k: usize, #[case] centre: f64) {
    let points = read_points("./data/points.csv").unwrap();
    let idw = IdwInterpolator::new(&points)
        .unwrap()
        .neighbours(k)
        .unwrap()
        .disable_progress(true);

    let z = idw.apply(&basin).unwrap().z();
    assert!((z[4] - centre).abs() < 1e-6);
    assert!((z[0] - 1.0).abs() < 1e-6);
    assert!((z[8] - 3.0).abs() < 1e-6);
}

#[rstest]
fn friction_zones(basin: Mesh) {
    let polygons = Polygon::from_rows(&read_polygon_rows("./data/zones.csv").unwrap()).unwrap();
    assert_eq!(polygons.len(), 2);

    let friction = assign_attributes(&basin, &polygons, true).unwrap();
    let z = friction.z();
    assert_eq!(z[4], 0.06);
    assert_eq!(z.iter().filter(|&&v| v == 0.025).count(), 8);

    // written with 3 decimals like every other ADCIRC output
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("friction.grd");
    write_adcirc(&friction, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().nth(6), Some("5 10.000 10.000 0.060"));
}
