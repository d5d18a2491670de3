//! Comma separated point and polygon inputs without headers

// standard library
use std::fs::File;
use std::io::Read;
use std::path::Path;

// crate modules
use crate::error::Result;

// external crates
use csv::{Reader, ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;

/// Scattered survey point, one `x,y,z` row
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Polygon vertex with its attribute, one `shapeid,x,y,attr` row
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PolygonRow {
    pub shapeid: i64,
    pub x: f64,
    pub y: f64,
    pub attr: f64,
}

/// Read `x,y,z` points from a csv file
///
/// ```rust, no_run
/// # use hydromesh_interp::read_points;
/// let points = read_points("./survey.csv").unwrap();
/// println!("{} points", points.len());
/// ```
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    read_points_from(File::open(path)?)
}

/// Read `x,y,z` points from any reader
pub fn read_points_from<R: Read>(reader: R) -> Result<Vec<Point>> {
    let points = csv_reader(reader)
        .deserialize::<Point>()
        .collect::<std::result::Result<Vec<Point>, csv::Error>>()?;
    debug!("read {} points", points.len());
    Ok(points)
}

/// Read `shapeid,x,y,attr` polygon rows from a csv file
pub fn read_polygon_rows<P: AsRef<Path>>(path: P) -> Result<Vec<PolygonRow>> {
    read_polygon_rows_from(File::open(path)?)
}

/// Read `shapeid,x,y,attr` polygon rows from any reader
pub fn read_polygon_rows_from<R: Read>(reader: R) -> Result<Vec<PolygonRow>> {
    Ok(csv_reader(reader)
        .deserialize::<PolygonRow>()
        .collect::<std::result::Result<Vec<PolygonRow>, csv::Error>>()?)
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader)
}
