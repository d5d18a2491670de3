//! Interpolation and assignment of node values
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod assign;
mod error;
mod idw;
mod points;
mod progress;
mod swan;
mod tin;

// inline the important parts for a nice public API
#[doc(inline)]
pub use tin::{TinInterpolator, NO_DATA};

#[doc(inline)]
pub use idw::{IdwInterpolator, MAX_NEIGHBOURS};

#[doc(inline)]
pub use assign::{assign_attributes, Location, Polygon};

#[doc(inline)]
pub use points::{
    read_points, read_points_from, read_polygon_rows, read_polygon_rows_from, Point, PolygonRow,
};

#[doc(inline)]
pub use swan::{read_swan_xyz, read_swan_xyz_from, SwanTable, SWAN_VARIABLES};

#[doc(inline)]
pub use error::{Error, Result};
