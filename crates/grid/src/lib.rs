//! Triangular mesh formats and conversions
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod adcirc;
mod boundary;
mod convert;
mod dat;
mod error;
mod geometry;
mod lines;
mod mesh;
mod parsers;
mod ply;
mod twodm;
mod wkt;

pub mod vtk;

// inline the important parts for a nice public API
#[doc(inline)]
pub use mesh::{Mesh, Node};

#[doc(inline)]
pub use adcirc::{read_adcirc, read_adcirc_from, write_adcirc, write_adcirc_to, ADCIRC_TITLE};

#[doc(inline)]
pub use twodm::{read_2dm, read_2dm_from, write_2dm, write_2dm_to};

#[doc(inline)]
pub use dat::{read_dat, read_dat_from, DAT_TRIANGLE};

#[doc(inline)]
pub use ply::{read_ply, read_ply_from};

#[doc(inline)]
pub use boundary::Boundary;

#[doc(inline)]
pub use convert::{
    default_date, from_selafin, to_selafin, to_selafin_with, variable_values, BOTTOM, SELAFIN_TITLE,
};

#[doc(inline)]
pub use geometry::{
    read_gis_nodes, read_gis_nodes_from, read_hole_points, read_hole_points_from, read_shapes,
    read_shapes_from, Geometry, GisNode, HolePoint, ShapeVertex,
};

#[doc(inline)]
pub use wkt::{write_elements_to, write_nodes_to, write_wkt};

#[doc(inline)]
pub use vtk::{mesh_to_vtk, write_vtk};

#[doc(inline)]
pub use error::{Error, Result};
