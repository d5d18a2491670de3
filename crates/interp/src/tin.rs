//! Linear interpolation over a triangulated surface

// crate modules
use crate::error::{Error, Result};
use crate::progress::init_progress_bar;

// hydromesh modules
use hydromesh_grid::Mesh;

// external crates
use kdam::BarExt;
use log::{debug, warn};
use rstar::primitives::GeomWithData;
use rstar::{RTree, RTreeObject, AABB};

/// Value given to nodes outside of the surface when they are not filled
pub const NO_DATA: f64 = -999.0;

/// TIN node indexed by position
type IndexedNode = GeomWithData<[f64; 2], f64>;

/// Bounding box of a TIN triangle
#[derive(Debug, Clone, Copy, PartialEq)]
struct TriangleEnvelope {
    element: usize,
    lower: [f64; 2],
    upper: [f64; 2],
}

impl RTreeObject for TriangleEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.lower, self.upper)
    }
}

/// Linear interpolation of elevations from an existing TIN
///
/// The TIN is any triangular mesh whose node elevations describe a surface,
/// typically an ADCIRC `.tin` file. Triangles are located through an R-tree
/// of their bounding boxes and values are interpolated with barycentric
/// weights.
///
/// Points outside of every triangle have no value. When interpolating a
/// whole mesh these become [NO_DATA], or the elevation of the closest TIN
/// node with [fill_nearest()](TinInterpolator::fill_nearest).
///
/// ```rust
/// # use hydromesh_grid::Mesh;
/// # use hydromesh_interp::TinInterpolator;
/// let tin = Mesh::from_xyz(
///     &[0.0, 10.0, 0.0],
///     &[0.0, 0.0, 10.0],
///     &[0.0, 10.0, 20.0],
///     vec![[0, 1, 2]],
/// )
/// .unwrap();
///
/// let interpolator = TinInterpolator::new(tin).unwrap();
/// assert!((interpolator.interpolate(5.0, 2.5) - 10.0).abs() < 1e-9);
/// assert!(interpolator.interpolate(20.0, 20.0).is_nan());
/// ```
pub struct TinInterpolator {
    tin: Mesh,
    triangles: RTree<TriangleEnvelope>,
    nodes: RTree<IndexedNode>,
    fill_nearest: bool,
    disable_progress: bool,
}

impl TinInterpolator {
    /// Index the triangles of a surface mesh
    pub fn new(tin: Mesh) -> Result<Self> {
        tin.validate()?;
        if tin.nelements() == 0 {
            return Err(Error::NoData("TIN triangles"));
        }

        let triangles = (0..tin.nelements())
            .filter_map(|element| {
                let [a, b, c] = tin.triangle(element)?;
                Some(TriangleEnvelope {
                    element,
                    lower: [a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)],
                    upper: [a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)],
                })
            })
            .collect();

        let nodes = tin
            .nodes
            .iter()
            .map(|n| IndexedNode::new([n.x, n.y], n.z))
            .collect();

        debug!("indexed {} TIN triangles", tin.nelements());
        Ok(Self {
            triangles: RTree::bulk_load(triangles),
            nodes: RTree::bulk_load(nodes),
            tin,
            fill_nearest: false,
            disable_progress: false,
        })
    }

    /// Give nodes outside of the TIN the elevation of the closest TIN node
    pub fn fill_nearest(mut self, fill: bool) -> Self {
        self.fill_nearest = fill;
        self
    }

    /// Hide the progress bar
    pub fn disable_progress(mut self, disable: bool) -> Self {
        self.disable_progress = disable;
        self
    }

    /// Interpolated elevation at a point, NaN outside of the TIN
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        self.triangles
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .find_map(|envelope| self.barycentric(envelope.element, x, y))
            .unwrap_or(f64::NAN)
    }

    /// Elevation of the TIN node closest to a point
    pub fn nearest(&self, x: f64, y: f64) -> f64 {
        self.nodes
            .nearest_neighbor(&[x, y])
            .map(|node| node.data)
            .unwrap_or(NO_DATA)
    }

    /// Interpolate the elevation of every node of `mesh`
    ///
    /// Returns a new mesh with the same geometry and the interpolated
    /// elevations.
    pub fn apply(&self, mesh: &Mesh) -> Result<Mesh> {
        let mut bar = init_progress_bar(mesh.nnodes(), "nodes", self.disable_progress)?;
        let mut outside = 0;

        let mut z = Vec::with_capacity(mesh.nnodes());
        for node in &mesh.nodes {
            let mut value = self.interpolate(node.x, node.y);
            if value.is_nan() {
                outside += 1;
                value = match self.fill_nearest {
                    true => self.nearest(node.x, node.y),
                    false => NO_DATA,
                };
            }
            z.push(value);
            bar.update(1)?;
        }

        if outside > 0 {
            warn!(
                "Warning: {outside} nodes outside of the TIN set to {}",
                match self.fill_nearest {
                    true => "the closest TIN elevation".to_string(),
                    false => NO_DATA.to_string(),
                }
            );
        }
        Ok(mesh.with_elevations(&z)?)
    }

    /// Barycentric interpolation within one triangle, if the point is inside
    fn barycentric(&self, element: usize, x: f64, y: f64) -> Option<f64> {
        let [a, b, c] = self.tin.triangle(element)?;

        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if det.abs() < f64::EPSILON {
            return None;
        }

        let l1 = ((b.y - c.y) * (x - c.x) + (c.x - b.x) * (y - c.y)) / det;
        let l2 = ((c.y - a.y) * (x - c.x) + (a.x - c.x) * (y - c.y)) / det;
        let l3 = 1.0 - l1 - l2;

        let tolerance = -1e-12;
        (l1 >= tolerance && l2 >= tolerance && l3 >= tolerance)
            .then(|| l1 * a.z + l2 * b.z + l3 * c.z)
    }
}
