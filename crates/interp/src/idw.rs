//! Inverse distance weighting from scattered points

// crate modules
use crate::error::{Error, Result};
use crate::points::Point;
use crate::progress::init_progress_bar;

// hydromesh modules
use hydromesh_grid::Mesh;

// external crates
use kdam::BarExt;
use log::{debug, warn};
use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};

/// Largest number of neighbours used for a single value
pub const MAX_NEIGHBOURS: usize = 10;

/// Closer points are all treated as this far away
const MIN_DISTANCE: f64 = 1.0e-6;

type IndexedPoint = GeomWithData<[f64; 2], f64>;

/// Inverse distance weighted interpolation of scattered `x,y,z` points
///
/// Each value is the average of the `k` nearest points weighted by `1/d²`.
/// Distances below 1e-6 are clamped so that a coincident point dominates
/// without dividing by zero. The default of a single neighbour suits dense
/// point clouds.
///
/// ```rust
/// # use hydromesh_interp::{IdwInterpolator, Point};
/// let points = vec![Point::new(0.0, 0.0, 1.0), Point::new(2.0, 0.0, 3.0)];
/// let idw = IdwInterpolator::new(&points).unwrap().neighbours(2).unwrap();
/// assert!((idw.interpolate(1.0, 0.0) - 2.0).abs() < 1e-12);
/// ```
pub struct IdwInterpolator {
    tree: RTree<IndexedPoint>,
    neighbours: usize,
    disable_progress: bool,
}

impl IdwInterpolator {
    /// Index the source points
    pub fn new(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::NoData("points"));
        }

        let tree = RTree::bulk_load(
            points
                .iter()
                .map(|p| IndexedPoint::new([p.x, p.y], p.z))
                .collect(),
        );
        debug!("indexed {} points", points.len());

        Ok(Self {
            tree,
            neighbours: 1,
            disable_progress: false,
        })
    }

    /// Number of neighbours `k`, between 1 and 10
    pub fn neighbours(mut self, k: usize) -> Result<Self> {
        if !(1..=MAX_NEIGHBOURS).contains(&k) {
            return Err(Error::InvalidNeighbourCount(k));
        }
        if k > self.tree.size() {
            warn!("Warning: only {} points available for {k} neighbours", self.tree.size());
        }
        self.neighbours = k;
        Ok(self)
    }

    /// Hide the progress bar
    pub fn disable_progress(mut self, disable: bool) -> Self {
        self.disable_progress = disable;
        self
    }

    /// Weighted value at a point
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let query = [x, y];
        let (sum, den) = self
            .tree
            .nearest_neighbor_iter(&query)
            .take(self.neighbours)
            .map(|p| {
                let d = p.geom().distance_2(&query).sqrt().max(MIN_DISTANCE);
                (p.data, 1.0 / (d * d))
            })
            .fold((0.0, 0.0), |(sum, den), (z, w)| (sum + w * z, den + w));
        sum / den
    }

    /// Interpolate the elevation of every node of `mesh`
    pub fn apply(&self, mesh: &Mesh) -> Result<Mesh> {
        let mut bar = init_progress_bar(mesh.nnodes(), "nodes", self.disable_progress)?;

        let mut z = Vec::with_capacity(mesh.nnodes());
        for node in &mesh.nodes {
            z.push(self.interpolate(node.x, node.y));
            bar.update(1)?;
        }
        Ok(mesh.with_elevations(&z)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(10.0, 0.0, 2.0),
            Point::new(10.0, 10.0, 3.0),
            Point::new(0.0, 10.0, 4.0),
        ]
    }

    #[test]
    fn nearest_only() {
        let idw = IdwInterpolator::new(&corners()).unwrap();
        assert!((idw.interpolate(1.0, 2.0) - 1.0).abs() < 1e-12);
        assert!((idw.interpolate(9.0, 8.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_distances_average() {
        let idw = IdwInterpolator::new(&corners()).unwrap().neighbours(4).unwrap();
        assert!((idw.interpolate(5.0, 5.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn coincident_point_dominates() {
        let idw = IdwInterpolator::new(&corners()).unwrap().neighbours(4).unwrap();
        assert!((idw.interpolate(10.0, 0.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn neighbour_limits() {
        for k in [0, 11] {
            let result = IdwInterpolator::new(&corners()).unwrap().neighbours(k);
            assert!(matches!(result, Err(Error::InvalidNeighbourCount(n)) if n == k));
        }
        assert!(matches!(IdwInterpolator::new(&[]), Err(Error::NoData(_))));
    }

    #[test]
    fn mesh_nodes() {
        let mesh = Mesh::from_xyz(&[1.0, 9.0, 1.0], &[1.0, 1.0, 9.0], &[0.0; 3], vec![[0, 1, 2]])
            .unwrap();
        let idw = IdwInterpolator::new(&corners()).unwrap().disable_progress(true);
        let z = idw.apply(&mesh).unwrap().z();
        for (value, expected) in z.iter().zip([1.0, 2.0, 4.0]) {
            assert!((value - expected).abs() < 1e-12);
        }
    }
}
