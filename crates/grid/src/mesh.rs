// crate modules
use crate::error::{Error, Result};

// hydromesh modules
use hydromesh_utils::f;

/// Mesh node coordinates and elevation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Triangular mesh held in memory
///
/// Element connectivity is 0-based. Every text and binary format stores it
/// 1-based, and the readers and writers of this crate handle that conversion.
///
/// Meshes are not modified in place. Operations such as
/// [with_elevations()](Mesh::with_elevations) and [oriented()](Mesh::oriented)
/// return a new mesh.
///
/// ```rust
/// # use hydromesh_grid::{Mesh, Node};
/// let mesh = Mesh::new(
///     vec![
///         Node::new(0.0, 0.0, 0.0),
///         Node::new(1.0, 0.0, 0.0),
///         Node::new(1.0, 1.0, 0.0),
///         Node::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2], [0, 2, 3]],
/// )
/// .unwrap();
///
/// assert_eq!(mesh.nnodes(), 4);
/// assert_eq!(mesh.nelements(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Node coordinates and elevations
    pub nodes: Vec<Node>,
    /// Element connectivity, 0-based node indices
    pub elements: Vec<[usize; 3]>,
}

impl Mesh {
    /// Checked constructor, every element must reference an existing node
    pub fn new(nodes: Vec<Node>, elements: Vec<[usize; 3]>) -> Result<Self> {
        let mesh = Self { nodes, elements };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Build from separate coordinate arrays
    pub fn from_xyz(x: &[f64], y: &[f64], z: &[f64], elements: Vec<[usize; 3]>) -> Result<Self> {
        for (what, found) in [("y coordinates", y.len()), ("z values", z.len())] {
            if found != x.len() {
                return Err(Error::UnexpectedDimensions {
                    what,
                    expected: x.len(),
                    found,
                });
            }
        }

        let nodes = x
            .iter()
            .zip(y)
            .zip(z)
            .map(|((x, y), z)| Node::new(*x, *y, *z))
            .collect();
        Self::new(nodes, elements)
    }

    /// Number of nodes
    pub fn nnodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements
    pub fn nelements(&self) -> usize {
        self.elements.len()
    }

    pub fn x(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.x).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.y).collect()
    }

    pub fn z(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.z).collect()
    }

    /// Check that every node index is within the mesh
    pub fn validate(&self) -> Result<()> {
        let count = self.nnodes();
        for element in &self.elements {
            if let Some(&node) = element.iter().find(|&&n| n >= count) {
                return Err(Error::IndexOutOfRange {
                    what: "node",
                    index: node as i64 + 1,
                    count,
                });
            }
        }
        Ok(())
    }

    /// Copy of the mesh with new node elevations
    pub fn with_elevations(&self, z: &[f64]) -> Result<Self> {
        if z.len() != self.nnodes() {
            return Err(Error::UnexpectedDimensions {
                what: "node elevations",
                expected: self.nnodes(),
                found: z.len(),
            });
        }

        let nodes = self
            .nodes
            .iter()
            .zip(z)
            .map(|(n, z)| Node::new(n.x, n.y, *z))
            .collect();

        Ok(Self {
            nodes,
            elements: self.elements.clone(),
        })
    }

    /// The three nodes of an element
    pub fn triangle(&self, element: usize) -> Option<[Node; 3]> {
        let [a, b, c] = *self.elements.get(element)?;
        Some([*self.nodes.get(a)?, *self.nodes.get(b)?, *self.nodes.get(c)?])
    }

    /// Twice the signed plan area of an element, positive if counter-clockwise
    pub fn signed_area(&self, element: usize) -> Option<f64> {
        let [a, b, c] = self.triangle(element)?;
        Some((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }

    /// Copy of the mesh with every element ordered counter-clockwise
    pub fn oriented(&self) -> Self {
        let elements = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, &[a, b, c])| match self.signed_area(i) {
                Some(area) if area < 0.0 => [a, c, b],
                _ => [a, b, c],
            })
            .collect();

        Self {
            nodes: self.nodes.clone(),
            elements,
        }
    }
}

impl std::fmt::Display for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Mesh {\n".to_string();
        s += &f!("    nodes: {}\n", self.nnodes());
        s += &f!("    elements: {}\n", self.nelements());

        let z = self.z();
        if let (Some(min), Some(max)) = (
            z.iter().copied().reduce(f64::min),
            z.iter().copied().reduce(f64::max),
        ) {
            s += &f!("    elevation: {min} to {max}\n");
        }
        s += "}";
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        Mesh::from_xyz(
            &[0.0, 1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[5.0, 6.0, 7.0, 8.0],
            vec![[0, 2, 1], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn orientation() {
        let mesh = square();
        assert!(mesh.signed_area(0).unwrap() < 0.0);
        assert!(mesh.signed_area(1).unwrap() > 0.0);

        let oriented = mesh.oriented();
        assert_eq!(oriented.elements, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(oriented.signed_area(0), Some(1.0));
    }

    #[test]
    fn elevations_are_replaced() {
        let mesh = square().with_elevations(&[0.0; 4]).unwrap();
        assert_eq!(mesh.z(), vec![0.0; 4]);
        assert_eq!(mesh.x(), vec![0.0, 1.0, 1.0, 0.0]);
        assert!(square().with_elevations(&[0.0; 3]).is_err());
    }

    #[test]
    fn out_of_range_connectivity() {
        let result = Mesh::new(vec![Node::default(); 3], vec![[0, 1, 3]]);
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 4, count: 3, .. })
        ));
    }
}
