// crate modules
use crate::error::{Error, Result};
use crate::record::{fixed_record, to_count, to_i32};

// external crates
use serde::{Deserialize, Serialize};

/// Nodes per triangular element
pub const NODES_PER_ELEMENT: usize = 3;

/// Mesh topology stored after the header
///
/// Connectivity is held 0-based. The file stores node numbers 1-based, and
/// the rebias happens exactly once in the reader and writer.
///
/// The elevation is not part of the topology, it is usually stored as a
/// `BOTTOM` variable in the time steps.
///
/// ```rust
/// # use hydromesh_selafin::Topology;
/// let mesh = Topology::new(
///     vec![[0, 1, 2], [0, 2, 3]],
///     vec![1, 2, 3, 4],
///     vec![0.0, 1.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0, 1.0],
/// )
/// .unwrap();
///
/// assert_eq!(mesh.nelem(), 2);
/// assert_eq!(mesh.npoin(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topology {
    /// Element connectivity (IKLE), 0-based node indices
    pub ikle: Vec<[usize; NODES_PER_ELEMENT]>,
    /// Boundary marker per node (IPOBO), 0 for interior nodes
    pub ipobo: Vec<i32>,
    /// Node x coordinates
    pub x: Vec<f64>,
    /// Node y coordinates
    pub y: Vec<f64>,
    /// Fourth integer of the dimension record, conventionally 1
    pub tag: i32,
}

impl Topology {
    /// Checked constructor
    ///
    /// Every array must agree on the number of nodes and every element must
    /// reference an existing node.
    pub fn new(
        ikle: Vec<[usize; NODES_PER_ELEMENT]>,
        ipobo: Vec<i32>,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Result<Self> {
        let topology = Self {
            ikle,
            ipobo,
            x,
            y,
            tag: 1,
        };
        topology.validate()?;
        Ok(topology)
    }

    /// Number of elements (NELEM)
    pub fn nelem(&self) -> usize {
        self.ikle.len()
    }

    /// Number of nodes (NPOIN)
    pub fn npoin(&self) -> usize {
        self.x.len()
    }

    /// Consistency of array lengths and node references
    pub fn validate(&self) -> Result<()> {
        let npoin = self.npoin();
        for (what, found) in [("y coordinates", self.y.len()), ("IPOBO markers", self.ipobo.len())] {
            if found != npoin {
                return Err(Error::UnexpectedDimensions {
                    what,
                    expected: npoin,
                    found,
                });
            }
        }

        for (element, nodes) in self.ikle.iter().enumerate() {
            if let Some(&node) = nodes.iter().find(|&&n| n >= npoin) {
                return Err(Error::NodeIndexOutOfRange {
                    element,
                    node: node as i64,
                    npoin,
                });
            }
        }
        Ok(())
    }

    /// Connectivity as stored on disk, 1-based
    pub(crate) fn ikle_to_disk(&self) -> Result<Vec<i32>> {
        self.ikle
            .iter()
            .flatten()
            .map(|&n| to_i32("node number", n + 1))
            .collect()
    }

    /// Connectivity from disk, 1-based to 0-based
    pub(crate) fn ikle_from_disk(
        raw: &[i32],
        npoin: usize,
    ) -> Result<Vec<[usize; NODES_PER_ELEMENT]>> {
        raw.chunks_exact(NODES_PER_ELEMENT)
            .enumerate()
            .map(|(element, chunk)| {
                let mut nodes = [0usize; NODES_PER_ELEMENT];
                for (slot, &stored) in nodes.iter_mut().zip(chunk) {
                    if stored < 1 || stored as usize > npoin {
                        return Err(Error::NodeIndexOutOfRange {
                            element,
                            node: stored as i64,
                            npoin,
                        });
                    }
                    *slot = stored as usize - 1;
                }
                Ok(nodes)
            })
            .collect()
    }
}

/// Dimension record: NELEM, NPOIN, NDP, and the trailing tag
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct Dimensions {
    pub nelem: i32,
    pub npoin: i32,
    pub ndp: i32,
    pub tag: i32,
}

fixed_record!(Dimensions, 4);

impl Dimensions {
    pub fn of(topology: &Topology) -> Result<Self> {
        Ok(Self {
            nelem: to_i32("element count", topology.nelem())?,
            npoin: to_i32("node count", topology.npoin())?,
            ndp: NODES_PER_ELEMENT as i32,
            tag: topology.tag,
        })
    }

    /// NELEM and NPOIN as counts, checking the element type
    pub fn counts(&self) -> Result<(usize, usize)> {
        if self.ndp != NODES_PER_ELEMENT as i32 {
            return Err(Error::UnsupportedElement(self.ndp));
        }
        Ok((
            to_count("element count", self.nelem)?,
            to_count("node count", self.npoin)?,
        ))
    }
}
