//! Boundary node numbering (IPOBO) and Telemac boundary condition files

// standard library
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::lines::init_writer;
use crate::mesh::Mesh;

// external crates
use log::debug;

/// Closed loops of boundary nodes
///
/// Boundary edges are the edges used by exactly one element. With every
/// element ordered counter-clockwise, they chain into loops that run
/// counter-clockwise around the outer boundary and clockwise around islands.
///
/// The first loop is the one holding the south-west-most node (smallest
/// `x + y`) and starts at that node. Remaining loops follow the same rule.
///
/// ```rust
/// # use hydromesh_grid::{Boundary, Mesh};
/// let mesh = Mesh::from_xyz(
///     &[0.0, 1.0, 1.0, 0.0],
///     &[0.0, 0.0, 1.0, 1.0],
///     &[0.0; 4],
///     vec![[0, 1, 2], [0, 2, 3]],
/// )
/// .unwrap();
///
/// let boundary = Boundary::of(&mesh).unwrap();
/// assert_eq!(boundary.loops, vec![vec![0, 1, 2, 3]]);
/// assert_eq!(boundary.ipobo(), vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Node indices of every loop in traversal order, 0-based
    pub loops: Vec<Vec<usize>>,
    nnodes: usize,
}

impl Boundary {
    /// Trace the boundary loops of a mesh
    pub fn of(mesh: &Mesh) -> Result<Self> {
        mesh.validate()?;
        let mut outgoing = boundary_edges(&mesh.oriented());
        let mut loops = Vec::new();

        while let Some(start) = south_west(&outgoing, mesh) {
            let mut chain = vec![start];
            let mut current = start;
            loop {
                let next = take_edge(&mut outgoing, current)
                    .ok_or(Error::OpenBoundary { node: current + 1 })?;
                if next == start {
                    break;
                }
                chain.push(next);
                current = next;
            }
            debug!("boundary loop of {} nodes from node {}", chain.len(), start + 1);
            loops.push(chain);
        }

        Ok(Self {
            loops,
            nnodes: mesh.nnodes(),
        })
    }

    /// Number of nodes in the traced mesh
    pub fn nnodes(&self) -> usize {
        self.nnodes
    }

    /// Boundary nodes in traversal order, each listed once
    pub fn nodes(&self) -> Vec<usize> {
        let mut seen = vec![false; self.nnodes];
        self.loops
            .iter()
            .flatten()
            .copied()
            .filter(|&n| !std::mem::replace(&mut seen[n], true))
            .collect()
    }

    /// Boundary sequence number of every node, 0 for interior nodes
    pub fn ipobo(&self) -> Vec<i32> {
        let mut markers = vec![0; self.nnodes];
        for (seq, node) in self.nodes().into_iter().enumerate() {
            markers[node] = seq as i32 + 1;
        }
        markers
    }

    /// Write a Telemac boundary condition file
    ///
    /// Every boundary node is a closed wall (`2 2 2`) with zero prescribed
    /// values, ready to be edited for open boundaries.
    pub fn write_cli<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = init_writer(path)?;
        self.write_cli_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a Telemac boundary condition file to any writer
    pub fn write_cli_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (seq, node) in self.nodes().into_iter().enumerate() {
            writeln!(
                writer,
                "2 2 2 0.000 0.000 0.000 0.000 2 0.000 0.000 0.000 {} {}",
                node + 1,
                seq + 1
            )?;
        }
        Ok(())
    }
}

/// Directed edges used by a single element, keyed by their start node
fn boundary_edges(oriented: &Mesh) -> BTreeMap<usize, Vec<usize>> {
    let edges = |&[a, b, c]: &[usize; 3]| [(a, b), (b, c), (c, a)];

    let mut uses: HashMap<(usize, usize), usize> = HashMap::new();
    for (p, q) in oriented.elements.iter().flat_map(edges) {
        *uses.entry((p.min(q), p.max(q))).or_default() += 1;
    }

    let mut outgoing: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (p, q) in oriented.elements.iter().flat_map(edges) {
        if uses.get(&(p.min(q), p.max(q))) == Some(&1) {
            outgoing.entry(p).or_default().push(q);
        }
    }
    outgoing
}

/// Node with remaining boundary edges and the smallest `x + y`
fn south_west(outgoing: &BTreeMap<usize, Vec<usize>>, mesh: &Mesh) -> Option<usize> {
    let key = |n: usize| mesh.nodes[n].x + mesh.nodes[n].y;
    outgoing
        .keys()
        .copied()
        .min_by(|&a, &b| key(a).total_cmp(&key(b)))
}

/// Remove and return one boundary edge leaving `node`
fn take_edge(outgoing: &mut BTreeMap<usize, Vec<usize>>, node: usize) -> Option<usize> {
    let targets = outgoing.get_mut(&node)?;
    let next = targets.pop();
    if targets.is_empty() {
        outgoing.remove(&node);
    }
    next
}
