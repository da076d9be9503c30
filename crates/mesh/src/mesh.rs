//! Mesh construction and per-node endpoint lookup.

use crate::link::Duplex;
use stencilflow_types::NodeCoord;

/// The four link endpoints of one node. Mesh edges are `None`.
#[derive(Debug)]
pub struct NeighborLinks<V> {
    pub north: Option<Duplex<V>>,
    pub south: Option<Duplex<V>>,
    pub east: Option<Duplex<V>>,
    pub west: Option<Duplex<V>>,
}

impl<V> Default for NeighborLinks<V> {
    fn default() -> Self {
        Self {
            north: None,
            south: None,
            east: None,
            west: None,
        }
    }
}

/// All links of a `q × q` mesh, held until the bootstrap hands each node its
/// endpoints.
#[derive(Debug)]
pub struct ChannelMesh<V> {
    q: usize,
    nodes: Vec<NeighborLinks<V>>,
}

impl<V> ChannelMesh<V> {
    /// Allocate every north/south and east/west link of a `q × q` mesh.
    pub fn build(q: usize) -> Self {
        let mut nodes: Vec<NeighborLinks<V>> =
            (0..q * q).map(|_| NeighborLinks::default()).collect();

        // ns[i][j] joins (i, j) and (i+1, j), for 1 <= i <= q-1.
        for ni in 1..q {
            for nj in 1..=q {
                let (upper, lower) = Duplex::pair();
                nodes[Self::index(q, ni, nj)].south = Some(upper);
                nodes[Self::index(q, ni + 1, nj)].north = Some(lower);
            }
        }

        // ew[i][j] joins (i, j) and (i, j+1), for 1 <= j <= q-1.
        for ni in 1..=q {
            for nj in 1..q {
                let (left, right) = Duplex::pair();
                nodes[Self::index(q, ni, nj)].east = Some(left);
                nodes[Self::index(q, ni, nj + 1)].west = Some(right);
            }
        }

        Self { q, nodes }
    }

    /// Mesh dimension.
    pub fn q(&self) -> usize {
        self.q
    }

    /// Consume the mesh, yielding each node's endpoints paired with its
    /// coordinate, in row-major node order.
    pub fn into_node_links(self) -> impl Iterator<Item = (NodeCoord, NeighborLinks<V>)> {
        let q = self.q;
        self.nodes.into_iter().enumerate().map(move |(idx, links)| {
            let coord = NodeCoord::new(idx / q + 1, idx % q + 1);
            (coord, links)
        })
    }

    fn index(q: usize, ni: usize, nj: usize) -> usize {
        (ni - 1) * q + (nj - 1)
    }
}
