//! In-process channel mesh between nearest-neighbor worker nodes.
//!
//! The mesh wires each interior north/south and east/west node pair with a
//! bidirectional rendezvous link: two zero-capacity crossbeam channels, one
//! per direction. A send completes only when the neighbor performs the
//! matching receive, which is the sole synchronization between nodes.
//!
//! Each node receives a [`NeighborLinks`] naming its four endpoints; mesh
//! edges are `None`. Every channel has exactly one sender and one receiver
//! at any given exchange sub-step; there is no fan-in or fan-out.
//!
//! Disconnection is the shutdown signal: when a node or the aggregator
//! terminates, its endpoints drop and any peer blocked on the link observes
//! [`LinkError::Disconnected`] at its next suspension point.

mod link;
mod mesh;

pub use link::{Duplex, LinkError};
pub use mesh::{ChannelMesh, NeighborLinks};
