//! Foundation types for the stencilflow relaxation mesh.
//!
//! This crate provides the types shared by every layer of the system:
//!
//! - **Configuration**: [`MeshConfig`] and its bootstrap validation
//! - **Geometry**: [`NodeCoord`], [`Parity`]
//! - **Storage**: [`Subgrid`] (per-node, with ghost halo) and [`GlobalGrid`]
//!   (aggregator-owned)
//! - **Application descriptor**: [`BoundaryValues`], the [`Stencil`] trait,
//!   and [`Problem`]
//! - **Records**: [`Snapshot`] (node → aggregator) and [`Frame`]
//!   (aggregator → consumer)
//!
//! # Design Philosophy
//!
//! This crate is self-contained with minimal dependencies. It does not depend
//! on any other workspace crates, making it the foundation layer. Cell values
//! are an opaque generic `V: Copy`: the mesh copies, stores, and hands them
//! to the application stencil, nothing more.

mod config;
mod coord;
mod grid;
mod parity;
mod problem;
mod snapshot;
mod subgrid;

pub use config::{ConfigError, MeshConfig};
pub use coord::NodeCoord;
pub use grid::GlobalGrid;
pub use parity::Parity;
pub use problem::{BoundaryValues, Problem, Stencil};
pub use snapshot::{Frame, Snapshot};
pub use subgrid::Subgrid;
