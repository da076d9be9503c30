//! Worker node driver.
//!
//! Each node of the mesh runs a [`NodeDriver`] on its own thread:
//!
//! 1. Build the initial subgrid from the problem's boundary values at this
//!    node's global coordinates.
//! 2. Emit a value-copy snapshot to the aggregator.
//! 3. Perform the configured number of relaxation steps.
//! 4. Repeat from 2.
//!
//! The loop has no explicit stop condition; it terminates when the
//! aggregator drops the snapshot channel or a neighbor link disconnects,
//! which is how shutdown propagates through the mesh.

mod driver;

pub use driver::NodeDriver;
