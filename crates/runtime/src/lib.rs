//! Aggregator and simulation bootstrap.
//!
//! [`launch`] validates the configuration, allocates the channel mesh,
//! spawns the `q²` worker nodes plus the aggregator on named threads, and
//! returns a [`Simulation`] handle owning the frame receiver.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Simulation                        │
//! │                                                         │
//! │   worker (1,1) ── rendezvous links ── worker (1,2)      │
//! │        │                                   │            │
//! │   worker (2,1) ───────────────────── worker (2,2)       │
//! │        │                                   │            │
//! │        └──────── snapshots (fan-in) ───────┘            │
//! │                        │                                │
//! │                        ▼                                │
//! │                   Aggregator ──► frames (output)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Shutdown
//!
//! There is no stop signal inside the mesh; shutdown is a drop-driven
//! cascade. Dropping the [`Simulation`] (or calling
//! [`shutdown`](Simulation::shutdown)) disconnects the frame channel; the
//! aggregator exits at its next send, which disconnects the snapshot
//! channel; every worker exits at its next emission; and dropped neighbor
//! links unblock any worker still parked mid-exchange. Every thread
//! terminates at its next channel operation.

mod aggregator;
mod bootstrap;

pub use aggregator::Aggregator;
pub use bootstrap::{launch, Simulation};
