//! Halo exchange protocol and checkerboard relaxation step.
//!
//! An **exchange** refreshes a node's ghost cells from its neighbors'
//! current interiors. It runs in two phases over stride-2 index ranges:
//!
//! ```text
//! Phase 1 (index k):  recv north ghost    send south interior
//!                     send east interior  recv west ghost
//! Phase 2 (index k):  send north interior recv south ghost
//!                     recv east ghost     send west interior
//! ```
//!
//! The direction pairing is what keeps rendezvous channels deadlock-free:
//! within phase 1 every value moves north-to-south or west-to-east, within
//! phase 2 the reverse, and phases are serialized per node, so the union of
//! wait-for graphs is acyclic. The two send tasks of a sub-exchange run on
//! scoped threads while the receives run inline on the node thread, so a
//! node never waits on its own sends; the scope join is the four-way
//! completion barrier before the next index.
//!
//! A **relaxation step** interleaves exchanges with the red/black update:
//! exchange, update even-parity cells in place, exchange, update odd-parity
//! cells. Each exchange walks only the index subset the upcoming parity
//! update actually reads, which is why its ranges are keyed by the target
//! parity's complement.

mod exchange;
mod relax;

pub use exchange::{exchange, phase_one_indices, phase_two_indices};
pub use relax::{relaxation_step, update_parity};
