//! Records flowing between nodes, the aggregator, and the consumer.

use crate::{GlobalGrid, NodeCoord, Subgrid};
use std::time::Duration;

/// One node's subgrid state, emitted to the aggregator once per output
/// cycle. The subgrid is a value copy, isolated from the node's subsequent
/// mutations.
#[derive(Debug, Clone)]
pub struct Snapshot<V> {
    pub coord: NodeCoord,
    pub subgrid: Subgrid<V>,
}

/// One assembled output cycle: the global grid plus wall time since
/// bootstrap.
#[derive(Debug, Clone)]
pub struct Frame<V> {
    /// Wall time since bootstrap. Monotonic across frames.
    pub elapsed: Duration,
    pub grid: GlobalGrid<V>,
}

impl<V> Frame<V> {
    /// Elapsed wall time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}
