//! Snapshot aggregation into global frames.

use crossbeam::channel::{Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Instant;
use stencilflow_types::{Frame, GlobalGrid, MeshConfig, Snapshot};
use tracing::{debug, trace};

/// Assembles per-node snapshots into the global grid and emits one
/// [`Frame`] per complete batch of `q²` snapshots.
///
/// Snapshots within a batch may arrive in any order; the aggregator does not
/// deduplicate. Correctness rests on the workers' lock-step: every node
/// emits exactly once per output cycle before any node emits again, which
/// the rendezvous exchange protocol guarantees.
pub struct Aggregator<V> {
    config: MeshConfig,
    grid: GlobalGrid<V>,
    snapshots: Receiver<Snapshot<V>>,
    frames: Sender<Frame<V>>,
    started: Instant,
}

impl<V: Copy + Send + 'static> Aggregator<V> {
    /// Create an aggregator. `fill` seeds the global grid and is fully
    /// overwritten by the first complete batch. The elapsed clock starts
    /// here, at bootstrap.
    pub fn new(
        config: MeshConfig,
        fill: V,
        snapshots: Receiver<Snapshot<V>>,
        frames: Sender<Frame<V>>,
    ) -> Self {
        Self {
            grid: GlobalGrid::new(config.n(), fill),
            config,
            snapshots,
            frames,
            started: Instant::now(),
        }
    }

    /// Run the aggregator on a dedicated named thread.
    pub fn spawn(self) -> JoinHandle<()> {
        std::thread::Builder::new()
            .name("aggregator".to_string())
            .spawn(move || self.run())
            .expect("failed to spawn aggregator thread")
    }

    /// Consume snapshot batches until either side of the pipeline
    /// disconnects.
    pub fn run(mut self) {
        let batch = self.config.node_count();
        let mut cycle = 0u64;

        loop {
            for _ in 0..batch {
                match self.snapshots.recv() {
                    Ok(snapshot) => {
                        let origin = snapshot.coord.origin(self.config.m);
                        self.grid.blit_interior(&snapshot.subgrid, origin);
                    }
                    Err(_) => {
                        debug!(cycle, "workers gone, aggregator stopping");
                        return;
                    }
                }
            }

            cycle += 1;
            let frame = Frame {
                elapsed: self.started.elapsed(),
                grid: self.grid.clone(),
            };
            trace!(cycle, elapsed_ms = frame.elapsed_ms(), "frame assembled");
            if self.frames.send(frame).is_err() {
                debug!(cycle, "consumer gone, aggregator stopping");
                return;
            }
        }
    }
}
