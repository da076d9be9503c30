//! The per-node relaxation loop.

use crossbeam::channel::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use stencilflow_engine::relaxation_step;
use stencilflow_mesh::NeighborLinks;
use stencilflow_types::{MeshConfig, NodeCoord, Problem, Snapshot, Stencil, Subgrid};
use tracing::debug;

/// One worker node: its position, its neighbor endpoints, and the shared
/// problem instance.
pub struct NodeDriver<V, S> {
    coord: NodeCoord,
    config: MeshConfig,
    links: NeighborLinks<V>,
    problem: Arc<Problem<V, S>>,
    snapshots: Sender<Snapshot<V>>,
}

impl<V, S> NodeDriver<V, S>
where
    V: Copy + Send + Sync + 'static,
    S: Stencil<V> + 'static,
{
    pub fn new(
        coord: NodeCoord,
        config: MeshConfig,
        links: NeighborLinks<V>,
        problem: Arc<Problem<V, S>>,
        snapshots: Sender<Snapshot<V>>,
    ) -> Self {
        Self {
            coord,
            config,
            links,
            problem,
            snapshots,
        }
    }

    /// Run the driver on a dedicated named thread.
    pub fn spawn(self) -> JoinHandle<()> {
        std::thread::Builder::new()
            .name(format!("worker-{}-{}", self.coord.ni, self.coord.nj))
            .spawn(move || self.run())
            .expect("failed to spawn worker thread")
    }

    /// The node loop. Blocks the calling thread until shutdown propagates
    /// through a disconnected channel.
    pub fn run(self) {
        let mut grid = self.initial_subgrid();
        debug!(node = %self.coord, m = self.config.m, "worker node started");

        loop {
            let snapshot = Snapshot {
                coord: self.coord,
                subgrid: grid.clone(),
            };
            if self.snapshots.send(snapshot).is_err() {
                debug!(node = %self.coord, "aggregator gone, stopping");
                return;
            }

            for _ in 0..self.config.steps_per_frame {
                if let Err(e) = relaxation_step(&mut grid, &self.links, &self.problem.stencil) {
                    debug!(node = %self.coord, error = %e, "neighbor link closed, stopping");
                    return;
                }
            }
        }
    }

    /// Evaluate the boundary-value initializer over this node's patch of
    /// global coordinates, halo included.
    ///
    /// Halos of non-edge nodes start at the interior value and are
    /// overwritten by the first exchange; halos of edge nodes sit on the
    /// true boundary values and never change.
    fn initial_subgrid(&self) -> Subgrid<V> {
        let (i0, j0) = self.coord.origin(self.config.m);
        let n = self.config.n();
        Subgrid::generate(self.config.m, |i, j| {
            self.problem.boundary.cell(i0 + i, j0 + j, n)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::unbounded;
    use stencilflow_types::BoundaryValues;

    fn test_problem() -> Arc<Problem<f64, impl Stencil<f64>>> {
        let boundary = BoundaryValues {
            north: 1.0,
            south: 2.0,
            east: 3.0,
            west: 4.0,
            interior: 0.0,
        };
        Arc::new(Problem::new(boundary, |g: &Subgrid<f64>, i: usize, j: usize| {
            g[(i, j)]
        }))
    }

    #[test]
    fn test_initial_subgrid_corner_node() {
        let config = MeshConfig::new(2, 2);
        let (tx, _rx) = unbounded();
        let driver = NodeDriver::new(
            NodeCoord::new(1, 1),
            config,
            NeighborLinks::default(),
            test_problem(),
            tx,
        );
        let grid = driver.initial_subgrid();

        // Node (1,1) touches the north and west boundaries only.
        for j in 0..=3 {
            assert_eq!(grid[(0, j)], 1.0);
        }
        for i in 1..=3 {
            assert_eq!(grid[(i, 0)], 4.0);
        }
        // Its south and east halos fall inside the global interior.
        for j in 1..=3 {
            assert_eq!(grid[(3, j)], 0.0);
        }
        for i in 1..=3 {
            assert_eq!(grid[(i, 3)], 0.0);
        }
    }

    #[test]
    fn test_initial_subgrid_south_east_corner() {
        let config = MeshConfig::new(2, 2);
        let (tx, _rx) = unbounded();
        let driver = NodeDriver::new(
            NodeCoord::new(2, 2),
            config,
            NeighborLinks::default(),
            test_problem(),
            tx,
        );
        let grid = driver.initial_subgrid();

        for j in 0..=3 {
            assert_eq!(grid[(3, j)], 2.0);
        }
        for i in 1..=2 {
            assert_eq!(grid[(i, 3)], 3.0);
        }
        assert_eq!(grid[(1, 1)], 0.0);
    }

    /// A single-node mesh emits identical snapshots under an identity
    /// stencil and stops once the aggregator side is dropped.
    #[test]
    fn test_run_emits_snapshots_until_disconnect() {
        let config = MeshConfig::new(1, 2);
        let (tx, rx) = unbounded();
        let driver = NodeDriver::new(
            NodeCoord::new(1, 1),
            config,
            NeighborLinks::default(),
            test_problem(),
            tx,
        );
        let handle = driver.spawn();

        let first = rx.recv().unwrap();
        let second = rx.recv().unwrap();
        assert_eq!(first.coord, NodeCoord::new(1, 1));
        assert_eq!(first.subgrid, second.subgrid);

        // Boundary halos hold the configured values in every snapshot.
        assert_eq!(first.subgrid[(0, 1)], 1.0);
        assert_eq!(first.subgrid[(3, 1)], 2.0);
        assert_eq!(first.subgrid[(1, 3)], 3.0);
        assert_eq!(first.subgrid[(1, 0)], 4.0);

        drop(rx);
        handle.join().unwrap();
    }
}
