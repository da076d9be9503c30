//! Simulation bootstrap.

use crate::aggregator::Aggregator;
use crossbeam::channel::{unbounded, Receiver, RecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use stencilflow_mesh::ChannelMesh;
use stencilflow_node::NodeDriver;
use stencilflow_types::{ConfigError, Frame, MeshConfig, Problem, Stencil};
use tracing::{debug, info};

/// A running relaxation mesh.
///
/// Holds the frame receiver and the join handles of every thread in the
/// mesh. Dropping the handle (or calling [`shutdown`](Self::shutdown))
/// starts the shutdown cascade described in the crate docs.
#[derive(Debug)]
pub struct Simulation<V> {
    frames: Receiver<Frame<V>>,
    workers: Vec<JoinHandle<()>>,
    aggregator: JoinHandle<()>,
}

impl<V> Simulation<V> {
    /// The aggregator's output channel, one [`Frame`] per output cycle.
    pub fn frames(&self) -> &Receiver<Frame<V>> {
        &self.frames
    }

    /// Receive the next frame, blocking until one is assembled.
    pub fn recv(&self) -> Result<Frame<V>, RecvError> {
        self.frames.recv()
    }

    /// Stop the mesh and join every thread.
    pub fn shutdown(self) {
        debug!("simulation shutting down");
        drop(self.frames);
        for worker in self.workers {
            let _ = worker.join();
        }
        let _ = self.aggregator.join();
        debug!("simulation stopped");
    }
}

/// Validate the configuration, build the channel mesh, spawn the `q²`
/// worker nodes and the aggregator, and return the running simulation.
pub fn launch<V, S>(config: MeshConfig, problem: Problem<V, S>) -> Result<Simulation<V>, ConfigError>
where
    V: Copy + Send + Sync + 'static,
    S: Stencil<V> + 'static,
{
    config.validate()?;
    info!(
        q = config.q,
        m = config.m,
        n = config.n(),
        steps_per_frame = config.steps_per_frame,
        "launching relaxation mesh"
    );

    let (snapshot_tx, snapshot_rx) = unbounded();
    let (frame_tx, frame_rx) = unbounded();
    let fill = problem.boundary.interior;
    let problem = Arc::new(problem);

    let workers: Vec<JoinHandle<()>> = ChannelMesh::build(config.q)
        .into_node_links()
        .map(|(coord, links)| {
            NodeDriver::new(
                coord,
                config,
                links,
                Arc::clone(&problem),
                snapshot_tx.clone(),
            )
            .spawn()
        })
        .collect();

    // The workers hold the only senders now; when they exit, the
    // aggregator's receive side disconnects.
    drop(snapshot_tx);

    let aggregator = Aggregator::new(config, fill, snapshot_rx, frame_tx).spawn();

    Ok(Simulation {
        frames: frame_rx,
        workers,
        aggregator,
    })
}
