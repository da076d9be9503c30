//! The two-phase halo exchange.

use std::thread;
use stencilflow_mesh::{Duplex, LinkError, NeighborLinks};
use stencilflow_types::{Parity, Subgrid};
use tracing::trace;

/// Phase 1 index range: `2 - p, 4 - p, ...` up to `m`.
pub fn phase_one_indices(m: usize, parity: Parity) -> impl Iterator<Item = usize> {
    ((2 - parity.index())..=m).step_by(2)
}

/// Phase 2 index range: `1 + p, 3 + p, ...` up to `m`.
///
/// Together with [`phase_one_indices`] this covers `1..=m` exactly once per
/// exchange, which is the reason `m` must be even.
pub fn phase_two_indices(m: usize, parity: Parity) -> impl Iterator<Item = usize> {
    ((1 + parity.index())..=m).step_by(2)
}

/// Refresh the ghost cells this exchange's index ranges select, blocking on
/// each rendezvous with the corresponding neighbor.
///
/// `parity` keys the index ranges; to prepare an update of target parity `p`
/// the caller passes `p.opposite()`, because the ghost cells a parity-`p`
/// cell reads lie on the opposite color.
///
/// Errors indicate a disconnected neighbor, which only happens during
/// shutdown; the caller is expected to terminate.
pub fn exchange<V: Copy + Send>(
    grid: &mut Subgrid<V>,
    links: &NeighborLinks<V>,
    parity: Parity,
) -> Result<(), LinkError> {
    let m = grid.m();
    for k in phase_one_indices(m, parity) {
        phase_one_at(grid, links, k)?;
    }
    for k in phase_two_indices(m, parity) {
        phase_two_at(grid, links, k)?;
    }
    trace!(parity = parity.index(), "halo exchange complete");
    Ok(())
}

/// Phase 1 sub-exchange at index `k`: values move south and east.
fn phase_one_at<V: Copy + Send>(
    grid: &mut Subgrid<V>,
    links: &NeighborLinks<V>,
    k: usize,
) -> Result<(), LinkError> {
    let m = grid.m();
    let south = links.south.as_ref().map(|link| (link, grid[(m, k)]));
    let east = links.east.as_ref().map(|link| (link, grid[(k, m)]));
    let north = links.north.as_ref().map(|link| (link, (0, k)));
    let west = links.west.as_ref().map(|link| (link, (k, 0)));
    rendezvous(grid, [south, east], [north, west])
}

/// Phase 2 sub-exchange at index `k`: values move north and west.
fn phase_two_at<V: Copy + Send>(
    grid: &mut Subgrid<V>,
    links: &NeighborLinks<V>,
    k: usize,
) -> Result<(), LinkError> {
    let m = grid.m();
    let north = links.north.as_ref().map(|link| (link, grid[(1, k)]));
    let west = links.west.as_ref().map(|link| (link, grid[(k, 1)]));
    let south = links.south.as_ref().map(|link| (link, (m + 1, k)));
    let east = links.east.as_ref().map(|link| (link, (k, m + 1)));
    rendezvous(grid, [north, west], [south, east])
}

/// Run one sub-exchange: up to two sends on scoped threads, up to two
/// receives inline, joining all four before returning.
///
/// Sends must not run on the node thread ahead of the receives: with
/// rendezvous channels that would put the node's own progress on the
/// wait-for path of its neighbors and reintroduce cycles.
fn rendezvous<V: Copy + Send>(
    grid: &mut Subgrid<V>,
    sends: [Option<(&Duplex<V>, V)>; 2],
    recvs: [Option<(&Duplex<V>, (usize, usize))>; 2],
) -> Result<(), LinkError> {
    thread::scope(|scope| {
        let pending: Vec<_> = sends
            .into_iter()
            .flatten()
            .map(|(link, value)| scope.spawn(move || link.send(value)))
            .collect();

        let mut outcome = Ok(());
        for (link, slot) in recvs.into_iter().flatten() {
            match link.recv() {
                Ok(value) => grid[slot] = value,
                Err(e) => outcome = outcome.and(Err(e)),
            }
        }
        for task in pending {
            let sent = task.join().expect("send task panicked");
            outcome = outcome.and(sent);
        }
        outcome
    })
}
