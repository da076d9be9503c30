//! The parity-interleaved relaxation step.

use crate::exchange::exchange;
use stencilflow_mesh::{LinkError, NeighborLinks};
use stencilflow_types::{Parity, Stencil, Subgrid};

/// Advance the subgrid by one relaxation step: for each parity in
/// checkerboard order, refresh the ghost cells that parity reads, then apply
/// the stencil to that half of the interior.
///
/// The exchange runs with the target parity's complement: a parity-`p` cell
/// reads its neighbors, which carry parity `1 - p`.
pub fn relaxation_step<V, S>(
    grid: &mut Subgrid<V>,
    links: &NeighborLinks<V>,
    stencil: &S,
) -> Result<(), LinkError>
where
    V: Copy + Send,
    S: Stencil<V> + ?Sized,
{
    for parity in Parity::BOTH {
        exchange(grid, links, parity.opposite())?;
        update_parity(grid, stencil, parity);
    }
    Ok(())
}

/// Apply the stencil to every interior cell of the given parity, writing in
/// place. Cells of the opposite parity are not touched.
///
/// The single pass is sound because a parity-`p` stencil application reads
/// orthogonal neighbors of parity `1 - p`, none of which are written during
/// this pass.
pub fn update_parity<V, S>(grid: &mut Subgrid<V>, stencil: &S, parity: Parity)
where
    V: Copy,
    S: Stencil<V> + ?Sized,
{
    let m = grid.m();
    for i in 1..=m {
        let start = if parity.selects(i, 1) { 1 } else { 2 };
        for j in (start..=m).step_by(2) {
            let next = stencil.apply(grid, i, j);
            grid[(i, j)] = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use stencilflow_mesh::ChannelMesh;
    use stencilflow_types::{BoundaryValues, NodeCoord};

    fn average(g: &Subgrid<f64>, i: usize, j: usize) -> f64 {
        (g[(i - 1, j)] + g[(i + 1, j)] + g[(i, j - 1)] + g[(i, j + 1)]) / 4.0
    }

    fn identity(g: &Subgrid<f64>, i: usize, j: usize) -> f64 {
        g[(i, j)]
    }

    #[test]
    fn test_update_touches_only_selected_parity() {
        let m = 4;
        let mut grid = Subgrid::generate(m, |i, j| (i * 10 + j) as f64);
        let before = grid.clone();
        let bump = |g: &Subgrid<f64>, i: usize, j: usize| g[(i, j)] + 100.0;

        update_parity(&mut grid, &bump, Parity::Even);

        for i in 0..grid.side() {
            for j in 0..grid.side() {
                let expected = if grid.is_interior(i, j) && Parity::Even.selects(i, j) {
                    before[(i, j)] + 100.0
                } else {
                    before[(i, j)]
                };
                assert_eq!(grid[(i, j)], expected, "cell ({i}, {j})");
            }
        }
    }

    /// One step of the four-neighbor average on a single node, m = 2, with a
    /// hot north boundary. The odd sub-step reads the even cells refreshed
    /// moments earlier in the same step.
    #[test]
    fn test_single_node_average_step() {
        let bv = BoundaryValues {
            north: 1.0,
            south: 0.0,
            east: 0.0,
            west: 0.0,
            interior: 0.0,
        };
        let n = 2;
        let mut grid = Subgrid::generate(n, |i, j| bv.cell(i, j, n));
        let links = NeighborLinks::default();

        relaxation_step(&mut grid, &links, &average).unwrap();

        assert_eq!(grid[(1, 1)], 0.25);
        assert_eq!(grid[(2, 2)], 0.0);
        assert_eq!(grid[(1, 2)], 0.3125);
        assert_eq!(grid[(2, 1)], 0.0625);

        // Edge-node ghosts sit on the true boundary and never change.
        for j in 0..=n + 1 {
            assert_eq!(grid[(0, j)], bv.cell(0, j, n));
            assert_eq!(grid[(n + 1, j)], bv.cell(n + 1, j, n));
        }
    }

    #[test]
    fn test_identity_step_conserves_grid() {
        let mut grid = Subgrid::generate(4, |i, j| (i * 7 + j * 3) as f64);
        let before = grid.clone();
        let links = NeighborLinks::default();
        for _ in 0..3 {
            relaxation_step(&mut grid, &links, &identity).unwrap();
        }
        assert_eq!(grid, before);
    }

    /// Two horizontally adjacent nodes with distinct interiors and an
    /// identity stencil: after one step each node's facing ghost column
    /// holds the other's interior value.
    #[test]
    fn test_halo_sync_between_neighbors() {
        let m = 2;
        let mesh = ChannelMesh::<f64>::build(2);
        let mut nodes: Vec<(NodeCoord, _)> = mesh.into_node_links().collect();
        let fills = [5.0, 9.0, 5.0, 9.0]; // columns differ, rows repeat

        let results: Vec<Subgrid<f64>> = thread::scope(|s| {
            let handles: Vec<_> = nodes
                .drain(..)
                .zip(fills)
                .map(|((_, links), fill)| {
                    s.spawn(move || {
                        let mut grid = Subgrid::new(m, fill);
                        relaxation_step(&mut grid, &links, &identity).unwrap();
                        grid
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let (left, right) = (&results[0], &results[1]);
        for k in 1..=m {
            assert_eq!(left[(k, m + 1)], 9.0, "east ghost of (1,1)");
            assert_eq!(right[(k, 0)], 5.0, "west ghost of (1,2)");
        }
    }
}
