//! One-generation transition
//!
//! [`step`] reads only the front grid and writes only the back grid, so every
//! row of the back grid can be computed on its own rayon worker. The caller
//! swaps the buffers afterwards.

use rayon::prelude::*;

use super::{
    grid::{Cell, Grid},
    neighbors::{count_alive_neighbors, BoundaryPolicy},
    rules::Rules,
};
use crate::error::{LifeError, Result};

/// Compute the generation after `front` into `back`
///
/// `back` starts as a copy of `front`; a live cell whose neighbour count
/// falls outside `rules.survive` dies, a dead cell whose count falls inside
/// `rules.birth` is born, and every other cell keeps its copied state.
///
/// Returns [`LifeError::DimensionMismatch`] without touching `back` when the
/// two grids differ in size.
pub fn step(front: &Grid, back: &mut Grid, rules: &Rules, policy: BoundaryPolicy) -> Result<()> {
    if front.dimensions() != back.dimensions() {
        return Err(LifeError::DimensionMismatch {
            front: front.dimensions(),
            back: back.dimensions(),
        });
    }

    back.copy_from(front)?;

    let width = front.width();
    back.cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let neighbors = count_alive_neighbors(front, x, y, policy);
                *cell = Cell::from(rules.next_state(cell.is_alive(), neighbors));
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::grid::GridPair;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn advance(pair: &mut GridPair, policy: BoundaryPolicy) {
        let (front, back) = pair.split_mut();
        step(front, back, &Rules::CONWAY, policy).unwrap();
        pair.swap();
    }

    #[test]
    fn test_block_is_still_life() {
        let block = Grid::with_alive(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]).unwrap();
        for policy in [BoundaryPolicy::Clamped, BoundaryPolicy::Toroidal] {
            let mut pair = GridPair::new(block.clone());
            for _ in 0..4 {
                advance(&mut pair, policy);
                assert_eq!(pair.front(), &block, "{policy:?}");
            }
        }
    }

    #[test]
    fn test_isolated_cell_dies() {
        let lonely = Grid::with_alive(5, 5, &[(2, 2)]).unwrap();
        let mut back = Grid::new(5, 5).unwrap();
        step(&lonely, &mut back, &Rules::CONWAY, BoundaryPolicy::Clamped).unwrap();
        assert_eq!(back.alive_count(), 0);
    }

    #[test]
    fn test_blinker_has_period_two() {
        let horizontal = Grid::with_alive(7, 7, &[(2, 3), (3, 3), (4, 3)]).unwrap();
        let vertical = Grid::with_alive(7, 7, &[(3, 2), (3, 3), (3, 4)]).unwrap();

        let mut pair = GridPair::new(horizontal.clone());
        advance(&mut pair, BoundaryPolicy::Clamped);
        assert_eq!(pair.front(), &vertical);
        advance(&mut pair, BoundaryPolicy::Clamped);
        assert_eq!(pair.front(), &horizontal);
    }

    #[test]
    fn test_clamped_and_toroidal_differ_at_edges() {
        // A blinker lying along the top edge.
        let edge = Grid::with_alive(5, 5, &[(1, 0), (2, 0), (3, 0)]).unwrap();
        let mut clamped = Grid::new(5, 5).unwrap();
        let mut toroidal = Grid::new(5, 5).unwrap();
        step(&edge, &mut clamped, &Rules::CONWAY, BoundaryPolicy::Clamped).unwrap();
        step(&edge, &mut toroidal, &Rules::CONWAY, BoundaryPolicy::Toroidal).unwrap();

        assert_eq!(clamped, Grid::with_alive(5, 5, &[(2, 0), (2, 1)]).unwrap());
        assert_eq!(toroidal, Grid::with_alive(5, 5, &[(2, 4), (2, 0), (2, 1)]).unwrap());
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let cells = (0..48 * 32).map(|_| Cell::from(rng.random_bool(0.35))).collect();
        let front = Grid::from_cells(48, 32, cells).unwrap();

        for policy in [BoundaryPolicy::Clamped, BoundaryPolicy::Toroidal] {
            let mut first = Grid::new(48, 32).unwrap();
            let mut second = Grid::from_cells(48, 32, vec![Cell::Alive; 48 * 32]).unwrap();
            step(&front, &mut first, &Rules::CONWAY, policy).unwrap();
            step(&front, &mut second, &Rules::CONWAY, policy).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_front_is_read_only() {
        let front = Grid::with_alive(4, 4, &[(0, 0), (1, 0), (2, 0)]).unwrap();
        let snapshot = front.clone();
        let mut back = Grid::new(4, 4).unwrap();
        step(&front, &mut back, &Rules::CONWAY, BoundaryPolicy::Toroidal).unwrap();
        assert_eq!(front, snapshot);
    }

    #[test]
    fn test_custom_rules() {
        // B2/S8: the two lonely cells die, the gap between them is born.
        let rules = Rules::from_bounds(8, 8, 2, 2).unwrap();
        let front = Grid::with_alive(5, 5, &[(1, 2), (3, 2)]).unwrap();
        let mut back = Grid::new(5, 5).unwrap();
        step(&front, &mut back, &rules, BoundaryPolicy::Clamped).unwrap();
        assert_eq!(back, Grid::with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap());
    }

    #[test]
    fn test_every_cell_follows_next_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let cells = (0..20 * 15).map(|_| Cell::from(rng.random_bool(0.5))).collect();
        let front = Grid::from_cells(20, 15, cells).unwrap();
        let rules = Rules::from_bounds(1, 4, 2, 3).unwrap();

        for policy in [BoundaryPolicy::Clamped, BoundaryPolicy::Toroidal] {
            let mut back = Grid::new(20, 15).unwrap();
            step(&front, &mut back, &rules, policy).unwrap();
            for y in 0..15 {
                for x in 0..20 {
                    let alive = front.get(x, y).unwrap().is_alive();
                    let neighbors = count_alive_neighbors(&front, x, y, policy);
                    assert_eq!(
                        back.get(x, y).unwrap().is_alive(),
                        rules.next_state(alive, neighbors),
                        "({x}, {y}) under {policy:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_mismatched_buffers_are_rejected() {
        let front = Grid::with_alive(4, 4, &[(1, 1)]).unwrap();
        let mut back = Grid::new(4, 5).unwrap();
        let before = back.clone();
        assert_eq!(
            step(&front, &mut back, &Rules::CONWAY, BoundaryPolicy::Clamped),
            Err(LifeError::DimensionMismatch {
                front: (4, 4),
                back: (4, 5)
            })
        );
        assert_eq!(back, before);
    }
}
