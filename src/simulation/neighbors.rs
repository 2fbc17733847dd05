//! Moore-neighbourhood counting under a boundary policy

use super::grid::Grid;

/// Relative offsets of the eight Moore neighbours; `(0, 0)` is absent.
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// How coordinates beyond the grid edge are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Outside cells do not exist: edges and corners have fewer neighbours
    #[default]
    Clamped,
    /// Coordinates wrap around; the grid is a torus
    Toroidal,
}

impl BoundaryPolicy {
    /// Resolve the neighbour of `(x, y)` at `(dx, dy)` to an in-grid
    /// coordinate, or `None` when it does not exist under this policy.
    #[inline]
    pub fn resolve(
        self,
        grid: &Grid,
        x: usize,
        y: usize,
        (dx, dy): (i64, i64),
    ) -> Option<(usize, usize)> {
        let (w, h) = (grid.width() as i64, grid.height() as i64);
        let (nx, ny) = (x as i64 + dx, y as i64 + dy);
        match self {
            BoundaryPolicy::Clamped => grid
                .get_signed(nx, ny)
                .ok()
                .map(|_| (nx as usize, ny as usize)),
            BoundaryPolicy::Toroidal => {
                Some((nx.rem_euclid(w) as usize, ny.rem_euclid(h) as usize))
            }
        }
    }
}

/// Number of live cells among the eight neighbours of `(x, y)`
///
/// Under [`BoundaryPolicy::Clamped`] a neighbour outside the grid contributes
/// zero. Under [`BoundaryPolicy::Toroidal`] every cell has exactly eight
/// candidates, wrapped onto the opposite edge. On grids narrower than three
/// cells a wrapped coordinate may land on the same cell more than once (or on
/// the centre itself); each candidate is counted independently.
pub fn count_alive_neighbors(grid: &Grid, x: usize, y: usize, policy: BoundaryPolicy) -> u8 {
    MOORE_OFFSETS
        .iter()
        .filter_map(|&offset| policy.resolve(grid, x, y, offset))
        .filter(|&(nx, ny)| grid.get(nx, ny).is_some_and(|cell| cell.is_alive()))
        .count() as u8
}
