//! Cell grid storage
//!
//! A [`Grid`] is a fixed-size, row-major rectangle of [`Cell`]s addressed by
//! `(x, y)`. All access is bounds checked; there is no raw pixel arithmetic.
//! [`GridPair`] owns the front/back buffers used for double-buffered stepping.

use crate::error::{LifeError, Result};

/// A single cell of the automaton
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Returns true for [`Cell::Alive`]
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// Fixed-size rectangle of cells stored row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid
    ///
    /// Fails with [`LifeError::Dimension`] if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Create a grid from row-major cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(LifeError::Dimension {
                width,
                height,
                reason: "cell count does not match width * height",
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a dead grid with the listed `(x, y)` coordinates set alive
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive)?;
        }
        Ok(grid)
    }

    fn check_dimensions(width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(LifeError::Dimension {
                width,
                height,
                reason: "width and height must be greater than zero",
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cell at `(x, y)`, or `None` outside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Cell at a signed coordinate
    ///
    /// Coordinates outside `[0, width) x [0, height)` yield
    /// [`LifeError::OutOfRange`].
    pub fn get_signed(&self, x: i64, y: i64) -> Result<Cell> {
        let out_of_range = || LifeError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        let ux = usize::try_from(x).map_err(|_| out_of_range())?;
        let uy = usize::try_from(y).map_err(|_| out_of_range())?;
        self.get(ux, uy).ok_or_else(out_of_range)
    }

    /// Overwrite the cell at `(x, y)`
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let Some(i) = self.index(x, y) else {
            return Err(LifeError::OutOfRange {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        };
        self.cells[i] = cell;
        Ok(())
    }

    /// All cells in row-major order
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of live cells
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Copy every cell of `other` into `self`
    pub fn copy_from(&mut self, other: &Grid) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(LifeError::DimensionMismatch {
                front: other.dimensions(),
                back: self.dimensions(),
            });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }
}

/// Front/back buffer pair for double-buffered generations
///
/// The front buffer holds the current generation; the back buffer is scratch
/// space for the next one. [`GridPair::swap`] exchanges their roles without
/// copying any cells.
#[derive(Clone, Debug)]
pub struct GridPair {
    front: Grid,
    back: Grid,
}

impl GridPair {
    /// Create a pair whose front buffer is `initial`
    pub fn new(initial: Grid) -> Self {
        let back = initial.clone();
        Self {
            front: initial,
            back,
        }
    }

    /// Create a pair from existing buffers
    ///
    /// The buffers are not required to match here; the stepper checks their
    /// dimensions before every generation.
    pub fn from_buffers(front: Grid, back: Grid) -> Self {
        Self { front, back }
    }

    #[inline]
    pub fn front(&self) -> &Grid {
        &self.front
    }

    #[inline]
    pub fn back(&self) -> &Grid {
        &self.back
    }

    /// Read-only front and writable back, borrowed together for a step
    #[inline]
    pub fn split_mut(&mut self) -> (&Grid, &mut Grid) {
        (&self.front, &mut self.back)
    }

    /// Exchange front and back
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }
}
