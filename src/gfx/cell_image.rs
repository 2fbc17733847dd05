//! Grid to RGBA conversion for display

use rayon::prelude::*;

use crate::simulation::{Cell, Grid};

/// Alive/dead display colours as RGBA8
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub alive: [u8; 4],
    pub dead: [u8; 4],
}

impl Palette {
    /// Build from `0xRRGGBBAA` words
    pub const fn from_rgba_u32(alive: u32, dead: u32) -> Self {
        Self {
            alive: alive.to_be_bytes(),
            dead: dead.to_be_bytes(),
        }
    }

    #[inline]
    pub fn color(&self, cell: Cell) -> [u8; 4] {
        match cell {
            Cell::Alive => self.alive,
            Cell::Dead => self.dead,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_rgba_u32(0xFFFF00FF, 0x121212FF)
    }
}

/// Tightly packed RGBA8 image with one pixel per cell
pub struct CellImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl CellImage {
    pub const BYTES_PER_PIXEL: usize = 4;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * Self::BYTES_PER_PIXEL],
        }
    }

    /// Repaint from `grid`, resizing if its dimensions changed
    pub fn paint(&mut self, grid: &Grid, palette: &Palette) {
        if grid.dimensions() != (self.width, self.height) {
            *self = Self::new(grid.width(), grid.height());
        }
        let pitch = self.pitch();
        self.pixels
            .par_chunks_mut(pitch)
            .zip(grid.cells().par_chunks(grid.width()))
            .for_each(|(out, cells)| {
                for (pixel, &cell) in out.chunks_exact_mut(Self::BYTES_PER_PIXEL).zip(cells) {
                    pixel.copy_from_slice(&palette.color(cell));
                }
            });
    }

    /// Bytes per row
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width * Self::BYTES_PER_PIXEL
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_words() {
        let palette = Palette::from_rgba_u32(0x11223344, 0xAABBCCDD);
        assert_eq!(palette.alive, [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(palette.dead, [0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_paint_uses_palette() {
        let grid = Grid::with_alive(2, 2, &[(1, 0), (0, 1)]).unwrap();
        let palette = Palette::default();
        let mut image = CellImage::new(1, 1);
        image.paint(&grid, &palette);

        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.pitch(), 8);
        let pixels: Vec<_> = image.pixels().chunks_exact(4).collect();
        assert_eq!(pixels[0], palette.dead);
        assert_eq!(pixels[1], palette.alive);
        assert_eq!(pixels[2], palette.alive);
        assert_eq!(pixels[3], palette.dead);
    }
}
