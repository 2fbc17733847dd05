//! Image to grid conversion
//!
//! Turns a decoded 32-bit pixel buffer into a fresh [`Grid`]. The source
//! pixels are only read, never rewritten.

use rayon::prelude::*;

use super::grid::{Cell, Grid};
use crate::error::{LifeError, Result};

/// Bytes per pixel of the only format the engine understands
pub const BYTES_PER_PIXEL: usize = 4;

/// Borrowed view of a decoded image
///
/// `pitch` is the number of bytes per row and may exceed
/// `width * bytes_per_pixel` when rows are padded.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    pub pixels: &'a [u8],
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
    pub bytes_per_pixel: usize,
}

impl<'a> PixelView<'a> {
    pub fn new(
        pixels: &'a [u8],
        width: usize,
        height: usize,
        pitch: usize,
        bytes_per_pixel: usize,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            pitch,
            bytes_per_pixel,
        }
    }

    /// Tightly packed RGBA8 rows
    pub fn from_rgba(pixels: &'a [u8], width: usize, height: usize) -> Self {
        Self::new(pixels, width, height, width * BYTES_PER_PIXEL, BYTES_PER_PIXEL)
    }

    fn validate(&self) -> Result<()> {
        if self.bytes_per_pixel != BYTES_PER_PIXEL {
            return Err(LifeError::Format {
                bits_per_pixel: self.bytes_per_pixel * 8,
            });
        }
        let dimension_error = |reason| LifeError::Dimension {
            width: self.width,
            height: self.height,
            reason,
        };
        if self.width == 0 || self.height == 0 {
            return Err(dimension_error("width and height must be greater than zero"));
        }
        let row_bytes = self
            .width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| dimension_error("row size overflows usize"))?;
        if self.pitch < row_bytes {
            return Err(dimension_error("pitch is smaller than one row of pixels"));
        }
        let required = self
            .pitch
            .checked_mul(self.height - 1)
            .and_then(|bytes| bytes.checked_add(row_bytes))
            .ok_or_else(|| dimension_error("pitch * height overflows usize"))?;
        if self.pixels.len() < required {
            return Err(dimension_error("pixel buffer is smaller than pitch * height"));
        }
        Ok(())
    }

    fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.pitch;
        &self.pixels[start..start + self.width * BYTES_PER_PIXEL]
    }
}

/// Which value of a pixel is compared against the threshold level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThresholdChannel {
    /// First byte of the pixel in memory (red for RGBA8)
    #[default]
    LeadingByte,
    /// Rec. 601 luma of RGBA8, scaled by alpha
    Luminance,
}

/// Alive/dead decision for a single pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Threshold {
    pub channel: ThresholdChannel,
    /// A pixel is alive when its channel value is strictly greater than this
    pub level: u8,
}

impl Threshold {
    /// Leading byte with its high bit set
    pub const HIGH_BIT: Threshold = Threshold {
        channel: ThresholdChannel::LeadingByte,
        level: 127,
    };

    pub fn new(channel: ThresholdChannel, level: u8) -> Self {
        Self { channel, level }
    }

    /// Value of `pixel` on this threshold's channel
    #[inline]
    pub fn channel_value(&self, pixel: &[u8]) -> u8 {
        match self.channel {
            ThresholdChannel::LeadingByte => pixel[0],
            ThresholdChannel::Luminance => {
                let [r, g, b, a] = [pixel[0], pixel[1], pixel[2], pixel[3]].map(u32::from);
                let luma = (299 * r + 587 * g + 114 * b) / 1000;
                (luma * a / 255) as u8
            }
        }
    }

    #[inline]
    pub fn is_alive(&self, pixel: &[u8]) -> bool {
        self.channel_value(pixel) > self.level
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::HIGH_BIT
    }
}

/// Convert a pixel buffer into a new grid of the same dimensions
///
/// Fails with [`LifeError::Format`] unless pixels are 32-bit, and with
/// [`LifeError::Dimension`] for a zero-sized image or a buffer too small for
/// the declared size and pitch.
pub fn binarize(view: &PixelView<'_>, threshold: Threshold) -> Result<Grid> {
    view.validate()?;

    let mut grid = Grid::new(view.width, view.height)?;
    grid.cells_mut()
        .par_chunks_mut(view.width)
        .enumerate()
        .for_each(|(y, row)| {
            let pixels = view.row(y).chunks_exact(BYTES_PER_PIXEL);
            for (cell, pixel) in row.iter_mut().zip(pixels) {
                *cell = Cell::from(threshold.is_alive(pixel));
            }
        });

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::neighbors::{count_alive_neighbors, BoundaryPolicy};

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat(width * height)
    }

    #[test]
    fn test_high_bit_of_leading_byte() {
        let pixels = [
            0x80, 0, 0, 0xFF, // alive: high bit set
            0x7F, 0xFF, 0xFF, 0xFF, // dead: only trailing bytes bright
        ];
        let grid = binarize(&PixelView::from_rgba(&pixels, 2, 1), Threshold::HIGH_BIT).unwrap();
        assert_eq!(grid.cells(), &[Cell::Alive, Cell::Dead]);
    }

    #[test]
    fn test_luminance_respects_alpha() {
        let pixels = [
            0xFF, 0xFF, 0xFF, 0xFF, // opaque white
            0xFF, 0xFF, 0xFF, 0x00, // transparent white
            0x00, 0xFF, 0x00, 0xFF, // opaque green, luma 149
        ];
        let threshold = Threshold::new(ThresholdChannel::Luminance, 127);
        let grid = binarize(&PixelView::from_rgba(&pixels, 3, 1), threshold).unwrap();
        assert_eq!(grid.cells(), &[Cell::Alive, Cell::Dead, Cell::Alive]);
    }

    #[test]
    fn test_pitch_padding_is_skipped() {
        // Two rows of one pixel each, padded to 8 bytes per row.
        let pixels = [
            0xFF, 0, 0, 0, 0xAA, 0xAA, 0xAA, 0xAA, //
            0x00, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF,
        ];
        let grid = binarize(&PixelView::new(&pixels, 1, 2, 8, 4), Threshold::HIGH_BIT).unwrap();
        assert_eq!(grid.dimensions(), (1, 2));
        assert_eq!(grid.cells(), &[Cell::Alive, Cell::Dead]);
    }

    #[test]
    fn test_source_is_untouched() {
        let pixels = solid(3, 3, [0x90, 0x10, 0x20, 0xFF]);
        let before = pixels.clone();
        let _ = binarize(&PixelView::from_rgba(&pixels, 3, 3), Threshold::HIGH_BIT).unwrap();
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_rejects_non_32_bit_formats() {
        let pixels = [0u8; 12];
        let err = binarize(&PixelView::new(&pixels, 2, 2, 6, 3), Threshold::HIGH_BIT);
        assert_eq!(err, Err(LifeError::Format { bits_per_pixel: 24 }));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let pixels = [0u8; 16];
        for view in [
            PixelView::from_rgba(&pixels, 0, 2),
            PixelView::from_rgba(&pixels, 2, 0),
            PixelView::new(&pixels, 2, 2, 4, 4),
            PixelView::from_rgba(&pixels, 3, 2),
        ] {
            assert!(matches!(
                binarize(&view, Threshold::HIGH_BIT),
                Err(LifeError::Dimension { .. })
            ));
        }
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let pixels = [0u8; 16];
        for view in [
            PixelView::new(&pixels, 1, 3, usize::MAX / 2 + 1, 4),
            PixelView::new(&pixels, usize::MAX / 4 + 1, 1, 4, 4),
            PixelView::new(&pixels, 1, usize::MAX, 4, 4),
        ] {
            assert!(matches!(
                binarize(&view, Threshold::HIGH_BIT),
                Err(LifeError::Dimension { .. })
            ));
        }
    }

    #[test]
    fn test_all_bright_image_neighbor_counts() {
        let (w, h) = (5, 4);
        let pixels = solid(w, h, [0xFF; 4]);
        let grid = binarize(&PixelView::from_rgba(&pixels, w, h), Threshold::HIGH_BIT).unwrap();
        assert_eq!(grid.alive_count(), w * h);

        for y in 0..h {
            for x in 0..w {
                assert_eq!(count_alive_neighbors(&grid, x, y, BoundaryPolicy::Toroidal), 8);

                let on_x_edge = x == 0 || x == w - 1;
                let on_y_edge = y == 0 || y == h - 1;
                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                assert_eq!(count_alive_neighbors(&grid, x, y, BoundaryPolicy::Clamped), expected);
            }
        }
    }
}
