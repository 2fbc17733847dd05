//! Loading the seed grid from an image file

use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, RgbaImage};
use log::info;

use crate::{
    error::{LifeError, Result},
    simulation::{
        binarize::{binarize, BYTES_PER_PIXEL},
        Grid, PixelView, Threshold,
    },
};

/// Binarize an already decoded RGBA image
pub fn grid_from_image(image: &RgbaImage, threshold: Threshold) -> Result<Grid> {
    let view = PixelView::from_rgba(image.as_raw(), image.width() as usize, image.height() as usize);
    binarize(&view, threshold)
}

/// Binarize a decoded image of any layout with 32 bits per pixel
///
/// Other layouts (24-bit RGB, 8-bit grey, 64-bit RGBA, ...) fail with
/// [`LifeError::Format`]. Accepted pixels are converted to RGBA8 first, so
/// the leading byte is the red channel.
pub fn grid_from_decoded(image: &DynamicImage, threshold: Threshold) -> Result<Grid> {
    let bytes_per_pixel = usize::from(image.color().bytes_per_pixel());
    if bytes_per_pixel != BYTES_PER_PIXEL {
        return Err(LifeError::Format {
            bits_per_pixel: bytes_per_pixel * 8,
        });
    }
    grid_from_image(&image.to_rgba8(), threshold)
}

/// Decode the image at `path` and binarize it
pub fn load_grid(path: impl AsRef<Path>, threshold: Threshold) -> anyhow::Result<Grid> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    let grid = grid_from_decoded(&image, threshold)
        .with_context(|| format!("Failed to build a grid from {}", path.display()))?;

    info!(
        "Loaded {} ({}x{}, {} alive)",
        path.display(),
        grid.width(),
        grid.height(),
        grid.alive_count()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Cell, ThresholdChannel};
    use image::{GrayImage, Rgb, RgbImage, Rgba};

    fn checker() -> RgbaImage {
        RgbaImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_grid_from_image() {
        let grid = grid_from_image(&checker(), Threshold::HIGH_BIT).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
        assert_eq!(grid.get(1, 0), Some(Cell::Dead));
        assert_eq!(grid.get(3, 2), Some(Cell::Dead));
        assert_eq!(grid.alive_count(), 6);
    }

    #[test]
    fn test_leading_byte_is_red_channel() {
        let image = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([0, 200, 200, 255])
            }
        });
        let grid = grid_from_image(&image, Threshold::HIGH_BIT).unwrap();
        assert_eq!(grid.cells(), &[Cell::Alive, Cell::Dead]);

        let luminance = Threshold::new(ThresholdChannel::Luminance, 127);
        let grid = grid_from_image(&image, luminance).unwrap();
        assert_eq!(grid.cells(), &[Cell::Dead, Cell::Alive]);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = RgbaImage::new(0, 5);
        assert!(matches!(
            grid_from_image(&image, Threshold::HIGH_BIT),
            Err(LifeError::Dimension { .. })
        ));
    }

    #[test]
    fn test_load_grid_from_png() {
        let path = std::env::temp_dir().join(format!("pixlife-load-{}.png", std::process::id()));
        checker().save(&path).unwrap();
        let grid = load_grid(&path, Threshold::HIGH_BIT);
        let _ = std::fs::remove_file(&path);

        assert_eq!(grid.unwrap(), grid_from_image(&checker(), Threshold::HIGH_BIT).unwrap());
    }

    #[test]
    fn test_non_32_bit_images_are_rejected() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])));
        assert_eq!(
            grid_from_decoded(&rgb, Threshold::HIGH_BIT),
            Err(LifeError::Format { bits_per_pixel: 24 })
        );

        let grey = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        assert_eq!(
            grid_from_decoded(&grey, Threshold::HIGH_BIT),
            Err(LifeError::Format { bits_per_pixel: 8 })
        );

        let rgba = DynamicImage::ImageRgba8(checker());
        assert_eq!(
            grid_from_decoded(&rgba, Threshold::HIGH_BIT),
            grid_from_image(&checker(), Threshold::HIGH_BIT)
        );
    }

    #[test]
    fn test_load_grid_rejects_rgb_png() {
        let path = std::env::temp_dir().join(format!("pixlife-rgb-{}.png", std::process::id()));
        RgbImage::from_pixel(3, 3, Rgb([200, 0, 0])).save(&path).unwrap();
        let result = load_grid(&path, Threshold::HIGH_BIT);
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<LifeError>(),
            Some(&LifeError::Format { bits_per_pixel: 24 })
        );
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = load_grid("/nonexistent/seed.png", Threshold::HIGH_BIT).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/seed.png"));
    }
}
