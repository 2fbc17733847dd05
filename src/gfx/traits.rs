//! Rendering seam between the session and a graphics backend

use super::viewport::ViewportRect;

/// Something that can put a frame of cell pixels on screen
///
/// Implementations only display; nothing they do feeds back into the
/// simulation.
pub trait RenderAdapter {
    /// Draw `pixels` (RGBA8 rows, `pitch` bytes apart) stretched over
    /// `viewport`, then present the frame
    fn present(&mut self, pixels: &[u8], pitch: usize, viewport: ViewportRect);
}
