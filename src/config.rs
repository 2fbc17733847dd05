//! Run configuration
//!
//! Everything here is fixed for the lifetime of a run. Defaults reproduce the
//! classic viewer: yellow-on-charcoal, Conway rules, clamped edges, 20 ms
//! frames and a 1.1x wheel zoom.

use std::time::Duration;

use crate::{
    gfx::{cell_image::Palette, viewport::ZoomConfig},
    simulation::{BoundaryPolicy, Rules, Threshold},
};

pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(20);
pub const DEFAULT_WINDOW_TITLE: &str = "Game of Life";
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_string(),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub rules: Rules,
    pub policy: BoundaryPolicy,
    pub threshold: Threshold,
    pub palette: Palette,
    /// Pause between frames
    pub frame_delay: Duration,
    pub zoom: ZoomConfig,
    pub window: WindowConfig,
    /// Start in `Running` instead of `Paused`
    pub start_running: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rules: Rules::CONWAY,
            policy: BoundaryPolicy::Clamped,
            threshold: Threshold::HIGH_BIT,
            palette: Palette::default(),
            frame_delay: DEFAULT_FRAME_DELAY,
            zoom: ZoomConfig::default(),
            window: WindowConfig::default(),
            start_running: false,
        }
    }
}
