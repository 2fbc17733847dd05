//! On-screen placement of the grid
//!
//! The grid is drawn into a rectangle measured in physical screen pixels. The
//! rectangle's size is the grid's home size (one screen pixel per cell)
//! multiplied by a zoom scale bounded to `1.0..=max_scale`.

/// Axis-aligned rectangle in screen pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open hit test: the right and bottom edges are outside
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && px < x + i64::from(self.width) && py >= y && py < y + i64::from(self.height)
    }
}

/// How one scroll notch changes the zoom scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomMode {
    /// Multiply or divide the scale by this factor
    Factor(f32),
    /// Add or subtract one home-size unit
    Step,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    pub mode: ZoomMode,
    /// Upper bound on the scale, in multiples of the home size
    pub max_scale: f32,
}

impl ZoomConfig {
    pub const DEFAULT_FACTOR: f32 = 1.1;
    pub const DEFAULT_MAX_SCALE: f32 = 50.0;
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            mode: ZoomMode::Factor(Self::DEFAULT_FACTOR),
            max_scale: Self::DEFAULT_MAX_SCALE,
        }
    }
}

/// Position and zoom of the grid on screen
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    x: i32,
    y: i32,
    home_width: u32,
    home_height: u32,
    scale: f32,
    zoom: ZoomConfig,
}

impl Viewport {
    /// Viewport at the window origin showing the grid at 1:1
    pub fn new(home_width: u32, home_height: u32, zoom: ZoomConfig) -> Self {
        Self {
            x: 0,
            y: 0,
            home_width,
            home_height,
            scale: 1.0,
            zoom,
        }
    }

    pub fn rect(&self) -> ViewportRect {
        ViewportRect {
            x: self.x,
            y: self.y,
            width: Self::scaled(self.home_width, self.scale),
            height: Self::scaled(self.home_height, self.scale),
        }
    }

    fn scaled(length: u32, scale: f32) -> u32 {
        (length as f64 * scale as f64).round() as u32
    }

    pub fn home_size(&self) -> (u32, u32) {
        (self.home_width, self.home_height)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn max_scale(&self) -> f32 {
        self.zoom.max_scale.max(1.0)
    }

    /// Move the rectangle's top-left corner
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Back to the home size; position is kept
    pub fn reset_size(&mut self) {
        self.scale = 1.0;
    }

    /// Grow by one zoom notch, bounded above by `max_scale`
    pub fn zoom_in(&mut self) {
        let next = match self.zoom.mode {
            ZoomMode::Factor(factor) => self.scale * factor,
            ZoomMode::Step => self.scale + 1.0,
        };
        self.scale = next.clamp(1.0, self.max_scale());
    }

    /// Shrink by one zoom notch, never below the home size
    pub fn zoom_out(&mut self) {
        let next = match self.zoom.mode {
            ZoomMode::Factor(factor) => self.scale / factor,
            ZoomMode::Step => self.scale - 1.0,
        };
        self.scale = next.clamp(1.0, self.max_scale());
    }
}
