//! pixlife
//!
//! Conway's Game of Life seeded from a bitmap image. Bright pixels become
//! live cells; the grid then evolves under configurable survive/birth rules
//! in a window that can be dragged and zoomed.
//!
//! The simulation core ([`simulation`]) and interaction state machine
//! ([`gfx::viewport`]) are plain data; [`app`] wires them to winit and wgpu.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod session;
pub mod simulation;
pub mod source;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::LifeApp;
pub use config::RunConfig;
pub use error::{LifeError, Result};
pub use session::{Session, TickOutcome};
