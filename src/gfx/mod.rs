//! # Graphics Module
//!
//! Everything between a [`Grid`](crate::simulation::Grid) and the screen:
//!
//! - **Cell image** ([`cell_image`]) - grid to RGBA8 pixels through a [`Palette`]
//! - **Viewport** ([`viewport`]) - the on-screen rectangle and the interaction
//!   state machine that moves and scales it
//! - **Render engine** ([`render_engine`]) - wgpu presentation of the pixels
//! - **Resources** ([`resources`]) - GPU textures
//!
//! The session only talks to a renderer through [`RenderAdapter`], so
//! everything except [`RenderEngine`] is testable without a GPU.

pub mod cell_image;
pub mod render_engine;
pub mod resources;
pub mod traits;
pub mod viewport;

// Re-export commonly used types
pub use cell_image::{CellImage, Palette};
pub use render_engine::{RenderEngine, ViewportUniform};
pub use traits::RenderAdapter;
pub use viewport::{InteractionState, Viewport, ViewportController, ViewportRect};
