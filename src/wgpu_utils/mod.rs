//! WGPU utility functions and helpers
//!
//! Thin wrappers over the wgpu calls the renderer repeats.

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::*;
pub use uniform_buffer::UniformBuffer;
