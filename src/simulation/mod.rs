//! Simulation system
//!
//! Pure cellular-automaton core: no windowing or GPU types cross this module.
//!
//! - [`binarize`] turns a pixel buffer into the initial [`Grid`]
//! - [`neighbors`] counts live Moore neighbours under a [`BoundaryPolicy`]
//! - [`stepper`] computes one generation from the front grid into the back grid
//! - [`life`] owns the double buffer and the generation counter

pub mod binarize;
pub mod grid;
pub mod life;
pub mod neighbors;
pub mod rules;
pub mod stepper;

// Re-export main types
pub use binarize::{binarize, PixelView, Threshold, ThresholdChannel};
pub use grid::{Cell, Grid, GridPair};
pub use life::LifeSimulation;
pub use neighbors::{count_alive_neighbors, BoundaryPolicy};
pub use rules::{NeighborRange, Rules};
pub use stepper::step;
