pub mod controller;
pub mod input;
pub mod rect;

// Re-export main types
pub use controller::{InteractionState, ViewportController};
pub use input::{InputEvent, InputTranslator, Key, PointerButton, ScrollDirection};
pub use rect::{Viewport, ViewportRect, ZoomConfig, ZoomMode};
