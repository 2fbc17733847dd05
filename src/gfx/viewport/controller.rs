//! Interaction state machine
//!
//! Consumes [`InputEvent`]s and owns the [`Viewport`]. Key actions fire on
//! release so a held key never toggles more than once.

use log::{debug, info, warn};

use super::{
    input::{InputEvent, Key, PointerButton, ScrollDirection},
    rect::{Viewport, ViewportRect},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// Stepping disabled after a failed generation; the toggle key is ignored
    Idle,
    /// Primary button held on the grid; the rectangle follows the pointer
    Dragging,
    Paused,
    Running,
    /// Terminal
    Quit,
}

pub struct ViewportController {
    viewport: Viewport,
    state: InteractionState,
    /// State restored when a drag ends
    resume: InteractionState,
    click_offset: (i32, i32),
}

impl ViewportController {
    /// Controller starting `Paused`, or `Running` when `start_running` is set
    pub fn new(viewport: Viewport, start_running: bool) -> Self {
        let state = if start_running {
            InteractionState::Running
        } else {
            InteractionState::Paused
        };
        Self {
            viewport,
            state,
            resume: state,
            click_offset: (0, 0),
        }
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    pub fn rect(&self) -> ViewportRect {
        self.viewport.rect()
    }

    /// Whether the simulation should advance this frame
    #[inline]
    pub fn should_step(&self) -> bool {
        self.state == InteractionState::Running
    }

    #[inline]
    pub fn is_quit(&self) -> bool {
        self.state == InteractionState::Quit
    }

    /// Disable stepping for the rest of the session
    ///
    /// A drag in progress continues and ends in `Idle`.
    pub fn freeze(&mut self) {
        match self.state {
            InteractionState::Quit | InteractionState::Idle => {}
            InteractionState::Dragging => self.resume = InteractionState::Idle,
            InteractionState::Running | InteractionState::Paused => {
                warn!("Simulation frozen; display stays on the last generation");
                self.state = InteractionState::Idle;
            }
        }
    }

    pub fn handle(&mut self, event: &InputEvent) {
        if self.is_quit() {
            return;
        }

        match *event {
            InputEvent::Close | InputEvent::KeyUp(Key::Escape) => {
                info!("Quit requested");
                self.state = InteractionState::Quit;
            }
            InputEvent::KeyUp(Key::ToggleRun) => self.toggle_run(),
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                x,
                y,
            } => self.begin_drag(x, y),
            InputEvent::PointerMove { x, y } => {
                if self.state == InteractionState::Dragging {
                    self.viewport
                        .move_to(x - self.click_offset.0, y - self.click_offset.1);
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => self.end_drag(),
            InputEvent::PointerDown {
                button: PointerButton::Middle,
                ..
            } => {
                self.viewport.reset_size();
                debug!("Viewport reset to home size {:?}", self.viewport.home_size());
            }
            InputEvent::Scroll(direction) => {
                match direction {
                    ScrollDirection::Up => self.viewport.zoom_in(),
                    ScrollDirection::Down => self.viewport.zoom_out(),
                }
                debug!("Viewport scale {:.3}", self.viewport.scale());
            }
            _ => {}
        }
    }

    fn toggle_run(&mut self) {
        self.state = match self.state {
            InteractionState::Running => InteractionState::Paused,
            InteractionState::Paused => InteractionState::Running,
            other => {
                debug!("Toggle ignored while {:?}", other);
                return;
            }
        };
        info!("Simulation {:?}", self.state);
    }

    fn begin_drag(&mut self, x: i32, y: i32) {
        if self.state == InteractionState::Dragging {
            return;
        }
        let rect = self.viewport.rect();
        if !rect.contains(x, y) {
            return;
        }
        self.click_offset = (x - rect.x, y - rect.y);
        self.resume = self.state;
        self.state = InteractionState::Dragging;
        debug!("Drag started at ({}, {}), offset {:?}", x, y, self.click_offset);
    }

    fn end_drag(&mut self) {
        if self.state == InteractionState::Dragging {
            self.state = self.resume;
            debug!("Drag ended at {:?}", self.viewport.rect());
        }
    }
}
