//! One run of the viewer: simulation, interaction state and display buffer
//!
//! Nothing here knows about windows or GPUs. The app feeds [`InputEvent`]s
//! in, calls [`Session::tick`] once per frame and hands a [`RenderAdapter`]
//! to [`Session::render`].

use log::{info, warn};

use crate::{
    config::RunConfig,
    error::LifeError,
    gfx::{
        cell_image::{CellImage, Palette},
        traits::RenderAdapter,
        viewport::{InputEvent, InteractionState, Viewport, ViewportController},
    },
    simulation::{Grid, LifeSimulation},
};

/// What a call to [`Session::tick`] did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new generation is on display
    Stepped,
    /// Paused, dragging or frozen
    NotRunning,
    /// The step failed; the session is now frozen on the last generation
    Failed(LifeError),
    Finished,
}

pub struct Session {
    simulation: LifeSimulation,
    controller: ViewportController,
    image: CellImage,
    palette: Palette,
    /// `image` no longer matches the current generation
    dirty: bool,
}

impl Session {
    /// Session whose viewport starts at the origin sized to the grid
    pub fn new(simulation: LifeSimulation, controller: ViewportController, palette: Palette) -> Self {
        let (width, height) = simulation.current().dimensions();
        Self {
            simulation,
            controller,
            image: CellImage::new(width, height),
            palette,
            dirty: true,
        }
    }

    pub fn from_config(initial: Grid, config: &RunConfig) -> Self {
        let viewport = Viewport::new(
            initial.width() as u32,
            initial.height() as u32,
            config.zoom,
        );
        let simulation = LifeSimulation::new(initial, config.rules, config.policy);
        let controller = ViewportController::new(viewport, config.start_running);
        Self::new(simulation, controller, config.palette)
    }

    pub fn handle(&mut self, event: &InputEvent) {
        self.controller.handle(event);
    }

    /// Advance one generation if the controller is running
    pub fn tick(&mut self) -> TickOutcome {
        if self.controller.is_quit() {
            return TickOutcome::Finished;
        }
        if !self.controller.should_step() {
            return TickOutcome::NotRunning;
        }

        match self.simulation.advance() {
            Ok(()) => {
                self.dirty = true;
                TickOutcome::Stepped
            }
            Err(e) => {
                warn!(
                    "Step to generation {} failed: {}",
                    self.simulation.generation() + 1,
                    e
                );
                self.controller.freeze();
                TickOutcome::Failed(e)
            }
        }
    }

    /// Present the current generation through `adapter`
    pub fn render(&mut self, adapter: &mut impl RenderAdapter) {
        if self.dirty {
            self.image.paint(self.simulation.current(), &self.palette);
            self.dirty = false;
        }
        adapter.present(self.image.pixels(), self.image.pitch(), self.controller.rect());
    }

    pub fn is_finished(&self) -> bool {
        self.controller.is_quit()
    }

    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn simulation(&self) -> &LifeSimulation {
        &self.simulation
    }

    /// Log the end-of-run summary
    pub fn log_summary(&self) {
        info!(
            "Stopped after {} generations ({} alive, avg step {:.2?}, {:.1} gen/s)",
            self.simulation.generation(),
            self.simulation.current().alive_count(),
            self.simulation.average_step_time(),
            self.simulation.frequency()
        );
    }
}
