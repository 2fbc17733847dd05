//! Life simulation state
//!
//! Owns the front/back grid pair together with the run's rules and boundary
//! policy, and keeps simple step statistics for logging.

use std::time::{Duration, Instant};

use log::debug;

use super::{
    grid::{Grid, GridPair},
    neighbors::BoundaryPolicy,
    rules::Rules,
    stepper::step,
};
use crate::error::Result;

pub struct LifeSimulation {
    grids: GridPair,
    rules: Rules,
    policy: BoundaryPolicy,
    generation: u64,
    step_time_total: Duration,
}

impl LifeSimulation {
    /// Create a simulation whose first generation is `initial`
    pub fn new(initial: Grid, rules: Rules, policy: BoundaryPolicy) -> Self {
        Self::from_grids(GridPair::new(initial), rules, policy)
    }

    pub fn from_grids(grids: GridPair, rules: Rules, policy: BoundaryPolicy) -> Self {
        Self {
            grids,
            rules,
            policy,
            generation: 0,
            step_time_total: Duration::ZERO,
        }
    }

    /// Advance one generation and swap the buffers
    ///
    /// On error neither buffer is swapped and the generation counter is left
    /// unchanged, so the current generation stays on display.
    pub fn advance(&mut self) -> Result<()> {
        let started = Instant::now();
        let (front, back) = self.grids.split_mut();
        step(front, back, &self.rules, self.policy)?;
        self.grids.swap();

        self.record_step(started.elapsed());
        Ok(())
    }

    fn record_step(&mut self, elapsed: Duration) {
        self.generation += 1;
        self.step_time_total += elapsed;
        debug!(
            "generation {} computed in {:.2?} ({} alive)",
            self.generation,
            elapsed,
            self.grids.front().alive_count()
        );
    }

    /// The generation currently on display
    #[inline]
    pub fn current(&self) -> &Grid {
        self.grids.front()
    }

    /// Number of generations computed so far
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mean wall-clock time per generation
    pub fn average_step_time(&self) -> Duration {
        if self.generation > 0 {
            self.step_time_total.div_f64(self.generation as f64)
        } else {
            Duration::ZERO
        }
    }

    /// Generations per second implied by [`Self::average_step_time`]
    pub fn frequency(&self) -> f64 {
        let avg = self.average_step_time().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }
}
