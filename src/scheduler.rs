//! Fixed-rate tick driver
//!
//! Converts wall-clock frame time into whole simulation ticks. The simulation
//! itself never sees a clock; hosts feed elapsed time in here, tests usually
//! skip this and call `SimState::step` directly.

use std::time::Duration;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{SimState, StepReport};

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    accumulator: Duration,
    total_ticks: u64,
}

impl Ticker {
    /// A zero interval is bumped to 1 ms
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            total_ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks run by this ticker so far
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Feed one frame's elapsed time; returns how many ticks ran
    pub fn advance(&mut self, state: &mut SimState, elapsed: Duration) -> u32 {
        self.advance_with(state, elapsed, |_| {})
    }

    /// Like [`Ticker::advance`], handing every tick's report to `on_step`
    pub fn advance_with<F>(&mut self, state: &mut SimState, elapsed: Duration, mut on_step: F) -> u32
    where
        F: FnMut(&StepReport),
    {
        // Nothing to catch up on before the first spawn
        if !state.active {
            self.accumulator = Duration::ZERO;
            return 0;
        }

        self.accumulator += elapsed.min(Duration::from_millis(MAX_FRAME_MS));

        let mut substeps = 0;
        while self.accumulator >= self.interval && substeps < MAX_SUBSTEPS {
            let report = state.step();
            on_step(&report);
            self.accumulator -= self.interval;
            substeps += 1;
        }
        self.total_ticks += u64::from(substeps);

        // Whole intervals left after the substep cap are dropped, not owed
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.interval {
            let remainder = self.accumulator.as_nanos() % self.interval.as_nanos();
            let kept = Duration::from_nanos(remainder as u64);
            log::debug!(
                "Ticker fell behind, dropping {:?} of backlog",
                self.accumulator - kept
            );
            self.accumulator = kept;
        }

        substeps
    }
}
