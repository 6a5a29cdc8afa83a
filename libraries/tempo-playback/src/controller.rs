//! Speed ramp controller
//!
//! Owns the single repeating ramp timer. On every tick it samples
//! progress from the engine and writes back the ramped playback rate.

use crate::{
    engine::PlaybackEngine,
    error::Result,
    ramp::{self, SpeedRamp},
    timer::{RampScheduler, TimerId},
};
use std::time::Duration;
use tracing::{debug, trace};

/// Result of handling a timer tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A new rate was written to the engine
    Applied {
        /// Rate written to the engine
        speed: f64,
    },

    /// Duration unknown or zero; nothing changed
    Skipped,

    /// Tick came from a timer that is no longer active
    Stale,
}

/// Drives the playback rate while a track plays
///
/// Invariant: at most one timer is active. [`start`](Self::start) always
/// cancels the previous timer before creating a new one.
pub struct SpeedRampController<S: RampScheduler> {
    scheduler: S,
    ramp: SpeedRamp,
    period: Duration,
    active: Option<TimerId>,
}

impl<S: RampScheduler> SpeedRampController<S> {
    /// Create a stopped controller
    pub fn new(scheduler: S, ramp: SpeedRamp, period: Duration) -> Self {
        Self {
            scheduler,
            ramp,
            period,
            active: None,
        }
    }

    /// Start (or restart) the ramp timer
    ///
    /// On failure no timer is active.
    pub fn start(&mut self) -> Result<TimerId> {
        self.stop();

        let id = self.scheduler.start(self.period)?;
        self.active = Some(id);
        debug!(timer = id.0, period_ms = self.period.as_millis() as u64, "Ramp timer started");
        Ok(id)
    }

    /// Cancel the ramp timer
    ///
    /// Safe to call repeatedly. Returns true if a timer was running.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(id) => {
                self.scheduler.cancel(id);
                debug!(timer = id.0, "Ramp timer cleared");
                true
            }
            None => false,
        }
    }

    /// Check if the ramp timer is running
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the running timer, if any
    pub fn active_timer(&self) -> Option<TimerId> {
        self.active
    }

    /// Current ramp curve
    pub fn ramp(&self) -> &SpeedRamp {
        &self.ramp
    }

    /// Replace the ramp curve
    ///
    /// Does not touch the timer; callers restart it when playing.
    pub fn set_ramp(&mut self, ramp: SpeedRamp) {
        self.ramp = ramp;
    }

    /// Timer period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Access the scheduler
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Handle a tick from the scheduler
    pub fn tick<E: PlaybackEngine + ?Sized>(&mut self, id: TimerId, engine: &mut E) -> TickOutcome {
        if self.active != Some(id) {
            trace!(timer = id.0, "Ignoring tick from inactive timer");
            return TickOutcome::Stale;
        }

        let Some(progress) = ramp::progress(engine.current_time(), engine.duration()) else {
            trace!("Duration unknown, skipping ramp tick");
            return TickOutcome::Skipped;
        };

        let speed = self.ramp.speed_at(progress);
        engine.set_playback_rate(speed);
        trace!(progress, speed, "Ramp tick");

        TickOutcome::Applied { speed }
    }
}

impl<S: RampScheduler> Drop for SpeedRampController<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
