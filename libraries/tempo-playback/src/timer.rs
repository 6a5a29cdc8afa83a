//! Repeating timer abstraction for the speed ramp
//!
//! The session never sleeps or spawns anything itself. Hosts provide a
//! [`RampScheduler`] that fires ticks back into
//! [`PlaybackSession::on_ramp_tick`](crate::PlaybackSession::on_ramp_tick).

use crate::error::Result;
use std::time::Duration;

/// Identifier of a started repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Platform-provided repeating timer
///
/// Implementors must make `cancel` idempotent: cancelling an unknown or
/// already cancelled timer is a no-op.
pub trait RampScheduler {
    /// Start a timer that fires every `period` until cancelled
    ///
    /// Fails with [`PlaybackError::TimerUnavailable`](crate::PlaybackError::TimerUnavailable)
    /// when the host cannot create the timer.
    fn start(&mut self, period: Duration) -> Result<TimerId>;

    /// Stop a timer; further ticks carrying this id must not be delivered
    fn cancel(&mut self, id: TimerId);
}

impl<S: RampScheduler + ?Sized> RampScheduler for Box<S> {
    fn start(&mut self, period: Duration) -> Result<TimerId> {
        (**self).start(period)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id);
    }
}

#[derive(Debug, Clone)]
struct ManualTimer {
    id: TimerId,
    period: Duration,
    elapsed: Duration,
}

/// Host-driven scheduler
///
/// Time only moves when the host calls [`advance`](Self::advance), which
/// makes it suitable for game loops, render loops and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: u64,
    timers: Vec<ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers currently running
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Ids of running timers, in start order
    pub fn active_ids(&self) -> Vec<TimerId> {
        self.timers.iter().map(|timer| timer.id).collect()
    }

    /// Move time forward and return every tick that fired, in order
    ///
    /// A timer whose period fits several times into `elapsed` fires
    /// several times.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();

        for timer in &mut self.timers {
            timer.elapsed += elapsed;
            while timer.elapsed >= timer.period {
                timer.elapsed -= timer.period;
                fired.push(timer.id);
            }
        }

        fired
    }
}

impl RampScheduler for ManualScheduler {
    fn start(&mut self, period: Duration) -> Result<TimerId> {
        self.next_id += 1;
        let id = TimerId(self.next_id);

        self.timers.push(ManualTimer {
            id,
            // A zero period would never stop firing
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
        });

        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_assigns_unique_ids() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.start(Duration::from_millis(500)).unwrap();
        let b = scheduler.start(Duration::from_millis(500)).unwrap();

        assert_ne!(a, b);
        assert_eq!(scheduler.active_count(), 2);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.start(Duration::from_millis(500)).unwrap();

        scheduler.cancel(id);
        scheduler.cancel(id);
        scheduler.cancel(TimerId(999));

        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn advance_fires_per_elapsed_period() {
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.start(Duration::from_millis(500)).unwrap();

        assert!(scheduler.advance(Duration::from_millis(499)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![id]);
        assert_eq!(
            scheduler.advance(Duration::from_millis(1000)),
            vec![id, id]
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.start(Duration::from_millis(500)).unwrap();
        scheduler.cancel(id);

        assert!(scheduler.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn boxed_scheduler_delegates() {
        let mut scheduler: Box<ManualScheduler> = Box::new(ManualScheduler::new());
        let id = RampScheduler::start(&mut scheduler, Duration::from_millis(10)).unwrap();
        assert_eq!(scheduler.active_ids(), vec![id]);
        RampScheduler::cancel(&mut scheduler, id);
        assert_eq!(scheduler.active_count(), 0);
    }
}
