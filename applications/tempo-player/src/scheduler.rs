//! tokio-driven ramp timer
//!
//! Each started timer is a spawned task ticking a `tokio::time::interval`
//! and sending its [`TimerId`] to the event loop. Cancelling aborts the
//! task; ticks already queued are rejected by the session as stale.

use std::collections::HashMap;
use std::time::Duration;
use tempo_playback::{PlaybackError, RampScheduler, Result, TimerId};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

pub struct TokioRampScheduler {
    ticks: mpsc::UnboundedSender<TimerId>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioRampScheduler {
    /// Create a scheduler delivering ticks into `ticks`
    ///
    /// Timers can only be started from within a tokio runtime.
    pub fn new(ticks: mpsc::UnboundedSender<TimerId>) -> Self {
        Self {
            ticks,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Timers currently running
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl RampScheduler for TokioRampScheduler {
    fn start(&mut self, period: Duration) -> Result<TimerId> {
        let runtime =
            Handle::try_current().map_err(|e| PlaybackError::TimerUnavailable(e.to_string()))?;

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let ticks = self.ticks.clone();
        let period = period.max(Duration::from_millis(1));

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                trace!(timer = id.0, "Ramp tick");
                if ticks.send(id).is_err() {
                    break;
                }
            }
        });

        self.tasks.insert(id, task);
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioRampScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
