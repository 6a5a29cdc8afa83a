//! Interval timers supplied by the page

use crate::error::{PlaybackError, Result};
use crate::timer::{RampScheduler, TimerId};
use js_sys::Function;
use std::collections::HashMap;
use std::time::Duration;
use wasm_bindgen::JsValue;

/// Scheduler backed by two page callbacks
///
/// - `start(timerId, periodMs)` must return an interval handle and call
///   `player.rampTick(timerId)` every period
/// - `clear(handle)` must stop that interval
///
/// Typically `(id, ms) => setInterval(() => player.rampTick(id), ms)` and
/// `clearInterval`.
pub struct JsIntervalScheduler {
    start_fn: Function,
    clear_fn: Function,
    next_id: u64,
    handles: HashMap<TimerId, JsValue>,
}

impl JsIntervalScheduler {
    pub fn new(start_fn: Function, clear_fn: Function) -> Self {
        Self {
            start_fn,
            clear_fn,
            next_id: 0,
            handles: HashMap::new(),
        }
    }
}

impl RampScheduler for JsIntervalScheduler {
    fn start(&mut self, period: Duration) -> Result<TimerId> {
        self.next_id += 1;
        let id = TimerId(self.next_id);

        let result = self.start_fn.call2(
            &JsValue::NULL,
            &JsValue::from_f64(id.0 as f64),
            &JsValue::from_f64(period.as_millis() as f64),
        );

        match result {
            Ok(handle) => {
                self.handles.insert(id, handle);
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("Failed to start ramp interval: {:?}", e);
                Err(PlaybackError::TimerUnavailable(format!("{:?}", e)))
            }
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            if let Err(e) = self.clear_fn.call1(&JsValue::NULL, &handle) {
                tracing::warn!("Failed to clear ramp interval: {:?}", e);
            }
        }
    }
}

impl Drop for JsIntervalScheduler {
    fn drop(&mut self) {
        let ids: Vec<TimerId> = self.handles.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }
}
