//! Platform-agnostic playback engine trait
//!
//! Abstracts the host's media primitive (browser `<audio>` element,
//! rodio sink, ...) so the session can drive any of them.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Platform-agnostic playback engine
///
/// Only [`play`](Self::play) is fallible. Engines swallow and log their own
/// errors for every other command.
pub trait PlaybackEngine {
    /// Load a new source; playback position returns to the start
    fn set_source(&mut self, uri: &str);

    /// Request playback
    ///
    /// # Returns
    /// * `Ok(())` - Engine is (or will be) playing
    /// * `Err(_)` - Request refused (autoplay policy, missing source, decode failure)
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Track duration in seconds, `None` until metadata is known
    fn duration(&self) -> Option<f64>;

    /// Current playback rate (1.0 = normal speed)
    fn playback_rate(&self) -> f64;

    /// Change the playback rate
    fn set_playback_rate(&mut self, rate: f64);

    /// Check if output is muted
    fn is_muted(&self) -> bool;

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool);

    /// Whether the engine can accept commands
    ///
    /// Defaults to `true`; engines with asynchronous setup override it.
    fn is_ready(&self) -> bool {
        true
    }
}

impl<E: PlaybackEngine + ?Sized> PlaybackEngine for Box<E> {
    fn set_source(&mut self, uri: &str) {
        (**self).set_source(uri);
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }

    fn playback_rate(&self) -> f64 {
        (**self).playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        (**self).set_playback_rate(rate);
    }

    fn is_muted(&self) -> bool {
        (**self).is_muted()
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted);
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Notifications an engine pushes into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Duration of the current source became known
    MetadataLoaded,

    /// Playback position moved
    TimeUpdate,

    /// Current source played to the end
    Ended,
}

/// In-memory engine for tests
///
/// Records every command; time only moves when the test sets it.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct DummyEngine {
    pub source: Option<String>,
    pub playing: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub rate: f64,
    pub muted: bool,
    pub reject_play: bool,
    pub play_calls: usize,
    pub rate_history: Vec<f64>,
}

#[cfg(test)]
impl DummyEngine {
    pub fn new() -> Self {
        Self {
            rate: 1.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl PlaybackEngine for DummyEngine {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.current_time = 0.0;
        self.duration = None;
        self.playing = false;
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.reject_play || self.source.is_none() {
            self.playing = false;
            return Err(crate::error::PlaybackError::PlayRejected(
                "blocked by test".to_string(),
            ));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.rate_history.push(rate);
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
