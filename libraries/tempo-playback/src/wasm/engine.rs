//! `<audio>` element engine

use crate::{engine::PlaybackEngine, error::PlaybackError, error::Result};
use js_sys::Promise;
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

/// Playback engine over an `HtmlAudioElement`
///
/// `play()` returns a promise in the browser. A synchronous failure is
/// reported immediately; the promise itself is kept so the page can report
/// a later rejection through `WasmTempoPlayer::play_rejected`.
pub struct HtmlAudioEngine {
    element: HtmlAudioElement,
    pending_play: Option<Promise>,
}

impl HtmlAudioEngine {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self {
            element,
            pending_play: None,
        }
    }

    /// Take the promise returned by the last play request
    pub fn take_play_promise(&mut self) -> Option<Promise> {
        self.pending_play.take()
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

impl PlaybackEngine for HtmlAudioEngine {
    fn set_source(&mut self, uri: &str) {
        self.element.set_src(uri);
    }

    fn play(&mut self) -> Result<()> {
        if self.element.src().is_empty() {
            return Err(PlaybackError::PlayRejected("no source loaded".to_string()));
        }

        match self.element.play() {
            Ok(promise) => {
                self.pending_play = Some(promise);
                Ok(())
            }
            Err(e) => Err(PlaybackError::PlayRejected(describe(&e))),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            tracing::warn!("Audio element refused to pause: {}", describe(&e));
        }
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        // NaN until metadata loads, +Infinity for live streams
        let duration = self.element.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn playback_rate(&self) -> f64 {
        self.element.playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
    }

    fn is_muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }
}
