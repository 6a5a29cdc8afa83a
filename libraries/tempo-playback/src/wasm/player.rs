//! WASM-compatible player wrapper

use super::{engine::HtmlAudioEngine, scheduler::JsIntervalScheduler};
use crate::{
    engine::EngineEvent, timer::TimerId, PlaybackConfig, PlaybackError, PlaybackSession, Playlist,
    Track,
};
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Accelerating player bound to an `<audio>` element
///
/// The page wires the element's `loadedmetadata`, `timeupdate` and `ended`
/// events plus `window` `keydown` to the matching methods, and calls
/// `destroy()` when the widget unmounts.
#[wasm_bindgen]
pub struct WasmTempoPlayer {
    inner: PlaybackSession<HtmlAudioEngine, JsIntervalScheduler>,

    // Event callback, receives an array of session events
    on_change: Option<Function>,
}

#[wasm_bindgen]
impl WasmTempoPlayer {
    /// Create a player
    ///
    /// `tracks` is an array of `{ title, source }`; `config` may be
    /// `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        audio: HtmlAudioElement,
        tracks: JsValue,
        config: JsValue,
        start_timer: Function,
        clear_timer: Function,
    ) -> Result<WasmTempoPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;
        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let playlist = Playlist::new(tracks).map_err(to_js)?;
        let inner = PlaybackSession::new(
            playlist,
            config,
            HtmlAudioEngine::new(audio),
            JsIntervalScheduler::new(start_timer, clear_timer),
        )
        .map_err(to_js)?;

        Ok(Self {
            inner,
            on_change: None,
        })
    }

    // ===== Playback Control =====

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush_events();
    }

    pub fn next(&mut self) {
        self.inner.next();
        self.flush_events();
    }

    pub fn previous(&mut self) {
        self.inner.previous();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&mut self, index: i32) {
        self.inner.select_track(index as isize);
        self.flush_events();
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = seekForward)]
    pub fn seek_forward(&mut self) {
        self.inner.seek_forward();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = seekBackward)]
    pub fn seek_backward(&mut self) {
        self.inner.seek_backward();
        self.flush_events();
    }

    /// Promise of the last play request, for `.catch(e => player.playRejected(...))`
    #[wasm_bindgen(js_name = takePlayPromise)]
    pub fn take_play_promise(&mut self) -> Option<Promise> {
        self.inner.engine_mut().take_play_promise()
    }

    /// Report a rejected play promise
    #[wasm_bindgen(js_name = playRejected)]
    pub fn play_rejected(&mut self, reason: String) {
        self.inner.handle_play_rejected(&reason);
        self.flush_events();
    }

    // ===== Audio Element Events =====

    #[wasm_bindgen(js_name = handleLoadedMetadata)]
    pub fn handle_loaded_metadata(&mut self) {
        self.inner.handle_engine_event(EngineEvent::MetadataLoaded);
        self.flush_events();
    }

    #[wasm_bindgen(js_name = handleTimeUpdate)]
    pub fn handle_time_update(&mut self) {
        self.inner.handle_engine_event(EngineEvent::TimeUpdate);
        self.flush_events();
    }

    #[wasm_bindgen(js_name = handleEnded)]
    pub fn handle_ended(&mut self) {
        self.inner.handle_engine_event(EngineEvent::Ended);
        self.flush_events();
    }

    /// Interval callback registered through `start_timer`
    #[wasm_bindgen(js_name = rampTick)]
    pub fn ramp_tick(&mut self, timer_id: f64) {
        self.inner.on_ramp_tick(TimerId(timer_id as u64));
        self.flush_events();
    }

    /// Handle `KeyboardEvent.key`; returns true when the page should call
    /// `preventDefault()`
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        let outcome = self.inner.handle_key_name(key);
        self.flush_events();
        outcome.prevent_default
    }

    // ===== Ramp Settings =====

    #[wasm_bindgen(js_name = setStartSpeed)]
    pub fn set_start_speed(&mut self, speed: f64) -> Result<(), JsValue> {
        let result = self.inner.set_start_speed(speed).map_err(to_js);
        self.flush_events();
        result
    }

    #[wasm_bindgen(js_name = setMaxSpeed)]
    pub fn set_max_speed(&mut self, speed: f64) -> Result<(), JsValue> {
        let result = self.inner.set_max_speed(speed).map_err(to_js);
        self.flush_events();
        result
    }

    #[wasm_bindgen(js_name = setAcceleration)]
    pub fn set_acceleration(&mut self, exponent: f64) -> Result<(), JsValue> {
        let result = self.inner.set_acceleration_exponent(exponent).map_err(to_js);
        self.flush_events();
        result
    }

    // ===== State Queries =====

    /// Display snapshot (`NowPlaying`) as a plain object
    #[wasm_bindgen(js_name = nowPlaying)]
    pub fn now_playing(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.now_playing()).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    #[wasm_bindgen(js_name = currentSpeed)]
    pub fn current_speed(&self) -> f64 {
        self.inner.current_speed()
    }

    #[wasm_bindgen(js_name = trackIndex)]
    pub fn track_index(&self) -> usize {
        self.inner.track_index()
    }

    // ===== Event Listeners =====

    /// Register the change callback; called with an array of events
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: Function) {
        self.on_change = Some(callback);
    }

    /// Tear down: pause, clear the ramp interval, drop the callback
    pub fn destroy(&mut self) {
        self.inner.shutdown();
        self.flush_events();
        self.on_change = None;
    }

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        if events.is_empty() {
            return;
        }

        if let Some(ref cb) = self.on_change {
            if let Ok(js_events) = serde_wasm_bindgen::to_value(&events) {
                cb.call1(&JsValue::NULL, &js_events).ok();
            }
        }
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
