//! Playback session - core orchestration
//!
//! Owns the player state machine (track selection, play/pause, seek,
//! mute) and the speed ramp controller that runs while playing.

use crate::{
    controller::{SpeedRampController, TickOutcome},
    display::{self, NowPlaying},
    engine::{EngineEvent, PlaybackEngine},
    error::Result,
    events::SessionEvent,
    keys::{Key, KeyAction, KeyOutcome},
    ramp::SpeedRamp,
    timer::{RampScheduler, TimerId},
    types::{PlaybackConfig, PlaybackState, Playlist, RampSettings, Track},
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Accelerating playback session
///
/// One instance per player widget. All transitions run to completion on
/// the caller's thread:
/// - Track navigation (wrapping in both directions)
/// - Play/pause with fallback to paused when the engine refuses to play
/// - Seeking by a fixed step, clamped to the track
/// - Mute toggle mirrored from the engine
/// - Speed ramp: one repeating timer, active only while playing
///
/// Dropping the session cancels the ramp timer.
pub struct PlaybackSession<E: PlaybackEngine, S: RampScheduler> {
    // State
    playlist: Playlist,
    track_index: usize,
    state: PlaybackState,
    is_muted: bool,

    // Position (seconds)
    current_time: f64,
    duration: f64,

    // Speed
    settings: RampSettings,
    current_speed: f64,
    seek_step: f64,

    // Collaborators
    engine: E,
    controller: SpeedRampController<S>,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl<E: PlaybackEngine, S: RampScheduler> PlaybackSession<E, S> {
    /// Create a paused session with the first track loaded
    pub fn new(playlist: Playlist, config: PlaybackConfig, engine: E, scheduler: S) -> Result<Self> {
        config.validate()?;
        let ramp = SpeedRamp::new(config.ramp)?;

        let controller = SpeedRampController::new(
            scheduler,
            ramp,
            Duration::from_millis(config.ramp_interval_ms),
        );

        let mut session = Self {
            playlist,
            track_index: 0,
            state: PlaybackState::Paused,
            is_muted: false,
            current_time: 0.0,
            duration: 0.0,
            settings: config.ramp,
            current_speed: config.ramp.start_speed,
            seek_step: config.seek_step_secs,
            engine,
            controller,
            pending_events: Vec::new(),
        };

        session.is_muted = session.engine.is_muted();
        session.load_track(0, false);

        Ok(session)
    }

    // ===== Track Navigation =====

    /// Load the track at `index` (wrapping), keeping the current play state
    pub fn select_track(&mut self, index: isize) {
        let resume = self.state == PlaybackState::Playing;
        let index = self.playlist.wrap(index);
        self.load_track(index, resume);
    }

    /// Skip to the next track and start playing
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let index = self.playlist.wrap(self.track_index as isize + 1);
        self.load_track(index, true);
    }

    /// Go back to the previous track and start playing
    pub fn previous(&mut self) {
        let index = self.playlist.wrap(self.track_index as isize - 1);
        self.load_track(index, true);
    }

    /// Internal: swap the engine source and reset per-track state
    fn load_track(&mut self, index: usize, autoplay: bool) {
        self.controller.stop();

        let track = self.playlist.at(index as isize).clone();
        self.track_index = index;
        self.current_time = 0.0;
        self.duration = 0.0;

        self.engine.set_source(&track.source);
        self.reset_speed();

        info!(index, title = %track.title, "Loaded track");
        self.pending_events.push(SessionEvent::TrackChanged {
            index,
            title: track.title,
        });
        self.emit_position_update();

        if autoplay {
            self.start_playback();
        } else {
            self.set_state(PlaybackState::Paused);
        }
    }

    // ===== Playback Control =====

    /// Pause when playing, play otherwise
    pub fn toggle_play(&mut self) {
        if !self.engine.is_ready() {
            debug!("Engine not ready, ignoring play toggle");
            return;
        }

        match self.state {
            PlaybackState::Playing => self.pause_playback(),
            PlaybackState::Paused => self.start_playback(),
        }
    }

    /// Internal: ask the engine to play; only a confirmed play counts
    fn start_playback(&mut self) {
        if let Err(e) = self.engine.play() {
            warn!("Play request failed: {}", e);
            self.reject_playback(e.to_string());
            return;
        }

        self.set_state(PlaybackState::Playing);
        self.start_ramp();
    }

    /// Internal: (re)start the ramp timer; playing without one is not allowed
    fn start_ramp(&mut self) {
        if let Err(e) = self.controller.start() {
            warn!("Ramp timer failed to start: {}", e);
            self.engine.pause();
            self.reject_playback(e.to_string());
        }
    }

    /// Internal: pause the engine and stop ramping
    fn pause_playback(&mut self) {
        self.engine.pause();
        self.controller.stop();
        self.set_state(PlaybackState::Paused);
        self.reset_speed();
    }

    /// Internal: state, timer and speed after playback stopped without a pause command
    fn fall_back_to_paused(&mut self) {
        self.controller.stop();
        self.set_state(PlaybackState::Paused);
        self.reset_speed();
    }

    /// Play request failed after the fact (e.g. rejected browser play promise)
    pub fn handle_play_rejected(&mut self, reason: &str) {
        warn!("Engine rejected playback: {}", reason);
        self.reject_playback(reason.to_string());
    }

    fn reject_playback(&mut self, message: String) {
        self.fall_back_to_paused();
        self.pending_events.push(SessionEvent::PlayRejected { message });
    }

    // ===== Mute =====

    /// Flip the engine's mute flag and mirror the result
    pub fn toggle_mute(&mut self) {
        let target = !self.engine.is_muted();
        self.engine.set_muted(target);
        self.is_muted = self.engine.is_muted();

        debug!(muted = self.is_muted, "Mute toggled");
        self.pending_events.push(SessionEvent::MuteChanged {
            muted: self.is_muted,
        });
    }

    // ===== Seek =====

    /// Jump back by the seek step, stopping at the start
    pub fn seek_backward(&mut self) {
        let target = (self.current_time - self.seek_step).max(0.0);
        self.seek_to(target);
    }

    /// Jump forward by the seek step, stopping at the end
    pub fn seek_forward(&mut self) {
        let target = (self.current_time + self.seek_step).min(self.duration);
        self.seek_to(target);
    }

    /// Internal: write the target and mirror it until the engine reports back
    fn seek_to(&mut self, target: f64) {
        let target = target.max(0.0);
        self.engine.set_current_time(target);
        self.current_time = target;

        debug!(position = target, "Seek");
        self.emit_position_update();
    }

    // ===== Engine Notifications =====

    /// Apply a notification pushed by the engine
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::MetadataLoaded => {
                self.duration = self
                    .engine
                    .duration()
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .unwrap_or(0.0);
                self.reset_speed();

                debug!(duration = self.duration, "Metadata loaded");
                self.emit_position_update();
            }
            EngineEvent::TimeUpdate => {
                self.current_time = self.clamp_position(self.engine.current_time());
                self.emit_position_update();
            }
            EngineEvent::Ended => {
                info!(index = self.track_index, "Track ended");
                self.fall_back_to_paused();
            }
        }
    }

    /// Internal: keep positions inside [0, duration] once the duration is known
    fn clamp_position(&self, seconds: f64) -> f64 {
        if !seconds.is_finite() {
            return 0.0;
        }

        let seconds = seconds.max(0.0);
        if self.duration > 0.0 {
            seconds.min(self.duration)
        } else {
            seconds
        }
    }

    // ===== Speed Ramp =====

    /// Handle a tick from the ramp scheduler
    pub fn on_ramp_tick(&mut self, timer: TimerId) -> TickOutcome {
        let outcome = self.controller.tick(timer, &mut self.engine);

        if let TickOutcome::Applied { speed } = outcome {
            self.update_speed(speed);
        }

        outcome
    }

    /// Replace all ramp parameters
    ///
    /// Restarts the ramp timer when playing so the new curve applies
    /// from the next tick.
    pub fn set_ramp_settings(&mut self, settings: RampSettings) -> Result<()> {
        let ramp = SpeedRamp::new(settings)?;
        self.settings = settings;
        self.controller.set_ramp(ramp);

        if self.state == PlaybackState::Playing {
            let speed = ramp.clamp(self.current_speed);
            self.engine.set_playback_rate(speed);
            self.update_speed(speed);
            self.start_ramp();
        } else {
            self.reset_speed();
        }

        debug!(
            start = settings.start_speed,
            max = settings.max_speed,
            exponent = settings.acceleration_exponent,
            "Ramp settings changed"
        );
        Ok(())
    }

    /// Change the speed every track starts at
    pub fn set_start_speed(&mut self, start_speed: f64) -> Result<()> {
        self.set_ramp_settings(RampSettings {
            start_speed,
            ..self.settings
        })
    }

    /// Change the speed reached at the end of a track
    pub fn set_max_speed(&mut self, max_speed: f64) -> Result<()> {
        self.set_ramp_settings(RampSettings {
            max_speed,
            ..self.settings
        })
    }

    /// Change the ramp curve shape
    pub fn set_acceleration_exponent(&mut self, acceleration_exponent: f64) -> Result<()> {
        self.set_ramp_settings(RampSettings {
            acceleration_exponent,
            ..self.settings
        })
    }

    /// Internal: put engine rate and mirrored speed back to the start speed
    fn reset_speed(&mut self) {
        let start = self.settings.start_speed;
        self.engine.set_playback_rate(start);
        self.update_speed(start);
    }

    fn update_speed(&mut self, speed: f64) {
        if speed != self.current_speed {
            self.current_speed = speed;
            self.pending_events.push(SessionEvent::SpeedChanged { speed });
        }
    }

    // ===== Keyboard =====

    /// Dispatch a key press
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key.action() {
            KeyAction::TogglePlay => self.toggle_play(),
            KeyAction::ToggleMute => self.toggle_mute(),
            KeyAction::Next => self.next(),
            KeyAction::Previous => self.previous(),
            KeyAction::SeekForward => self.seek_forward(),
            KeyAction::SeekBackward => self.seek_backward(),
        }

        KeyOutcome::for_key(key)
    }

    /// Dispatch a key by name; unbound keys are ignored
    pub fn handle_key_name(&mut self, name: &str) -> KeyOutcome {
        match Key::from_name(name) {
            Some(key) => self.handle_key(key),
            None => KeyOutcome::ignored(),
        }
    }

    // ===== Lifecycle =====

    /// Tear down: stop the engine and clear the ramp timer
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.state == PlaybackState::Playing {
            self.engine.pause();
        }
        self.fall_back_to_paused();
        debug!("Session shut down");
    }

    // ===== State Queries =====

    /// Derived view of the current state
    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying {
            title: self.current_track().title.clone(),
            track_number: self.track_index + 1,
            track_count: self.playlist.len(),
            elapsed: display::format_time(self.current_time),
            total: display::format_time(self.duration),
            progress_percent: display::progress_percent(self.current_time, self.duration),
            speed: display::format_speed(self.current_speed),
            is_playing: self.is_playing(),
            is_muted: self.is_muted,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn track_index(&self) -> usize {
        self.track_index
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.at(self.track_index as isize)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// Position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration in seconds (0 until metadata loads)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Playback rate last written to the engine
    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn ramp_settings(&self) -> RampSettings {
        self.settings
    }

    /// Id of the running ramp timer, if any
    pub fn ramp_timer(&self) -> Option<TimerId> {
        self.controller.active_timer()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access for hosts that poll it
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &S {
        self.controller.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.controller.scheduler_mut()
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Event Emission =====

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(?state, "Playback state changed");
            self.state = state;
            self.pending_events.push(SessionEvent::StateChanged { state });
        }
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(SessionEvent::PositionUpdate {
            current_time: self.current_time,
            duration: self.duration,
        });
    }
}
