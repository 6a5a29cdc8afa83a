//! Tempo Player - Accelerating Playback
//!
//! Platform-agnostic playback session that speeds tracks up as they play.
//!
//! This crate provides:
//! - Fixed playlist with wrapping next/previous navigation
//! - Play/pause state machine that only trusts confirmed play requests
//! - Seek forward/backward by a fixed step, clamped to the track
//! - Mute toggle mirrored from the engine
//! - Speed ramp: a power curve from start speed to max speed, re-sampled
//!   on a repeating timer while playing
//! - Keyboard surface and display formatting for player views
//!
//! # Architecture
//!
//! `tempo-playback` owns no audio device and no clock:
//! - Audio playback is provided via the [`PlaybackEngine`] trait
//! - The repeating ramp timer is provided via the [`RampScheduler`] trait
//! - Engine notifications are pushed in as [`EngineEvent`] values
//!
//! The same session runs in a terminal (rodio engine, tokio timer), in the
//! browser (`wasm` feature: `<audio>` element, `setInterval`) and in tests
//! (in-memory engine, [`ManualScheduler`]).
//!
//! # Example: Speed Curve
//!
//! ```rust
//! use tempo_playback::{RampSettings, SpeedRamp};
//!
//! let ramp = SpeedRamp::new(RampSettings::default()).unwrap();
//!
//! assert_eq!(ramp.speed_at(0.0), 1.0);
//! assert!((ramp.speed_at(0.25) - 1.0625).abs() < 1e-12);
//! assert_eq!(ramp.speed_at(1.0), 2.0);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use tempo_playback::{
//!     EngineEvent, ManualScheduler, PlaybackConfig, PlaybackEngine, PlaybackSession, Playlist,
//!     Result, Track,
//! };
//! use std::time::Duration;
//!
//! // Implement PlaybackEngine for your platform
//! struct MyEngine {
//!     // ... platform-specific player
//! }
//!
//! impl PlaybackEngine for MyEngine {
//!     fn set_source(&mut self, uri: &str) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, seconds: f64) {}
//!     fn duration(&self) -> Option<f64> { Some(180.0) }
//!     fn playback_rate(&self) -> f64 { 1.0 }
//!     fn set_playback_rate(&mut self, rate: f64) {}
//!     fn is_muted(&self) -> bool { false }
//!     fn set_muted(&mut self, muted: bool) {}
//! }
//!
//! let playlist = Playlist::new(vec![Track::new("Sunny Morning", "audio/sunny-morning.mp3")])?;
//! let mut session = PlaybackSession::new(
//!     playlist,
//!     PlaybackConfig::default(),
//!     MyEngine {},
//!     ManualScheduler::new(),
//! )?;
//!
//! session.handle_engine_event(EngineEvent::MetadataLoaded);
//! session.toggle_play();
//!
//! // Drive the ramp from your own loop
//! for timer in session.scheduler_mut().advance(Duration::from_millis(500)) {
//!     session.on_ramp_tick(timer);
//! }
//! println!("{}", session.now_playing());
//! # Ok::<(), tempo_playback::PlaybackError>(())
//! ```

mod controller;
pub mod display;
mod engine;
mod error;
pub mod events;
pub mod keys;
mod ramp;
mod session;
mod timer;
pub mod types;
pub mod wasm;

// Public exports
pub use controller::{SpeedRampController, TickOutcome};
pub use display::NowPlaying;
pub use engine::{EngineEvent, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use keys::{Key, KeyAction, KeyOutcome};
pub use ramp::{progress, SpeedRamp};
pub use session::PlaybackSession;
pub use timer::{ManualScheduler, RampScheduler, TimerId};
pub use types::{PlaybackConfig, PlaybackState, Playlist, RampSettings, Track};
