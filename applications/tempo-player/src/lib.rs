//! Tempo Player - terminal host
//!
//! Runs a [`tempo_playback::PlaybackSession`] against real audio output:
//! - [`engine::RodioEngine`] decodes and plays tracks through rodio
//! - [`scheduler::TokioRampScheduler`] drives the speed ramp from tokio tasks
//! - [`input`] turns stdin lines into key presses
//! - [`config::PlayerConfig`] layers file, environment and CLI settings

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod scheduler;

pub use config::{CliOverrides, PlayerConfig};
pub use error::{PlayerError, Result};
