//! Derived display values
//!
//! Nothing here is stored in the session; every value is computed from
//! its current state on demand.

use serde::Serialize;
use std::fmt;

/// Format seconds as `m:ss`
///
/// NaN, infinite and negative inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, remaining)
}

/// Elapsed share of the track as a percentage (0 while duration is unknown)
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 && current_time.is_finite() && duration.is_finite() {
        current_time / duration * 100.0
    } else {
        0.0
    }
}

/// Format a playback rate as `1.25x`
pub fn format_speed(speed: f64) -> String {
    format!("{:.2}x", speed)
}

/// Snapshot of everything a player view renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub track_number: usize,
    pub track_count: usize,
    pub elapsed: String,
    pub total: String,
    pub progress_percent: f64,
    pub speed: String,
    pub is_playing: bool,
    pub is_muted: bool,
}

impl NowPlaying {
    /// `Track 1 of 3`
    pub fn position_label(&self) -> String {
        format!("Track {} of {}", self.track_number, self.track_count)
    }

    /// Label for the play/pause control
    pub fn play_button_label(&self) -> &'static str {
        if self.is_playing {
            "Pause"
        } else {
            "Play"
        }
    }

    /// Label for the mute control
    pub fn mute_button_label(&self) -> &'static str {
        if self.is_muted {
            "Unmute"
        } else {
            "Mute"
        }
    }
}

impl fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_playing { ">" } else { "||" };
        let mute = if self.is_muted { " [muted]" } else { "" };

        write!(
            f,
            "{} {} ({}) {} / {} [{:>3.0}%] {}{}",
            state,
            self.title,
            self.position_label(),
            self.elapsed,
            self.total,
            self.progress_percent,
            self.speed,
            mute
        )
    }
}
