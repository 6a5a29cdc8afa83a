//! Core types for playback sessions

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};

/// A playable entry in the playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title
    pub title: String,

    /// URI handed to the playback engine (file path or URL)
    pub source: String,
}

impl Track {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
        }
    }
}

/// Fixed, ordered, non-empty list of tracks
///
/// Index arithmetic wraps in both directions, so any integer
/// maps onto a valid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist, rejecting an empty track list
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Number of tracks (always >= 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Map any index (negative included) onto `0..len`
    pub fn wrap(&self, index: isize) -> usize {
        index.rem_euclid(self.tracks.len() as isize) as usize
    }

    /// Get the track at a wrapped index
    pub fn at(&self, index: isize) -> &Track {
        &self.tracks[self.wrap(index)]
    }

    /// Get track at a valid index
    pub fn get(&self, index: usize) -> Result<&Track> {
        self.tracks
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))
    }

    /// Iterate tracks in order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

impl TryFrom<Vec<Track>> for Playlist {
    type Error = PlaybackError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Idle or paused mid-track
    Paused,

    /// Currently playing; the speed ramp is active
    Playing,
}

/// Parameters of the speed ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampSettings {
    /// Playback rate at the start of every track (default: 1.0)
    #[serde(default = "default_start_speed")]
    pub start_speed: f64,

    /// Playback rate reached at the end of a track (default: 2.0)
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,

    /// Curve shape; below 1 ramps late, above 1 ramps early (default: 0.5)
    #[serde(default = "default_acceleration_exponent")]
    pub acceleration_exponent: f64,
}

fn default_start_speed() -> f64 {
    1.0
}

fn default_max_speed() -> f64 {
    2.0
}

fn default_acceleration_exponent() -> f64 {
    0.5
}

impl RampSettings {
    /// Check the invariants the ramp curve relies on
    pub fn validate(&self) -> Result<()> {
        let Self {
            start_speed,
            max_speed,
            acceleration_exponent,
        } = *self;

        if !start_speed.is_finite() || !max_speed.is_finite() || !acceleration_exponent.is_finite()
        {
            return Err(PlaybackError::InvalidRampSettings(format!(
                "values must be finite (start {start_speed}, max {max_speed}, exponent {acceleration_exponent})"
            )));
        }

        if start_speed <= 0.0 {
            return Err(PlaybackError::InvalidRampSettings(format!(
                "start speed must be positive, got {start_speed}"
            )));
        }

        if max_speed < start_speed {
            return Err(PlaybackError::InvalidRampSettings(format!(
                "max speed {max_speed} is below start speed {start_speed}"
            )));
        }

        if acceleration_exponent <= 0.0 {
            return Err(PlaybackError::InvalidRampSettings(format!(
                "acceleration exponent must be positive, got {acceleration_exponent}"
            )));
        }

        Ok(())
    }
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            start_speed: default_start_speed(),
            max_speed: default_max_speed(),
            acceleration_exponent: default_acceleration_exponent(),
        }
    }
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Speed ramp parameters
    #[serde(default)]
    pub ramp: RampSettings,

    /// Ramp timer period in milliseconds (default: 500)
    #[serde(default = "default_ramp_interval_ms")]
    pub ramp_interval_ms: u64,

    /// Seek step in seconds for forward/backward seeks (default: 10)
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: f64,
}

fn default_ramp_interval_ms() -> u64 {
    500
}

fn default_seek_step_secs() -> f64 {
    10.0
}

impl PlaybackConfig {
    /// Validate ramp settings and timing parameters
    pub fn validate(&self) -> Result<()> {
        self.ramp.validate()?;

        if self.ramp_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "ramp interval must be at least 1 ms".to_string(),
            ));
        }

        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "seek step must be a positive number of seconds, got {}",
                self.seek_step_secs
            )));
        }

        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ramp: RampSettings::default(),
            ramp_interval_ms: default_ramp_interval_ms(),
            seek_step_secs: default_seek_step_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tracks() -> Playlist {
        Playlist::new(vec![
            Track::new("Sunny Morning", "audio/sunny-morning.mp3"),
            Track::new("Lo-Fi Breeze", "audio/lofi-breeze.mp3"),
            Track::new("Chill Drive", "audio/chill-drive.mp3"),
        ])
        .unwrap()
    }

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.ramp.start_speed, 1.0);
        assert_eq!(config.ramp.max_speed, 2.0);
        assert_eq!(config.ramp.acceleration_exponent, 0.5);
        assert_eq!(config.ramp_interval_ms, 500);
        assert_eq!(config.seek_step_secs, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_playlist_rejected() {
        assert_eq!(Playlist::new(vec![]), Err(PlaybackError::EmptyPlaylist));
    }

    #[test]
    fn wrap_handles_both_directions() {
        let playlist = three_tracks();
        assert_eq!(playlist.wrap(0), 0);
        assert_eq!(playlist.wrap(3), 0);
        assert_eq!(playlist.wrap(4), 1);
        assert_eq!(playlist.wrap(-1), 2);
        assert_eq!(playlist.wrap(-4), 2);
        assert_eq!(playlist.at(-1).title, "Chill Drive");
    }

    #[test]
    fn get_out_of_bounds() {
        let playlist = three_tracks();
        assert_eq!(playlist.get(1).unwrap().title, "Lo-Fi Breeze");
        assert_eq!(playlist.get(3), Err(PlaybackError::IndexOutOfBounds(3)));
    }

    #[test]
    fn zero_exponent_rejected() {
        let settings = RampSettings {
            acceleration_exponent: 0.0,
            ..RampSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(PlaybackError::InvalidRampSettings(_))
        ));
    }

    #[test]
    fn inverted_range_rejected() {
        let settings = RampSettings {
            start_speed: 2.0,
            max_speed: 1.5,
            ..RampSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn flat_range_allowed() {
        let settings = RampSettings {
            start_speed: 1.5,
            max_speed: 1.5,
            ..RampSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn non_finite_rejected() {
        let settings = RampSettings {
            max_speed: f64::INFINITY,
            ..RampSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = RampSettings {
            start_speed: f64::NAN,
            ..RampSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = PlaybackConfig {
            ramp_interval_ms: 0,
            ..PlaybackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaybackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_settings_use_defaults() {
        let settings: RampSettings = serde_json::from_str(r#"{ "max_speed": 3.0 }"#).unwrap();
        assert_eq!(settings.start_speed, 1.0);
        assert_eq!(settings.max_speed, 3.0);
        assert_eq!(settings.acceleration_exponent, 0.5);
    }
}
