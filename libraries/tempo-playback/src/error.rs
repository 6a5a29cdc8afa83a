//! Error types for playback sessions

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Playlist has no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Ramp settings violate their invariants
    #[error("Invalid ramp settings: {0}")]
    InvalidRampSettings(String),

    /// Session configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Engine refused to start playback (autoplay policy, missing source, ...)
    #[error("Play request rejected: {0}")]
    PlayRejected(String),

    /// Host could not start the ramp timer
    #[error("Ramp timer unavailable: {0}")]
    TimerUnavailable(String),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
