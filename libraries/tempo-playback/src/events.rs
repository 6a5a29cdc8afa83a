//! Session Events
//!
//! Event-based communication for UI synchronization. The session queues
//! events as it transitions; hosts drain them after each handler and
//! re-render what changed.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Playing/paused flag changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A different track was loaded
    TrackChanged {
        /// Playlist index of the new track
        index: usize,
        /// Title of the new track
        title: String,
    },

    /// Ramp wrote a new rate, or the rate was reset
    SpeedChanged {
        /// Current playback rate
        speed: f64,
    },

    /// Mute flag changed
    MuteChanged {
        /// Whether output is muted
        muted: bool,
    },

    /// Position or duration changed
    PositionUpdate {
        /// Current position in seconds
        current_time: f64,
        /// Track duration in seconds (0 while unknown)
        duration: f64,
    },

    /// The engine refused to play; the session fell back to paused
    PlayRejected {
        /// Engine-provided reason
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = SessionEvent::TrackChanged {
            index: 2,
            title: "Chill Drive".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "trackChanged");
        assert_eq!(json["index"], 2);
        assert_eq!(json["title"], "Chill Drive");
    }

    #[test]
    fn state_changed_round_trip() {
        let event = SessionEvent::StateChanged {
            state: PlaybackState::Playing,
        };

        let json = serde_json::to_string(&event).unwrap();
        let decoded: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
