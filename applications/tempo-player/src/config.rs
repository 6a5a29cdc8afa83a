/// Player configuration
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempo_playback::{PlaybackConfig, Track};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tempo-player.toml";

/// Environment variable prefix (`TEMPO_PLAYBACK__RAMP__MAX_SPEED=3`)
pub const ENV_PREFIX: &str = "TEMPO";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_playlist")]
    pub playlist: Vec<Track>,

    /// How often the engine position is polled, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Values given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub start_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub acceleration: Option<f64>,
    pub tracks: Vec<PathBuf>,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `tempo-player.toml` is
    /// used if present in the working directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`load`](Self::load) with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Nested keys use a double underscore: TEMPO_PLAYBACK__SEEK_STEP_SECS
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Apply command line values on top of the loaded configuration
    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        let ramp = &mut self.playback.ramp;

        if let Some(start_speed) = overrides.start_speed {
            ramp.start_speed = start_speed;
        }
        if let Some(max_speed) = overrides.max_speed {
            ramp.max_speed = max_speed;
        }
        if let Some(acceleration) = overrides.acceleration {
            ramp.acceleration_exponent = acceleration;
        }

        if !overrides.tracks.is_empty() {
            self.playlist = overrides.tracks.iter().map(|path| track_from_path(path)).collect();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;

        if self.playlist.is_empty() {
            return Err(PlayerError::Config(
                "playlist is empty (add [[playlist]] entries or pass track files)".to_string(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(PlayerError::Config(
                "poll_interval_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            playlist: default_playlist(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Build a track from a file path, titled after the file stem
pub fn track_from_path(path: &Path) -> Track {
    let title = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());

    Track::new(title, path.to_string_lossy())
}

// Default values
fn default_playlist() -> Vec<Track> {
    vec![
        Track::new("Sunny Morning", "audio/sunny-morning.mp3"),
        Track::new("Lo-Fi Breeze", "audio/lofi-breeze.mp3"),
        Track::new("Chill Drive", "audio/chill-drive.mp3"),
    ]
}

fn default_poll_interval_ms() -> u64 {
    250
}
