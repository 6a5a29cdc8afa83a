//! rodio-backed playback engine
//!
//! One `Sink` per loaded track. The sink has no notification channel, so
//! the host calls [`RodioEngine::poll_events`] on an interval to turn
//! position changes and drained queues into [`EngineEvent`]s.

use crate::error::{PlayerError, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::time::Duration;
use tempo_playback::{EngineEvent, PlaybackEngine, PlaybackError};
use tracing::{debug, warn};

/// Engine that can be polled for notifications
///
/// Hosts without push callbacks implement this alongside [`PlaybackEngine`].
pub trait PolledEngine: PlaybackEngine {
    /// Notifications observed since the last poll
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}

pub struct RodioEngine {
    // Dropping the stream stops all output
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    source: Option<String>,
    duration: Option<Duration>,
    rate: f64,
    muted: bool,
    playing: bool,
    last_position: Duration,
    pending_events: Vec<EngineEvent>,
}

impl RodioEngine {
    /// Open the default audio output device
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlayerError::AudioDevice(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            source: None,
            duration: None,
            rate: 1.0,
            muted: false,
            playing: false,
            last_position: Duration::ZERO,
            pending_events: Vec::new(),
        })
    }

    /// Decode `path` into a fresh paused sink
    fn open(&self, path: &str) -> Result<(Sink, Option<Duration>)> {
        let file = File::open(path)?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| PlayerError::AudioDevice(format!("cannot decode {path}: {e}")))?;
        let duration = decoder.total_duration();

        let sink =
            Sink::try_new(&self.handle).map_err(|e| PlayerError::AudioDevice(e.to_string()))?;
        sink.pause();
        sink.set_speed(self.rate as f32);
        sink.set_volume(self.volume());
        sink.append(decoder);

        Ok((sink, duration))
    }

    fn load(&mut self, uri: &str) {
        self.sink = None;
        self.duration = None;
        self.playing = false;
        self.last_position = Duration::ZERO;

        match self.open(uri) {
            Ok((sink, duration)) => {
                debug!(uri, ?duration, "Source loaded");
                self.sink = Some(sink);
                self.duration = duration;
                if duration.is_some() {
                    self.pending_events.push(EngineEvent::MetadataLoaded);
                }
            }
            Err(e) => warn!(uri, error = %e, "Failed to load source"),
        }
    }

    fn volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            1.0
        }
    }
}

impl PlaybackEngine for RodioEngine {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.load(uri);
    }

    fn play(&mut self) -> tempo_playback::Result<()> {
        // A drained sink cannot restart; decode the track again from the top
        if self.sink.as_ref().map_or(true, Sink::empty) {
            if let Some(uri) = self.source.clone() {
                self.load(&uri);
            }
        }

        let Some(sink) = &self.sink else {
            return Err(PlaybackError::PlayRejected(match &self.source {
                Some(uri) => format!("{uri} could not be opened"),
                None => "no source loaded".to_string(),
            }));
        };

        sink.play();
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.sink
            .as_ref()
            .map_or(0.0, |sink| sink.get_pos().as_secs_f64())
    }

    fn set_current_time(&mut self, seconds: f64) {
        let Some(sink) = &self.sink else {
            return;
        };

        let target = Duration::from_secs_f64(seconds.max(0.0));
        if let Err(e) = sink.try_seek(target) {
            warn!(seconds, error = %e, "Seek failed");
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
        if let Some(sink) = &self.sink {
            sink.set_speed(rate as f32);
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume());
        }
    }
}

impl PolledEngine for RodioEngine {
    fn poll_events(&mut self) -> Vec<EngineEvent> {
        if let Some(sink) = &self.sink {
            let position = sink.get_pos();
            if position != self.last_position {
                self.last_position = position;
                self.pending_events.push(EngineEvent::TimeUpdate);
            }

            if self.playing && sink.empty() {
                self.playing = false;
                self.pending_events.push(EngineEvent::Ended);
            }
        }

        std::mem::take(&mut self.pending_events)
    }
}
