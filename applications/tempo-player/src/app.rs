//! Terminal event loop
//!
//! Multiplexes three sources onto the session: key commands, ramp timer
//! ticks and the engine poll interval. Renders a status line after every
//! change.

use crate::config::PlayerConfig;
use crate::engine::{PolledEngine, RodioEngine};
use crate::input::{self, Command};
use crate::scheduler::TokioRampScheduler;
use anyhow::Context;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tempo_playback::{PlaybackSession, Playlist, RampScheduler, SessionEvent, TimerId};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    InputClosed,
    Interrupted,
}

/// Open the audio device and run the player until the user quits
pub async fn run(config: PlayerConfig) -> anyhow::Result<()> {
    let playlist = Playlist::new(config.playlist.clone()).context("Invalid playlist")?;
    let engine = RodioEngine::new().context("Failed to open audio output")?;

    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let scheduler = TokioRampScheduler::new(tick_tx);

    let mut session = PlaybackSession::new(playlist, config.playback.clone(), engine, scheduler)
        .context("Failed to create playback session")?;
    info!(tracks = session.playlist().len(), "Player ready");

    // Detached: after Ctrl-C it may still be blocked on stdin, and process
    // exit takes it down
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    input::spawn_stdin_reader(command_tx).context("Failed to start input reader")?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", input::help_text())?;

    let reason = drive(
        &mut session,
        tick_rx,
        command_rx,
        Duration::from_millis(config.poll_interval_ms),
        tokio::signal::ctrl_c(),
        &mut stdout,
    )
    .await?;
    info!(?reason, "Stopping player");

    session.shutdown();
    writeln!(stdout)?;

    Ok(())
}

/// Run the event loop until a quit command, closed input or `shutdown` fires
pub async fn drive<E, S, F, T, W>(
    session: &mut PlaybackSession<E, S>,
    mut ticks: mpsc::UnboundedReceiver<TimerId>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    poll_period: Duration,
    shutdown: F,
    out: &mut W,
) -> std::io::Result<ExitReason>
where
    E: PolledEngine,
    S: RampScheduler,
    F: Future<Output = T>,
    W: Write,
{
    let mut poll = tokio::time::interval(poll_period);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    render(session, out)?;

    let reason = loop {
        tokio::select! {
            _ = &mut shutdown => break ExitReason::Interrupted,
            command = commands.recv() => match command {
                Some(Command::Key(key)) => {
                    session.handle_key(key);
                }
                Some(Command::Help) => {
                    writeln!(out, "\n{}", input::help_text())?;
                }
                Some(Command::Unknown(text)) => {
                    writeln!(out, "\nUnknown command: {text}")?;
                }
                Some(Command::Quit) => break ExitReason::Quit,
                None => break ExitReason::InputClosed,
            },
            Some(timer) = ticks.recv() => {
                session.on_ramp_tick(timer);
            }
            _ = poll.tick() => {
                for event in session.engine_mut().poll_events() {
                    session.handle_engine_event(event);
                }
            }
        }

        if report(session.drain_events(), out)? {
            render(session, out)?;
        }
    };

    Ok(reason)
}

/// Surface events that need more than the status line
///
/// Returns whether anything changed.
fn report<W: Write>(events: Vec<SessionEvent>, out: &mut W) -> std::io::Result<bool> {
    let changed = !events.is_empty();

    for event in events {
        match event {
            SessionEvent::TrackChanged { index, title } => {
                info!(index, %title, "Now playing");
            }
            SessionEvent::PlayRejected { message } => {
                warn!(%message, "Playback refused");
                writeln!(out, "\nCannot play: {message}")?;
            }
            _ => {}
        }
    }

    Ok(changed)
}

fn render<E, S, W>(session: &PlaybackSession<E, S>, out: &mut W) -> std::io::Result<()>
where
    E: PolledEngine,
    S: RampScheduler,
    W: Write,
{
    write!(out, "\r\x1b[2K{}", session.now_playing())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_changes() {
        let mut out = Vec::new();

        assert!(!report(Vec::new(), &mut out).unwrap());
        assert!(report(vec![SessionEvent::SpeedChanged { speed: 1.2 }], &mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn report_prints_rejections() {
        let mut out = Vec::new();

        report(
            vec![SessionEvent::PlayRejected {
                message: "no source loaded".to_string(),
            }],
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Cannot play: no source loaded"));
    }
}
