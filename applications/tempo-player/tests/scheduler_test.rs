//! Ramp timer tests on tokio's paused clock

use std::time::Duration;
use tempo_player::scheduler::TokioRampScheduler;
use tempo_playback::{PlaybackError, RampScheduler};
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn timer_ticks_every_period() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioRampScheduler::new(tx);
    let start = tokio::time::Instant::now();

    let id = scheduler.start(Duration::from_millis(500)).unwrap();

    assert_eq!(rx.recv().await, Some(id));
    assert_eq!(start.elapsed(), Duration::from_millis(500));
    assert_eq!(rx.recv().await, Some(id));
    assert_eq!(start.elapsed(), Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_stops_ticking() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioRampScheduler::new(tx);

    let id = scheduler.start(Duration::from_millis(500)).unwrap();
    assert_eq!(rx.recv().await, Some(id));

    scheduler.cancel(id);
    assert_eq!(scheduler.active_count(), 0);

    let next = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(next.is_err());
}

#[tokio::test(start_paused = true)]
async fn cancel_is_idempotent_and_ids_are_unique() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioRampScheduler::new(tx);

    let first = scheduler.start(Duration::from_millis(500)).unwrap();
    scheduler.cancel(first);
    scheduler.cancel(first);
    let second = scheduler.start(Duration::from_millis(500)).unwrap();

    assert_ne!(first, second);
    assert_eq!(scheduler.active_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_scheduler_stops_timers() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioRampScheduler::new(tx);
    scheduler.start(Duration::from_millis(500)).unwrap();

    drop(scheduler);

    assert_eq!(rx.recv().await, None);
}

#[test]
fn start_outside_runtime_is_an_error() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioRampScheduler::new(tx);

    let result = scheduler.start(Duration::from_millis(500));

    assert!(matches!(result, Err(PlaybackError::TimerUnavailable(_))));
    assert_eq!(scheduler.active_count(), 0);
}
