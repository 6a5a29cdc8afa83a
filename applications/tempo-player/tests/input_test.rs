//! Input reader shutdown tests
//!
//! The reader must never hold up runtime shutdown, even while the input
//! stream stays open after `q`.

use std::io::{self, Read};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tempo_player::input::{spawn_line_reader, Command};
use tokio::sync::mpsc;

/// Input stream that stays open until the test releases it, like a terminal
struct HeldOpen {
    release: std_mpsc::Receiver<()>,
}

impl Read for HeldOpen {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        let _ = self.release.recv();
        Ok(0)
    }
}

#[test]
fn runtime_shuts_down_promptly_after_quit() {
    let (release_tx, release_rx) = std_mpsc::channel();
    let input = io::Cursor::new("n\nq\n").chain(HeldOpen {
        release: release_rx,
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let received = runtime.block_on(async {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_line_reader(input, tx).unwrap();

        let mut received = Vec::new();
        while let Some(command) = rx.recv().await {
            let quit = command == Command::Quit;
            received.push(command);
            if quit {
                break;
            }
        }
        received
    });
    assert_eq!(received.last(), Some(&Command::Quit));

    // Drop the runtime on a helper thread so a hang shows up as a failure
    let (done_tx, done_rx) = std_mpsc::channel();
    std::thread::spawn(move || {
        drop(runtime);
        let _ = done_tx.send(());
    });

    let dropped = done_rx.recv_timeout(Duration::from_secs(2));
    drop(release_tx);

    assert!(dropped.is_ok(), "runtime drop blocked on the input reader");
}

#[test]
fn reader_survives_runtime_shutdown_without_quit() {
    let (release_tx, release_rx) = std_mpsc::channel::<()>();
    let input = HeldOpen {
        release: release_rx,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let reader = runtime.block_on(async { spawn_line_reader(input, tx).unwrap() });

    // Ctrl-C path: the loop ends while the reader is still blocked
    let (done_tx, done_rx) = std_mpsc::channel();
    std::thread::spawn(move || {
        drop(runtime);
        let _ = done_tx.send(());
    });
    assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_ok());

    drop(rx);
    drop(release_tx);
    assert!(reader.join().is_ok());
}
