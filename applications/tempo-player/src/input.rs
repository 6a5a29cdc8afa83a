//! Line-based keyboard input
//!
//! The terminal stays in cooked mode, so each key arrives as a line on
//! stdin: `space`, `m`, `n`, `p`, `right`, `left`, `q`.

use std::io::{self, BufRead, BufReader, Read};
use std::thread::{self, JoinHandle};
use tempo_playback::Key;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Key(Key),
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line of input; blank lines yield `None`
pub fn parse_command(line: &str) -> Option<Command> {
    // A lone space is the space bar, not a blank line
    if let Some(key) = Key::from_name(line.trim_end_matches(['\r', '\n'])) {
        return Some(Command::Key(key));
    }

    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => None,
        "q" | "quit" | "exit" => Some(Command::Quit),
        "h" | "?" | "help" => Some(Command::Help),
        _ => Some(Command::Unknown(trimmed.to_string())),
    }
}

/// Usage text printed on start and for `help`
pub fn help_text() -> &'static str {
    "Keys (type and press Enter): space play/pause | m mute | n next | p previous | \
     right +10s | left -10s | q quit"
}

/// Spawn a thread forwarding parsed stdin lines to `commands`
///
/// Blocking reads stay off the tokio runtime, so shutting the runtime down
/// never waits for the next line.
pub fn spawn_stdin_reader(commands: mpsc::UnboundedSender<Command>) -> io::Result<JoinHandle<()>> {
    spawn_line_reader(io::stdin(), commands)
}

/// Spawn a thread forwarding parsed lines from `input` to `commands`
///
/// Stops after forwarding `Quit`, or sends `Quit` itself at end of input or
/// on a read error. Also stops once the receiver is gone.
pub fn spawn_line_reader<R>(
    input: R,
    commands: mpsc::UnboundedSender<Command>,
) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("tempo-stdin".to_string())
        .spawn(move || forward_lines(BufReader::new(input), &commands))
}

fn forward_lines<R: BufRead>(input: R, commands: &mpsc::UnboundedSender<Command>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "stdin read failed");
                break;
            }
        };

        let Some(command) = parse_command(&line) else {
            continue;
        };
        let quit = command == Command::Quit;

        if commands.send(command).is_err() || quit {
            return;
        }
    }

    debug!("stdin closed");
    let _ = commands.send(Command::Quit);
}
