// SPDX-License-Identifier: MIT
//
// Background stdin line reader.
//
// `read_line` blocks, and the main loop must keep ticking while the user
// is idle, so a dedicated thread reads lines and forwards them over a
// channel. The main loop waits on the channel with `recv_timeout`, which
// doubles as the sampling timer.
//
// The channel disconnects when stdin reaches EOF or fails, which the loop
// treats as `quit`.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Spawn the reader thread.
///
/// The thread ends on its own at EOF; it is never joined, because a thread
/// blocked in `read_line` cannot be interrupted portably.
///
/// # Errors
///
/// Returns an error if the OS cannot spawn the thread.
pub fn spawn() -> io::Result<(JoinHandle<()>, Receiver<String>)> {
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || forward_lines(io::stdin().lock(), &tx))?;
    Ok((handle, rx))
}

/// Send each line of `input` (without its terminator) until EOF, a read
/// error, or the receiver hanging up.
fn forward_lines(mut input: impl BufRead, tx: &Sender<String>) {
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let text = line.trim_end_matches(['\r', '\n']).to_string();
                if tx.send(text).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn forwards_lines_without_terminators() {
        let (tx, rx) = mpsc::channel();
        forward_lines("pick\r\nmove 1 2\nquit".as_bytes(), &tx);
        drop(tx);
        let lines: Vec<String> = rx.iter().collect();
        assert_eq!(lines, vec!["pick", "move 1 2", "quit"]);
    }

    #[test]
    fn stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        forward_lines("a\nb\n".as_bytes(), &tx);
    }
}
