//! Local line source.

use std::{io::BufRead, thread};

use tokio::sync::mpsc;

/// Lines buffered between the reader thread and the send loop.
const LINE_BUFFER: usize = 64;

/// Read lines from `source` on a dedicated OS thread.
///
/// Line terminators (`\n` or `\r\n`) are stripped. The channel closes on end
/// of input or on the first read error, which the send loop treats as a quit.
/// The thread is detached: a read blocked on a terminal never delays process
/// exit. It ends on its own once the receiver is dropped and the next line
/// arrives.
pub fn spawn_line_reader<S>(source: S) -> mpsc::Receiver<String>
where
    S: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    let spawned = thread::Builder::new().name("lanchat-input".to_string()).spawn(move || {
        for line in source.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                },
            };

            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        tracing::debug!("input closed");
    });

    // Dropping the closure drops the sender, so the receiver reports end of
    // input and the session quits.
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to spawn input thread");
    }

    rx
}
