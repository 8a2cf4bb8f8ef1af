//! Outbound half of a session.
//!
//! Turns local input lines into `MSG` frames, in input order. Empty lines are
//! skipped, the quit command and end of input stop the session without
//! sending anything.

use std::time::Duration;

use lanchat_proto::Frame;
use tokio::{io::AsyncWrite, sync::mpsc};

use crate::{StopReason, StopSignal, transport};

/// Line that ends the session locally.
pub const QUIT_COMMAND: &str = "/quit";

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand<'a> {
    /// Nothing to send.
    Skip,
    /// End the session.
    Quit,
    /// Send the line verbatim.
    Send(&'a str),
}

/// Classify one line of local input.
///
/// Only an exact match of [`QUIT_COMMAND`] quits; `" /quit"` is sent as text.
/// Only the empty line is skipped; whitespace is content.
pub fn parse_line(line: &str) -> LineCommand<'_> {
    if line == QUIT_COMMAND {
        LineCommand::Quit
    } else if line.is_empty() {
        LineCommand::Skip
    } else {
        LineCommand::Send(line)
    }
}

/// Writes local input to the server.
pub struct SendLoop<W> {
    writer: W,
    io_timeout: Duration,
    input: mpsc::Receiver<String>,
    stop: StopSignal,
}

impl<W> SendLoop<W>
where
    W: AsyncWrite + Unpin,
{
    /// Create a loop sending lines from `input` on `writer`.
    pub fn new(
        writer: W,
        io_timeout: Duration,
        input: mpsc::Receiver<String>,
        stop: StopSignal,
    ) -> Self {
        Self { writer, io_timeout, input, stop }
    }

    /// Run until stopped. Returns the write half.
    pub async fn run(self) -> W {
        let Self { mut writer, io_timeout, mut input, stop } = self;

        tokio::select! {
            biased;
            reason = stop.stopped() => {
                tracing::debug!(%reason, "send loop cancelled");
            },
            reason = pump(&mut writer, io_timeout, &mut input) => {
                tracing::debug!(%reason, "send loop finished");
                stop.trigger(reason);
            },
        }

        writer
    }
}

async fn pump<W>(writer: &mut W, io_timeout: Duration, input: &mut mpsc::Receiver<String>) -> StopReason
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = input.recv().await {
        let text = match parse_line(&line) {
            LineCommand::Skip => continue,
            LineCommand::Quit => return StopReason::Quit,
            LineCommand::Send(text) => text,
        };

        if let Err(e) = transport::write_frame(writer, &Frame::msg(text), io_timeout).await {
            tracing::warn!(error = %e, "send failed");
            return StopReason::from(e);
        }
        tracing::trace!(size = text.len(), "message sent");
    }

    StopReason::InputClosed
}
