//! Inbound half of a session.
//!
//! Reads frames until the peer closes, a read times out, the stream fails, or
//! the stop signal is set by someone else. Every exit path records a reason
//! on the [`StopSignal`] (first writer wins) and hands the read half back to
//! the caller. The loop never closes the stream.

use std::time::Duration;

use tokio::{io::AsyncRead, sync::mpsc};

use crate::{ChatEvent, StopReason, StopSignal, transport};

/// Reads and dispatches inbound frames.
pub struct ReceiveLoop<R> {
    reader: R,
    io_timeout: Duration,
    events: mpsc::Sender<ChatEvent>,
    stop: StopSignal,
}

impl<R> ReceiveLoop<R>
where
    R: AsyncRead + Unpin,
{
    /// Create a loop reading from `reader` and delivering to `events`.
    pub fn new(
        reader: R,
        io_timeout: Duration,
        events: mpsc::Sender<ChatEvent>,
        stop: StopSignal,
    ) -> Self {
        Self { reader, io_timeout, events, stop }
    }

    /// Run until stopped. Returns the read half.
    pub async fn run(self) -> R {
        let Self { mut reader, io_timeout, events, stop } = self;

        tokio::select! {
            biased;
            reason = stop.stopped() => {
                tracing::debug!(%reason, "receive loop cancelled");
            },
            reason = pump(&mut reader, io_timeout, &events) => {
                tracing::debug!(%reason, "receive loop finished");
                stop.trigger(reason);
            },
        }

        reader
    }
}

/// Read frames until a transport fault. Returns the fault as a stop reason.
async fn pump<R>(reader: &mut R, io_timeout: Duration, events: &mpsc::Sender<ChatEvent>) -> StopReason
where
    R: AsyncRead + Unpin,
{
    loop {
        let frame = match transport::read_frame(reader, io_timeout).await {
            Ok(frame) => frame,
            Err(e) => return StopReason::from(e),
        };

        tracing::trace!(
            frame_type = frame.header.frame_type(),
            size = frame.payload.len(),
            "frame received"
        );

        let Some(event) = ChatEvent::from_frame(&frame) else {
            continue;
        };

        // Nobody listening is not a transport fault; keep draining the stream.
        if events.send(event).await.is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}
