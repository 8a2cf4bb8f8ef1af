//! Terminal front end for lanchat.
//!
//! Argument parsing, rendering, and exit status mapping live here so the
//! binary stays a thin wiring layer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod args;
pub mod render;

use std::io::Write;

use chrono::TimeZone;
use lanchat_client::{ChatEvent, SessionError};
use tokio::sync::mpsc;

pub use args::Args;

/// Exit status for invalid arguments.
pub const EXIT_CONFIG: u8 = 1;

/// Exit status when the TCP connection cannot be established.
pub const EXIT_CONNECT_FAILED: u8 = 2;

/// Exit status when the HELLO frame cannot be sent.
pub const EXIT_HANDSHAKE_FAILED: u8 = 3;

/// Process exit status for a session that failed to start.
pub fn exit_code(err: &SessionError) -> u8 {
    match err {
        SessionError::Config(_) => EXIT_CONFIG,
        SessionError::Connect { .. } | SessionError::ConnectTimeout { .. } => EXIT_CONNECT_FAILED,
        SessionError::Handshake(_) => EXIT_HANDSHAKE_FAILED,
    }
}

/// Write each event to `out` as it arrives, until the channel closes.
///
/// Returns `out` so the caller can keep using it for the closing lines.
pub async fn print_events<Tz, W>(mut events: mpsc::Receiver<ChatEvent>, tz: Tz, mut out: W) -> W
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    W: Write,
{
    while let Some(event) = events.recv().await {
        let line = render::format_event(&event, &tz);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "failed to write event");
        }
    }
    out
}
