//! Text rendering for the terminal.
//!
//! Every function returns the line to print; writing it is the caller's job.
//! Server timestamps are rendered in a caller-supplied time zone so output is
//! deterministic under test.

use chrono::TimeZone;
use lanchat_client::{ChatEvent, SessionError, StopReason};

/// Printed last, whatever ended the session.
pub const BYE: &str = "[client] bye";

/// Format a millisecond Unix timestamp as `YYYY-MM-DD HH:MM:SS` in `tz`.
///
/// Timestamps outside the representable calendar range fall back to the raw
/// millisecond value.
pub fn format_timestamp<Tz: TimeZone>(timestamp_ms: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(|ms| tz.timestamp_millis_opt(ms).earliest())
        .map_or_else(
            || timestamp_ms.to_string(),
            |time| time.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

/// Format one inbound event.
pub fn format_event<Tz: TimeZone>(event: &ChatEvent, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match event {
        ChatEvent::Ack => "[server] OK".to_string(),
        ChatEvent::ServerError { text } => format!("[server] ERR: {text}"),
        ChatEvent::Message(broadcast) => format!(
            "[{}] {}: {}",
            format_timestamp(broadcast.timestamp_ms, tz),
            broadcast.username,
            broadcast.message
        ),
        ChatEvent::MalformedBroadcast { error } => {
            format!("[client] failed to parse broadcast: {error}")
        },
    }
}

/// Closing notice for a session that ended on its own.
///
/// Local endings (quit, end of input, Ctrl-C) print nothing besides [`BYE`].
pub fn format_stop_reason(reason: &StopReason) -> Option<String> {
    match reason {
        StopReason::PeerClosed => Some("[client] connection closed by server".to_string()),
        StopReason::Timeout => Some("[client] socket error: timed out".to_string()),
        StopReason::Transport(e) => Some(format!("[client] socket error: {e}")),
        StopReason::Protocol(e) => Some(format!("[client] {e}")),
        StopReason::Quit | StopReason::InputClosed | StopReason::Interrupted => None,
    }
}

/// Message for a session that never started.
pub fn format_session_error(err: &SessionError) -> String {
    match err {
        SessionError::Config(e) => format!("[client] {e}"),
        SessionError::Connect { addr, source } => format!("[client] cannot connect to {addr} -> {source}"),
        SessionError::ConnectTimeout { addr, .. } => {
            format!("[client] cannot connect to {addr} -> timed out")
        },
        SessionError::Handshake(e) => format!("[client] send HELLO failed: {e}"),
    }
}
