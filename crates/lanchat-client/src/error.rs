//! Client error types.
//!
//! One error type per layer: [`TransportError`] for stream I/O,
//! [`SessionError`] for the fatal failures that prevent a session from
//! starting, [`ConfigError`] for rejected settings. Faults after the session
//! has started are not errors; they become a
//! [`StopReason`](crate::StopReason).

use std::{io, time::Duration};

use lanchat_proto::ProtocolError;
use thiserror::Error;

/// Errors from reading or writing frames on a stream.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Peer closed the stream (read returned zero bytes).
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// A single read or write did not complete within the deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Underlying socket error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Frame could not be encoded or its header decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Invalid session settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Username is empty or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Username does not fit the broadcast username field.
    #[error("username is {len} bytes, maximum is {max}")]
    UsernameTooLong {
        /// Username length in bytes
        len: usize,
        /// Largest accepted length
        max: usize,
    },

    /// A deadline of zero would fail every operation.
    #[error("{name} must be greater than zero")]
    ZeroTimeout {
        /// Setting name
        name: &'static str,
    },
}

/// Failures that prevent a session from starting.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Settings rejected before connecting.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// TCP connection could not be established.
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        /// Target address
        addr: String,
        /// Socket error
        #[source]
        source: io::Error,
    },

    /// TCP connection did not complete within the connect deadline.
    #[error("cannot connect to {addr}: timed out after {timeout:?}")]
    ConnectTimeout {
        /// Target address
        addr: String,
        /// Connect deadline
        timeout: Duration,
    },

    /// HELLO frame could not be sent. The transport has been closed.
    #[error("send HELLO failed: {0}")]
    Handshake(#[source] TransportError),
}

impl SessionError {
    /// Returns true if the transport was never established.
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::ConnectTimeout { .. })
    }
}
