//! Protocol error types.
//!
//! Errors are split by where they can be recovered. Header and frame errors
//! mean the stream position is lost and the connection cannot continue.
//! Broadcast errors are confined to one payload whose boundary is already
//! known, so a reader can skip it.

use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while encoding or decoding the wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Fewer bytes than a frame header.
    #[error("frame too short: expected {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Required byte count
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Header declares more payload than the buffer holds.
    #[error("frame truncated: header declares {expected} payload bytes, got {actual}")]
    FrameTruncated {
        /// Payload size declared by the header
        expected: usize,
        /// Payload bytes available
        actual: usize,
    },

    /// Payload does not fit the 32-bit length field.
    #[error("payload too large: {size} bytes exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size
        size: usize,
        /// Largest encodable size
        max: usize,
    },

    /// Broadcast payload is shorter than its fixed-size fields.
    #[error("broadcast payload too short: expected at least {expected} bytes, got {actual}")]
    BroadcastTooShort {
        /// Size of the fixed prefix
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Declared username length runs past the payload.
    #[error("broadcast payload truncated (username): declared {declared} bytes, {available} available")]
    UsernameTruncated {
        /// `ulen` field value
        declared: usize,
        /// Bytes left for the username
        available: usize,
    },

    /// Declared message length runs past the payload.
    #[error("broadcast payload truncated (message): declared {declared} bytes, {available} available")]
    MessageTruncated {
        /// `mlen` field value
        declared: usize,
        /// Bytes left for the message
        available: usize,
    },

    /// Username does not fit the 16-bit length field of a broadcast.
    #[error("username too long: {len} bytes exceeds maximum {max}")]
    UsernameTooLong {
        /// Username length in bytes
        len: usize,
        /// Largest encodable length
        max: usize,
    },
}

impl ProtocolError {
    /// Returns true if the error is confined to one payload.
    ///
    /// Payload-level errors leave the frame boundary intact, so the reader can
    /// drop the frame and keep going. Framing errors cannot be recovered.
    pub fn is_payload_error(&self) -> bool {
        matches!(
            self,
            Self::BroadcastTooShort { .. }
                | Self::UsernameTruncated { .. }
                | Self::MessageTruncated { .. }
        )
    }
}
