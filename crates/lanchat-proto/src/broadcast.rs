//! Server broadcast payload.
//!
//! Wire layout (Big Endian):
//!
//! ```text
//! ts_ms:u64  ulen:u16  username:byte[ulen]  mlen:u32  message:byte[mlen]
//! ```
//!
//! `ulen` and `mlen` count bytes of the UTF-8 encoding, not characters.

use bytes::{Buf, BufMut, BytesMut};

use crate::{
    Frame, FrameType,
    errors::{ProtocolError, Result},
};

/// A chat message relayed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    /// Server timestamp in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Author of the message.
    pub username: String,
    /// Message text.
    pub message: String,
}

impl Broadcast {
    /// Size of the fixed fields: timestamp, username length, message length.
    pub const MIN_SIZE: usize = 8 + 2 + 4;

    /// Longest username the 16-bit length field can describe.
    pub const MAX_USERNAME_LEN: usize = u16::MAX as usize;

    /// Create a broadcast.
    #[must_use]
    pub fn new(timestamp_ms: u64, username: impl Into<String>, message: impl Into<String>) -> Self {
        Self { timestamp_ms, username: username.into(), message: message.into() }
    }

    /// Decode a `MSG_BROADCAST` payload.
    ///
    /// Username and message bytes are decoded lossily: malformed UTF-8 is
    /// replaced with U+FFFD and never fails the frame. Bytes after the
    /// message are ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::BroadcastTooShort` if the payload is shorter than
    ///   [`Self::MIN_SIZE`]
    /// - `ProtocolError::UsernameTruncated` if `ulen` runs past the payload
    ///   (the message length field must still follow the username)
    /// - `ProtocolError::MessageTruncated` if `mlen` runs past the payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < Self::MIN_SIZE {
            return Err(ProtocolError::BroadcastTooShort {
                expected: Self::MIN_SIZE,
                actual: payload.len(),
            });
        }

        let mut buf = payload;
        let timestamp_ms = buf.get_u64();
        let username_len = usize::from(buf.get_u16());

        // `buf.remaining() >= 4` here: the message length field is part of MIN_SIZE.
        if buf.remaining() < username_len + 4 {
            return Err(ProtocolError::UsernameTruncated {
                declared: username_len,
                available: buf.remaining().saturating_sub(4),
            });
        }
        let username = String::from_utf8_lossy(&buf[..username_len]).into_owned();
        buf.advance(username_len);

        let message_len = buf.get_u32() as usize;
        if buf.remaining() < message_len {
            return Err(ProtocolError::MessageTruncated {
                declared: message_len,
                available: buf.remaining(),
            });
        }
        let message = String::from_utf8_lossy(&buf[..message_len]).into_owned();

        Ok(Self { timestamp_ms, username, message })
    }

    /// Encoded payload size in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        Self::MIN_SIZE + self.username.len() + self.message.len()
    }

    /// Encode the payload into `dst`.
    ///
    /// This is the server side of the exchange; clients only decode.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::UsernameTooLong` if the username exceeds
    ///   [`Self::MAX_USERNAME_LEN`] bytes
    /// - `ProtocolError::PayloadTooLarge` if the message exceeds the 32-bit
    ///   length field
    ///
    /// Nothing is written when an error is returned.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let username_len = u16::try_from(self.username.len()).map_err(|_| {
            ProtocolError::UsernameTooLong {
                len: self.username.len(),
                max: Self::MAX_USERNAME_LEN,
            }
        })?;
        let message_len =
            u32::try_from(self.message.len()).map_err(|_| ProtocolError::PayloadTooLarge {
                size: self.message.len(),
                max: Frame::MAX_PAYLOAD_SIZE,
            })?;

        dst.put_u64(self.timestamp_ms);
        dst.put_u16(username_len);
        dst.put_slice(self.username.as_bytes());
        dst.put_u32(message_len);
        dst.put_slice(self.message.as_bytes());

        Ok(())
    }

    /// Wrap the encoded payload in a `MSG_BROADCAST` frame.
    pub fn to_frame(&self) -> Result<Frame> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(Frame::new(FrameType::MsgBroadcast, buf.freeze()))
    }
}
