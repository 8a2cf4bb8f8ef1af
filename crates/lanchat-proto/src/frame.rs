//! Frame type combining header and payload.
//!
//! A `Frame` is the transport-layer packet consisting of:
//! - 5-byte raw binary header (type byte, Big Endian length)
//! - Variable-length raw bytes
//!
//! This is a pure data holder. Structured payloads are interpreted on demand,
//! see [`crate::Broadcast::decode`] and [`Frame::text_lossy`].

use bytes::{BufMut, Bytes};

use crate::{
    FrameHeader, FrameType,
    errors::{ProtocolError, Result},
};

/// Complete protocol frame (transport layer)
///
/// Layout on the wire:
/// `[FrameHeader: 5 bytes] + [payload: payload_size bytes]`
///
/// # Invariants
///
/// - Size Consistency: `payload.len()` matches `header.payload_size()` for
///   every frame built by [`Frame::with_raw_type`] or [`Frame::decode`].
///
/// - Size Limit: the payload must fit the 32-bit length field. A frame built
///   from a larger payload saturates its header and is rejected by
///   [`Frame::encode`], so an oversized frame can never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame header (5 bytes)
    pub header: FrameHeader,

    /// Raw payload bytes
    pub payload: Bytes,
}

impl Frame {
    /// Largest payload the length field can describe.
    pub const MAX_PAYLOAD_SIZE: usize = u32::MAX as usize;

    /// Create a frame of a known type with automatic `payload_size`.
    #[must_use]
    pub fn new(frame_type: FrameType, payload: impl Into<Bytes>) -> Self {
        Self::with_raw_type(frame_type.to_u8(), payload)
    }

    /// Create a frame with an arbitrary type byte.
    ///
    /// Used for forward-compatible frames and for tests that exercise the
    /// unknown-type path.
    #[must_use]
    pub fn with_raw_type(frame_type: u8, payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();
        let payload_size = u32::try_from(payload.len()).unwrap_or(u32::MAX);
        Self { header: FrameHeader::with_raw_type(frame_type, payload_size), payload }
    }

    /// Handshake frame announcing `username`.
    #[must_use]
    pub fn hello(username: &str) -> Self {
        Self::new(FrameType::Hello, Bytes::copy_from_slice(username.as_bytes()))
    }

    /// Chat line frame carrying `text`.
    #[must_use]
    pub fn msg(text: &str) -> Self {
        Self::new(FrameType::Msg, Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Frame type as enum. `None` if unrecognized.
    #[must_use]
    pub fn frame_type(&self) -> Option<FrameType> {
        self.header.frame_type_enum()
    }

    /// Payload decoded as UTF-8, replacing malformed sequences with U+FFFD.
    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Total encoded size (header + payload).
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        FrameHeader::SIZE + self.payload.len()
    }

    /// Encode frame into buffer
    ///
    /// Writes: `[header (5 bytes)] + [payload (variable)]`
    ///
    /// # Errors
    ///
    /// - `ProtocolError::PayloadTooLarge` if the payload does not fit the
    ///   32-bit length field. Nothing is written in that case.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        if self.payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                size: self.payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        debug_assert_eq!(self.payload.len(), self.header.payload_size() as usize);

        dst.put_slice(&self.header.to_bytes());
        dst.put_slice(&self.payload);

        Ok(())
    }

    /// Encode into a freshly allocated buffer.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode frame from wire format
    ///
    /// Reads the header and exactly `payload_size` bytes after it. Trailing
    /// data is ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooShort` if the header is incomplete
    /// - `ProtocolError::FrameTruncated` if fewer payload bytes are present
    ///   than the header declares
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = FrameHeader::from_bytes(bytes)?;

        let payload_size = header.payload_size() as usize;
        let body = &bytes[FrameHeader::SIZE..];

        let Some(payload) = body.get(..payload_size) else {
            return Err(ProtocolError::FrameTruncated {
                expected: payload_size,
                actual: body.len(),
            });
        };

        Ok(Self { header, payload: Bytes::copy_from_slice(payload) })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    impl Arbitrary for Frame {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (any::<u8>(), any::<Vec<u8>>())
                .prop_map(|(frame_type, payload)| Self::with_raw_type(frame_type, payload))
                .boxed()
        }
    }

    proptest! {
        #[test]
        fn frame_round_trip(frame in any::<Frame>()) {
            let wire = frame.to_vec().expect("should encode");
            let parsed = Frame::decode(&wire).expect("should decode");
            prop_assert_eq!(frame, parsed);
        }
    }

    #[test]
    fn hello_carries_raw_username_bytes() {
        let frame = Frame::hello("Alice");
        let wire = frame.to_vec().expect("should encode");
        assert_eq!(wire, [0x01, 0, 0, 0, 5, b'A', b'l', b'i', b'c', b'e']);
    }

    #[test]
    fn msg_carries_utf8_bytes_not_chars() {
        let frame = Frame::msg("héllo");
        assert_eq!(frame.frame_type(), Some(FrameType::Msg));
        assert_eq!(frame.header.payload_size(), 6);
        assert_eq!(frame.text_lossy(), "héllo");
    }

    #[test]
    fn empty_payload() {
        let frame = Frame::new(FrameType::Ok, Bytes::new());
        let wire = frame.to_vec().expect("should encode");
        assert_eq!(wire, [0x06, 0, 0, 0, 0]);

        let parsed = Frame::decode(&wire).expect("should decode");
        assert!(parsed.payload.is_empty());
    }

    #[test]
    fn reject_truncated_frame() {
        let header = FrameHeader::new(FrameType::Msg, 100);
        let result = Frame::decode(&header.to_bytes());
        assert_eq!(result, Err(ProtocolError::FrameTruncated { expected: 100, actual: 0 }));
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut wire = Frame::msg("hi").to_vec().expect("should encode");
        wire.extend_from_slice(b"next frame");

        let parsed = Frame::decode(&wire).expect("should decode");
        assert_eq!(&parsed.payload[..], b"hi");
    }

    #[test]
    fn text_lossy_replaces_invalid_utf8() {
        let frame = Frame::new(FrameType::Err, vec![b'b', 0xFF, b'd']);
        assert_eq!(frame.text_lossy(), "b\u{FFFD}d");
    }
}
