//! Frame header implementation with zero-copy parsing.
//!
//! The `FrameHeader` is a fixed 5-byte structure serialized as raw binary
//! (Big Endian): one type byte followed by the payload length.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    FrameType,
    errors::{ProtocolError, Result},
};

/// Fixed 5-byte frame header (Big Endian network byte order)
///
/// Fields are stored as raw byte arrays so the struct has no alignment
/// requirement and can be read straight out of a network buffer.
///
/// Every 5-byte pattern is a valid header. The type byte is kept raw because
/// unrecognized types must still be framed correctly: the reader needs
/// `payload_size` to skip them.
#[repr(C, packed)]
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct FrameHeader {
    frame_type: u8,          // FrameType byte (may be unknown)
    payload_size: [u8; 4],   // u32 payload length
}

impl FrameHeader {
    /// Size of the serialized header (5 bytes)
    pub const SIZE: usize = 5;

    /// Create a header for a known frame type.
    #[must_use]
    pub fn new(frame_type: FrameType, payload_size: u32) -> Self {
        Self::with_raw_type(frame_type.to_u8(), payload_size)
    }

    /// Create a header with an arbitrary type byte.
    #[must_use]
    pub fn with_raw_type(frame_type: u8, payload_size: u32) -> Self {
        Self { frame_type, payload_size: payload_size.to_be_bytes() }
    }

    /// Parse a header from the first 5 bytes of `bytes`.
    ///
    /// Bytes past the header are ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooShort` if fewer than 5 bytes are supplied
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, _rest) = Self::read_from_prefix(bytes).map_err(|_| {
            ProtocolError::FrameTooShort { expected: Self::SIZE, actual: bytes.len() }
        })?;

        Ok(header)
    }

    /// Serialize header to bytes (zero-copy)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(IntoBytes::as_bytes(self));
        arr
    }

    /// Frame type as raw byte.
    #[must_use]
    pub fn frame_type(&self) -> u8 {
        self.frame_type
    }

    /// Frame type as enum. `None` if unrecognized.
    #[must_use]
    pub fn frame_type_enum(&self) -> Option<FrameType> {
        FrameType::from_u8(self.frame_type)
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn payload_size(&self) -> u32 {
        u32::from_be_bytes(self.payload_size)
    }

    /// Set payload size.
    pub fn set_payload_size(&mut self, size: u32) {
        self.payload_size = size.to_be_bytes();
    }
}

// Manual Debug implementation (can't derive field references due to packed repr)
impl std::fmt::Debug for FrameHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FrameHeader");
        match self.frame_type_enum() {
            Some(ty) => s.field("frame_type", &ty),
            None => s.field("frame_type", &format!("{:#04x}", self.frame_type())),
        };
        s.field("payload_size", &self.payload_size()).finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    impl Arbitrary for FrameHeader {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (any::<u8>(), any::<u32>())
                .prop_map(|(frame_type, payload_size)| Self::with_raw_type(frame_type, payload_size))
                .boxed()
        }
    }

    #[test]
    fn header_size() {
        assert_eq!(std::mem::size_of::<FrameHeader>(), FrameHeader::SIZE);
        assert_eq!(FrameHeader::SIZE, 5);
    }

    #[test]
    fn layout_is_type_then_big_endian_length() {
        let header = FrameHeader::new(FrameType::Msg, 0x0102_0304);
        assert_eq!(header.to_bytes(), [0x02, 0x01, 0x02, 0x03, 0x04]);
    }

    proptest! {
        #[test]
        fn header_round_trip(header in any::<FrameHeader>()) {
            let bytes = header.to_bytes();
            let parsed = FrameHeader::from_bytes(&bytes).expect("should parse");
            prop_assert_eq!(header, parsed);
        }

        #[test]
        fn any_five_bytes_parse(bytes in any::<[u8; 5]>()) {
            let parsed = FrameHeader::from_bytes(&bytes).expect("should parse");
            prop_assert_eq!(parsed.frame_type(), bytes[0]);
            prop_assert_eq!(
                parsed.payload_size(),
                u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]])
            );
        }
    }

    #[test]
    fn reject_short_buffer() {
        for len in 0..FrameHeader::SIZE {
            let buf = vec![0u8; len];
            let result = FrameHeader::from_bytes(&buf);
            assert_eq!(result, Err(ProtocolError::FrameTooShort { expected: 5, actual: len }));
        }
    }

    #[test]
    fn trailing_bytes_ignored() {
        let bytes = [0x12, 0, 0, 0, 3, 0xAA, 0xBB];
        let header = FrameHeader::from_bytes(&bytes).expect("should parse");
        assert_eq!(header.frame_type_enum(), Some(FrameType::MsgBroadcast));
        assert_eq!(header.payload_size(), 3);
    }

    #[test]
    fn unknown_type_is_preserved() {
        let header = FrameHeader::from_bytes(&[0x7F, 0, 0, 0, 0]).expect("should parse");
        assert_eq!(header.frame_type(), 0x7F);
        assert_eq!(header.frame_type_enum(), None);
    }
}
