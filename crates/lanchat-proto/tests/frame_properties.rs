//! Property-based tests for frame and broadcast encoding/decoding
//!
//! These tests verify that serialization is correct for ALL valid inputs, not
//! just specific examples, and that truncated input is always rejected without
//! reading out of bounds.

use bytes::Bytes;
use lanchat_proto::{Broadcast, Frame, FrameHeader, FrameType, ProtocolError};
use proptest::prelude::*;

/// Strategy for generating known frame types
fn arbitrary_frame_type() -> impl Strategy<Value = FrameType> {
    prop_oneof![
        Just(FrameType::Hello),
        Just(FrameType::Msg),
        Just(FrameType::Err),
        Just(FrameType::Ok),
        Just(FrameType::MsgBroadcast),
    ]
}

/// Strategy for generating broadcasts with multi-byte UTF-8 content
fn arbitrary_broadcast() -> impl Strategy<Value = Broadcast> {
    (any::<u64>(), "\\PC{0,32}", "\\PC{0,256}")
        .prop_map(|(ts, username, message)| Broadcast::new(ts, username, message))
}

#[test]
fn prop_frame_header_roundtrip() {
    proptest!(|(
        type_byte in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..1024),
    )| {
        let frame = Frame::with_raw_type(type_byte, Bytes::from(payload.clone()));
        let wire = frame.to_vec().expect("encode should succeed");

        // PROPERTY: decode_header(encode(type, payload)[0..5]) == (type, L)
        let header = FrameHeader::from_bytes(&wire[..FrameHeader::SIZE])
            .expect("header should parse");
        prop_assert_eq!(header.frame_type(), type_byte);
        prop_assert_eq!(header.payload_size() as usize, payload.len());

        // PROPERTY: the following L bytes equal the payload
        prop_assert_eq!(&wire[FrameHeader::SIZE..], &payload[..]);
    });
}

#[test]
fn prop_frame_encode_decode_roundtrip() {
    proptest!(|(
        frame_type in arbitrary_frame_type(),
        payload in prop::collection::vec(any::<u8>(), 0..1024),
    )| {
        let frame = Frame::new(frame_type, Bytes::from(payload));
        let wire = frame.to_vec().expect("encode should succeed");
        let decoded = Frame::decode(&wire).expect("decode should succeed");

        prop_assert_eq!(decoded.frame_type(), Some(frame_type));
        prop_assert_eq!(decoded, frame);
    });
}

#[test]
fn prop_frame_encoded_size_correct() {
    proptest!(|(
        type_byte in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..1024),
    )| {
        let frame = Frame::with_raw_type(type_byte, Bytes::from(payload));
        let wire = frame.to_vec().expect("encode should succeed");

        // PROPERTY: Encoded size must equal header size + payload size
        prop_assert_eq!(wire.len(), FrameHeader::SIZE + frame.payload.len());
        prop_assert_eq!(wire.len(), frame.encoded_len());
    });
}

#[test]
fn prop_frame_truncated_rejected() {
    proptest!(|(
        payload in prop::collection::vec(any::<u8>(), 1..256),
        cut in any::<prop::sample::Index>(),
    )| {
        let wire = Frame::new(FrameType::Msg, Bytes::from(payload))
            .to_vec()
            .expect("encode should succeed");
        let cut = cut.index(wire.len());

        // PROPERTY: any strict prefix fails to decode
        let result = Frame::decode(&wire[..cut]);
        prop_assert!(
            matches!(
                result,
                Err(ProtocolError::FrameTooShort { .. } | ProtocolError::FrameTruncated { .. })
            ),
            "prefix of {} bytes decoded: {:?}",
            cut,
            result
        );
    });
}

#[test]
fn prop_broadcast_roundtrip() {
    proptest!(|(broadcast in arbitrary_broadcast())| {
        let frame = broadcast.to_frame().expect("encode should succeed");
        let decoded = Broadcast::decode(&frame.payload).expect("decode should succeed");

        // PROPERTY: Round-trip must be identity
        prop_assert_eq!(decoded, broadcast);
    });
}

#[test]
fn prop_broadcast_truncation_rejected() {
    proptest!(|(
        broadcast in arbitrary_broadcast(),
        cut in any::<prop::sample::Index>(),
    )| {
        let frame = broadcast.to_frame().expect("encode should succeed");
        let cut = cut.index(frame.payload.len());

        // PROPERTY: truncation at any boundary before the end is a payload error
        let result = Broadcast::decode(&frame.payload[..cut]);
        match result {
            Err(err) => prop_assert!(err.is_payload_error(), "unexpected error: {:?}", err),
            Ok(decoded) => prop_assert!(false, "prefix of {} bytes decoded: {:?}", cut, decoded),
        }
    });
}

#[test]
fn prop_broadcast_decode_never_panics() {
    proptest!(|(payload in prop::collection::vec(any::<u8>(), 0..512))| {
        // PROPERTY: arbitrary bytes either decode or return a payload error
        if let Err(err) = Broadcast::decode(&payload) {
            prop_assert!(err.is_payload_error());
        }
    });
}

#[test]
fn prop_unknown_type_still_framed() {
    proptest!(|(
        type_byte in any::<u8>().prop_filter("unknown type", |b| FrameType::from_u8(*b).is_none()),
        payload in prop::collection::vec(any::<u8>(), 0..256),
        trailer in prop::collection::vec(any::<u8>(), 0..64),
    )| {
        let mut wire = Frame::with_raw_type(type_byte, Bytes::from(payload.clone()))
            .to_vec()
            .expect("encode should succeed");
        wire.extend_from_slice(&trailer);

        // PROPERTY: the frame boundary is known even when the type is not
        let decoded = Frame::decode(&wire).expect("decode should succeed");
        prop_assert_eq!(decoded.frame_type(), None);
        prop_assert_eq!(&decoded.payload[..], &payload[..]);
        prop_assert_eq!(decoded.encoded_len(), wire.len() - trailer.len());
    });
}
