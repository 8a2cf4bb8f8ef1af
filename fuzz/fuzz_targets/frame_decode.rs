//! Fuzz target for Frame::decode
//!
//! Feeds arbitrary bytes to the frame decoder to find:
//! - Parser crashes or panics
//! - Length fields that read past the input
//! - Frames that do not re-encode to the bytes they were decoded from
//!
//! # Invariants
//!
//! - Input shorter than 5 bytes MUST be rejected
//! - A decoded frame's payload length MUST equal the header's declared size
//! - Re-encoding a decoded frame MUST reproduce the consumed prefix exactly
//! - NEVER panic

#![no_main]

use libfuzzer_sys::fuzz_target;
use lanchat_proto::{Frame, FrameHeader};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = Frame::decode(data) else {
        return;
    };

    assert!(data.len() >= FrameHeader::SIZE);
    assert_eq!(frame.payload.len(), frame.header.payload_size() as usize);

    let wire = frame.to_vec().expect("decoded frame must re-encode");
    assert_eq!(&wire[..], &data[..frame.encoded_len()]);
});
