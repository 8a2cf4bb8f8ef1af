//! Fuzz target for broadcast payload decoding
//!
//! Builds payloads whose declared lengths disagree with the bytes that follow,
//! plus fully random payloads.
//!
//! # Strategy
//!
//! - Honest: lengths match the content
//! - Lying username length: `ulen` larger or smaller than the username bytes
//! - Lying message length: `mlen` up to u32::MAX
//! - Random bytes: arbitrary payload
//!
//! # Invariants
//!
//! - Decode errors MUST be payload errors (recoverable, never fatal)
//! - Honest payloads MUST decode to the fields they were built from
//! - NEVER panic, NEVER read past the payload

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanchat_proto::Broadcast;

#[derive(Debug, Clone, Arbitrary)]
enum Input {
    Honest { timestamp_ms: u64, username: String, message: String },
    Lying { timestamp_ms: u64, ulen: u16, username: Vec<u8>, mlen: u32, message: Vec<u8> },
    RandomBytes(Vec<u8>),
}

fuzz_target!(|input: Input| {
    match input {
        Input::Honest { timestamp_ms, username, message } => {
            let broadcast = Broadcast::new(timestamp_ms, username, message);
            let mut wire = Vec::new();
            if broadcast.encode(&mut wire).is_err() {
                return;
            }
            assert_eq!(Broadcast::decode(&wire), Ok(broadcast));
        },

        Input::Lying { timestamp_ms, ulen, username, mlen, message } => {
            let mut wire = Vec::new();
            wire.extend_from_slice(&timestamp_ms.to_be_bytes());
            wire.extend_from_slice(&ulen.to_be_bytes());
            wire.extend_from_slice(&username);
            wire.extend_from_slice(&mlen.to_be_bytes());
            wire.extend_from_slice(&message);

            if let Err(err) = Broadcast::decode(&wire) {
                assert!(err.is_payload_error(), "unexpected error: {err:?}");
            }
        },

        Input::RandomBytes(bytes) => {
            if let Err(err) = Broadcast::decode(&bytes) {
                assert!(err.is_payload_error(), "unexpected error: {err:?}");
            }
        },
    }
});
